//! Credit records and per-holder accounts.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::category::Category;
use crate::types::{BlockHeight, CourseHash, Principal, RecordId};

/// One minted unit of attested completion credit.
///
/// Created by issuance; `holder` is reassigned by transfer and
/// `active` is toggled by status updates. Everything else, including
/// `issuer`, is immutable for the life of the record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreditRecord {
    pub id: RecordId,
    pub holder: Principal,
    pub course_hash: CourseHash,
    pub credits: u64,
    pub issued_at: BlockHeight,
    pub description: String,
    pub category: Category,
    pub expiration: BlockHeight,
    pub active: bool,
    pub location: String,
    pub issuer: Principal,
}

impl CreditRecord {
    /// Whether the record has expired at the given height.
    pub fn is_expired(&self, now: BlockHeight) -> bool {
        self.expiration <= now
    }
}

/// Aggregate of all records currently held by one professional.
///
/// Invariant: `total_credits` equals the sum of `credits` over the
/// records named in `token_ids`, regardless of their `active` flags.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HolderAccount {
    pub total_credits: u64,
    pub token_ids: BTreeSet<RecordId>,
}

impl HolderAccount {
    /// Create an empty account.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record receipt of a credit record.
    pub fn deposit(&mut self, id: RecordId, credits: u64) {
        self.total_credits += credits;
        self.token_ids.insert(id);
    }

    /// Record loss of a credit record (burn or transfer out).
    ///
    /// `credits` must be the value the record was deposited with.
    pub fn withdraw(&mut self, id: RecordId, credits: u64) {
        debug_assert!(self.token_ids.contains(&id));
        self.total_credits -= credits;
        self.token_ids.remove(&id);
    }

    /// Whether this account currently holds the given record.
    pub fn holds(&self, id: RecordId) -> bool {
        self.token_ids.contains(&id)
    }

    /// Whether the account holds nothing at all.
    pub fn is_empty(&self) -> bool {
        self.token_ids.is_empty()
    }
}
