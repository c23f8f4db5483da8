//! The complete ledger state as one value.
//!
//! Everything the persistence collaborator must store durably lives
//! here, so a snapshot is a single clone and a restore is a single
//! deserialization.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::config::{AuthorityConfig, LedgerConfig};
use crate::registry::IssuerRegistry;
use crate::signatures::SignatureStore;
use cpd_ledger_core::{CreditRecord, HolderAccount, Principal, RecordId};

/// All mutable ledger state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerState {
    /// Authority latch, fee, cap, and minimum credits.
    pub config: AuthorityConfig,

    /// Principals approved to issue.
    pub issuers: IssuerRegistry,

    /// Signature blob per live record.
    pub signatures: SignatureStore,

    /// Live records indexed by id.
    pub records: BTreeMap<RecordId, CreditRecord>,

    /// Accounts of every professional that has ever held credits.
    pub holders: BTreeMap<Principal, HolderAccount>,

    /// The most recently assigned record id.
    pub last_token_id: RecordId,
}

impl LedgerState {
    /// Create the state of a fresh ledger.
    pub fn new(config: LedgerConfig) -> Self {
        Self {
            config: AuthorityConfig::new(config),
            issuers: IssuerRegistry::new(),
            signatures: SignatureStore::new(),
            records: BTreeMap::new(),
            holders: BTreeMap::new(),
            last_token_id: RecordId::ZERO,
        }
    }

    /// Total credits currently held by a principal; 0 without an account.
    pub fn total_credits(&self, holder: &Principal) -> u64 {
        self.holders
            .get(holder)
            .map(|account| account.total_credits)
            .unwrap_or(0)
    }

    /// Check the cross-map invariants.
    ///
    /// - every live record id has exactly one stored signature;
    /// - each record's holder account lists it;
    /// - every account's total equals the sum over its held records.
    ///
    /// Used by property tests and by restore paths that want to refuse
    /// a corrupted snapshot.
    pub fn is_consistent(&self) -> bool {
        if self.signatures.len() != self.records.len() {
            return false;
        }
        if !self.signatures.ids().all(|id| self.records.contains_key(&id)) {
            return false;
        }

        for (id, record) in &self.records {
            if record.id != *id {
                return false;
            }
            match self.holders.get(&record.holder) {
                Some(account) if account.holds(*id) => {}
                _ => return false,
            }
        }

        for (holder, account) in &self.holders {
            let sum: u64 = account
                .token_ids
                .iter()
                .filter_map(|id| self.records.get(id))
                .map(|record| record.credits)
                .sum();
            if sum != account.total_credits {
                return false;
            }
            if !account
                .token_ids
                .iter()
                .all(|id| self.records.get(id).map(|r| r.holder == *holder) == Some(true))
            {
                return false;
            }
        }

        true
    }
}

impl Default for LedgerState {
    fn default() -> Self {
        Self::new(LedgerConfig::default())
    }
}
