//! Authority and global configuration.
//!
//! The authority is a one-time latch: it can be set exactly once and
//! no update path exists. Fee and cap are mutable only by the
//! authority; `min_credits` is fixed at initialization.

use serde::{Deserialize, Serialize};

use crate::error::{LedgerError, Result};
use cpd_ledger_core::Principal;

/// Initialization values for a fresh ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LedgerConfig {
    /// Fee settled from the issuer to the authority per issuance.
    pub issuance_fee: u64,
    /// Maximum total credits any single holder may accumulate.
    pub max_credits_per_holder: u64,
    /// Minimum credits a single record may carry.
    pub min_credits: u64,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            issuance_fee: 100,
            max_credits_per_holder: 100,
            min_credits: 1,
        }
    }
}

/// The governing authority and its tunable parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorityConfig {
    authority: Option<Principal>,
    issuance_fee: u64,
    max_credits_per_holder: u64,
    min_credits: u64,
}

impl AuthorityConfig {
    /// Create the configuration of a fresh ledger; no authority yet.
    pub fn new(config: LedgerConfig) -> Self {
        Self {
            authority: None,
            issuance_fee: config.issuance_fee,
            max_credits_per_holder: config.max_credits_per_holder,
            min_credits: config.min_credits,
        }
    }

    /// The governing authority, if one has been set.
    pub fn authority(&self) -> Option<&Principal> {
        self.authority.as_ref()
    }

    /// Current issuance fee.
    pub fn issuance_fee(&self) -> u64 {
        self.issuance_fee
    }

    /// Current per-holder credit cap.
    pub fn max_credits_per_holder(&self) -> u64 {
        self.max_credits_per_holder
    }

    /// Minimum credits per record, fixed at init.
    pub fn min_credits(&self) -> u64 {
        self.min_credits
    }

    /// Latch the authority. Fails if one is already set.
    pub fn set_authority(&mut self, candidate: Principal) -> Result<()> {
        if self.authority.is_some() {
            return Err(LedgerError::AuthorityAlreadySet);
        }
        self.authority = Some(candidate);
        Ok(())
    }

    /// The authority, or `AuthorityNotSet` if the latch is empty.
    pub fn require_authority(&self) -> Result<Principal> {
        self.authority.ok_or(LedgerError::AuthorityNotSet)
    }

    /// Require that `caller` is the configured authority.
    ///
    /// Returns the authority principal so callers can use it (e.g. as
    /// the fee recipient) without a second lookup.
    pub fn authorize(&self, caller: &Principal) -> Result<Principal> {
        let authority = self.require_authority()?;
        if *caller != authority {
            return Err(LedgerError::NotAuthorized);
        }
        Ok(authority)
    }

    /// Update the issuance fee. Authority only.
    ///
    /// Fees are unsigned, so there is no negative-fee rejection here;
    /// `LedgerError::InvalidFee` stays reserved in the taxonomy.
    pub fn set_issuance_fee(&mut self, caller: &Principal, fee: u64) -> Result<()> {
        self.authorize(caller)?;
        self.issuance_fee = fee;
        Ok(())
    }

    /// Update the per-holder cap. Authority only; must be positive.
    pub fn set_max_credits_per_holder(&mut self, caller: &Principal, max: u64) -> Result<()> {
        self.authorize(caller)?;
        if max == 0 {
            return Err(LedgerError::InvalidCap);
        }
        self.max_credits_per_holder = max;
        Ok(())
    }
}
