//! The set of principals approved to issue credits.
//!
//! Mutation is authority-gated by the ledger; the registry itself is
//! a plain idempotent set.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use cpd_ledger_core::Principal;

/// Principals currently approved to mint credit records.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssuerRegistry {
    approved: BTreeSet<Principal>,
}

impl IssuerRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Approve an issuer. Approving twice is a no-op.
    pub fn approve(&mut self, issuer: Principal) {
        self.approved.insert(issuer);
    }

    /// Revoke an issuer. Revoking an absent entry still succeeds.
    pub fn revoke(&mut self, issuer: &Principal) {
        self.approved.remove(issuer);
    }

    /// Whether the principal is currently approved.
    pub fn is_approved(&self, issuer: &Principal) -> bool {
        self.approved.contains(issuer)
    }

    /// Number of approved issuers.
    pub fn len(&self) -> usize {
        self.approved.len()
    }

    /// Whether no issuer is approved.
    pub fn is_empty(&self) -> bool {
        self.approved.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_approve_and_revoke() {
        let mut registry = IssuerRegistry::new();
        let issuer = Principal::derive("issuer");

        assert!(!registry.is_approved(&issuer));
        registry.approve(issuer);
        assert!(registry.is_approved(&issuer));
        registry.revoke(&issuer);
        assert!(!registry.is_approved(&issuer));
    }

    #[test]
    fn test_idempotent_operations() {
        let mut registry = IssuerRegistry::new();
        let issuer = Principal::derive("issuer");

        registry.approve(issuer);
        registry.approve(issuer);
        assert_eq!(registry.len(), 1);

        registry.revoke(&issuer);
        registry.revoke(&issuer);
        assert!(registry.is_empty());
    }
}
