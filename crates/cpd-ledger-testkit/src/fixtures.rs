//! Test fixtures and helpers.
//!
//! Common setup code for integration and property tests.

use cpd_ledger::{
    IssueRequest, Ledger, LedgerConfig, ManualClock, Principal, RecordId, RecordingSettlement,
};

/// A ledger wired to a recording settlement backend and a manual
/// clock, together with the three standing parties every scenario
/// needs.
pub struct LedgerFixture {
    pub ledger: Ledger<RecordingSettlement, ManualClock>,
    pub settlement: RecordingSettlement,
    pub clock: ManualClock,
    pub authority: Principal,
    pub issuer: Principal,
    pub professional: Principal,
}

impl LedgerFixture {
    /// A fresh ledger with nothing configured: no authority, no
    /// approved issuers.
    pub fn new() -> Self {
        Self::with_config(LedgerConfig::default())
    }

    /// A fresh, unconfigured ledger with custom init values.
    pub fn with_config(config: LedgerConfig) -> Self {
        let settlement = RecordingSettlement::new();
        let clock = ManualClock::new();
        let ledger = Ledger::new(config, settlement.clone(), clock.clone());
        Self {
            ledger,
            settlement,
            clock,
            authority: Principal::derive("fixture/authority"),
            issuer: Principal::derive("fixture/issuer"),
            professional: Principal::derive("fixture/professional"),
        }
    }

    /// A ledger with the authority latched and the fixture issuer
    /// approved, ready to issue.
    pub fn bootstrapped() -> Self {
        let fixture = Self::new();
        fixture.ledger.set_authority(&fixture.authority).unwrap();
        fixture
            .ledger
            .approve_issuer(&fixture.authority, &fixture.issuer)
            .unwrap();
        fixture
    }

    /// Same as [`bootstrapped`](Self::bootstrapped) with custom init
    /// values.
    pub fn bootstrapped_with(config: LedgerConfig) -> Self {
        let fixture = Self::with_config(config);
        fixture.ledger.set_authority(&fixture.authority).unwrap();
        fixture
            .ledger
            .approve_issuer(&fixture.authority, &fixture.issuer)
            .unwrap();
        fixture
    }

    /// A valid issue request aimed at the fixture professional.
    pub fn issue_request(&self) -> IssueRequest {
        self.issue_request_for(self.professional)
    }

    /// A valid issue request aimed at an arbitrary professional.
    pub fn issue_request_for(&self, professional: Principal) -> IssueRequest {
        IssueRequest {
            professional,
            course_hash: vec![0u8; 32],
            credits: 10,
            description: "Course Description".to_string(),
            category: "ethics".to_string(),
            expiration: 1_000_000,
            location: "Online".to_string(),
            signature: vec![0u8; 65],
        }
    }

    /// Issue a valid credit to the fixture professional.
    pub fn issue(&self) -> RecordId {
        self.ledger
            .issue_credit(&self.issuer, &self.issue_request())
            .unwrap()
    }
}

impl Default for LedgerFixture {
    fn default() -> Self {
        Self::new()
    }
}

/// A random principal, unique with overwhelming probability.
pub fn random_principal() -> Principal {
    Principal::from_bytes(rand::random())
}

/// Distinct derived principals for multi-party tests.
pub fn multi_party_principals(count: usize) -> Vec<Principal> {
    (0..count)
        .map(|i| Principal::derive(&format!("fixture/party-{i}")))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bootstrapped_fixture_can_issue() {
        let fixture = LedgerFixture::bootstrapped();
        let id = fixture.issue();
        assert_eq!(id, RecordId(1));
        assert_eq!(fixture.ledger.get_total_credits(&fixture.professional), 10);
        assert_eq!(fixture.settlement.transfers().len(), 1);
    }

    #[test]
    fn test_fresh_fixture_is_unconfigured() {
        let fixture = LedgerFixture::new();
        assert!(!fixture.ledger.is_approved(&fixture.issuer));
        assert_eq!(fixture.ledger.get_last_token_id(), RecordId(0));
    }

    #[test]
    fn test_multi_party_principals_distinct() {
        let parties = multi_party_principals(3);
        assert_ne!(parties[0], parties[1]);
        assert_ne!(parties[1], parties[2]);
        assert_ne!(parties[0], parties[2]);
    }

    #[test]
    fn test_random_principals_distinct() {
        assert_ne!(random_principal(), random_principal());
    }
}
