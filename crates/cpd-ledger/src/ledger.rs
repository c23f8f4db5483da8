//! The Ledger: the credit-issuance state machine.
//!
//! Every public operation resolves authorization first, then record
//! bookkeeping, then mutates state as one indivisible step. Mutating
//! calls evaluate their preconditions in a fixed order against the
//! locked state before the first write, so the first failing
//! precondition determines the error and a rejected call leaves the
//! ledger untouched.

use std::sync::RwLock;

use tracing::{debug, info};

use crate::clock::Clock;
use crate::config::LedgerConfig;
use crate::error::{LedgerError, Result};
use crate::settlement::Settlement;
use crate::state::LedgerState;
use cpd_ledger_core::{
    validate_issue_fields, CreditRecord, HolderAccount, IssueRequest, Principal, RecordId,
};

/// The credit ledger.
///
/// Generic over its two synchronous collaborators: the settlement
/// backend that moves the issuance fee and the clock that supplies
/// logical height. State sits behind a single write lock; the
/// execution model is one writer per call with no suspension points.
pub struct Ledger<S: Settlement, C: Clock> {
    state: RwLock<LedgerState>,
    settlement: S,
    clock: C,
}

impl<S: Settlement, C: Clock> Ledger<S, C> {
    /// Create a fresh ledger.
    pub fn new(config: LedgerConfig, settlement: S, clock: C) -> Self {
        Self {
            state: RwLock::new(LedgerState::new(config)),
            settlement,
            clock,
        }
    }

    /// Resume from a persisted state snapshot.
    pub fn with_state(state: LedgerState, settlement: S, clock: C) -> Self {
        Self {
            state: RwLock::new(state),
            settlement,
            clock,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Authority & Configuration
    // ─────────────────────────────────────────────────────────────────────────

    /// Latch the governing authority. One-time; there is no update path.
    pub fn set_authority(&self, candidate: &Principal) -> Result<()> {
        let mut state = self.state.write().unwrap();
        state.config.set_authority(*candidate)?;
        info!(authority = %candidate, "authority set");
        Ok(())
    }

    /// Update the issuance fee. Authority only.
    pub fn set_issuance_fee(&self, caller: &Principal, fee: u64) -> Result<()> {
        let mut state = self.state.write().unwrap();
        state.config.set_issuance_fee(caller, fee)?;
        debug!(fee, "issuance fee updated");
        Ok(())
    }

    /// Update the per-holder credit cap. Authority only; must be > 0.
    pub fn set_max_credits_per_holder(&self, caller: &Principal, max: u64) -> Result<()> {
        let mut state = self.state.write().unwrap();
        state.config.set_max_credits_per_holder(caller, max)?;
        debug!(max, "per-holder cap updated");
        Ok(())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Issuer Registry
    // ─────────────────────────────────────────────────────────────────────────

    /// Approve a principal to issue credits. Authority only; idempotent.
    pub fn approve_issuer(&self, caller: &Principal, issuer: &Principal) -> Result<()> {
        let mut state = self.state.write().unwrap();
        state.config.authorize(caller)?;
        state.issuers.approve(*issuer);
        info!(issuer = %issuer, "issuer approved");
        Ok(())
    }

    /// Revoke an issuer. Authority only; revoking an absent entry succeeds.
    pub fn revoke_issuer(&self, caller: &Principal, issuer: &Principal) -> Result<()> {
        let mut state = self.state.write().unwrap();
        state.config.authorize(caller)?;
        state.issuers.revoke(issuer);
        info!(issuer = %issuer, "issuer revoked");
        Ok(())
    }

    /// Whether a principal is currently approved to issue.
    pub fn is_approved(&self, issuer: &Principal) -> bool {
        self.state.read().unwrap().issuers.is_approved(issuer)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Record Lifecycle
    // ─────────────────────────────────────────────────────────────────────────

    /// Mint a credit record for a professional.
    ///
    /// Preconditions are evaluated in a fixed order (approved issuer,
    /// no self-issuance, field shape, authority present, holder cap)
    /// and the first failure is the reported error. The issuance fee
    /// settles after validation and before any write; a settlement
    /// refusal aborts with no state change.
    pub fn issue_credit(&self, caller: &Principal, req: &IssueRequest) -> Result<RecordId> {
        let mut state = self.state.write().unwrap();
        let now = self.clock.height();

        if !state.issuers.is_approved(caller) {
            return Err(LedgerError::IssuerNotVerified);
        }
        if req.professional == *caller {
            return Err(LedgerError::InvalidProfessional);
        }
        let fields = validate_issue_fields(req, state.config.min_credits(), now)?;
        let authority = state.config.require_authority()?;

        let held = state.total_credits(&req.professional);
        let cap = state.config.max_credits_per_holder();
        if held.saturating_add(req.credits) > cap {
            return Err(LedgerError::MaxCreditsExceeded {
                held,
                requested: req.credits,
                cap,
            });
        }

        self.settlement
            .transfer_value(state.config.issuance_fee(), caller, &authority)?;

        let id = state.last_token_id.next();
        let record = CreditRecord {
            id,
            holder: req.professional,
            course_hash: fields.course_hash,
            credits: req.credits,
            issued_at: now,
            description: req.description.clone(),
            category: fields.category,
            expiration: req.expiration,
            active: true,
            location: req.location.clone(),
            issuer: *caller,
        };
        state.records.insert(id, record);
        state.signatures.insert(id, fields.signature);
        state
            .holders
            .entry(req.professional)
            .or_insert_with(HolderAccount::new)
            .deposit(id, req.credits);
        state.last_token_id = id;

        info!(
            id = id.0,
            holder = %req.professional,
            issuer = %caller,
            credits = req.credits,
            category = %fields.category,
            "credit issued"
        );
        Ok(id)
    }

    /// Flip a record's active flag. Issuer of the record only; the
    /// transition must actually change the flag.
    pub fn update_credit_status(
        &self,
        caller: &Principal,
        id: RecordId,
        active: bool,
    ) -> Result<()> {
        let mut state = self.state.write().unwrap();

        let record = state
            .records
            .get_mut(&id)
            .ok_or(LedgerError::RecordNotFound(id))?;
        if record.issuer != *caller {
            return Err(LedgerError::NotAuthorized);
        }
        if record.active == active {
            return Err(LedgerError::InvalidStatusTransition { active });
        }
        record.active = active;

        debug!(id = id.0, active, "credit status updated");
        Ok(())
    }

    /// Destroy a record permanently. Holder only; the id is retired
    /// and never reissued.
    pub fn burn_credit(&self, caller: &Principal, id: RecordId) -> Result<()> {
        let mut state = self.state.write().unwrap();

        let (holder, credits) = match state.records.get(&id) {
            Some(record) => (record.holder, record.credits),
            None => return Err(LedgerError::RecordNotFound(id)),
        };
        if holder != *caller {
            return Err(LedgerError::NotAuthorized);
        }
        // Defensive: unreachable while the conservation invariant
        // holds, checked before any deletion so a failure mutates
        // nothing.
        if !state.holders.contains_key(caller) {
            return Err(LedgerError::HolderAccountMissing(*caller));
        }

        state.records.remove(&id);
        state.signatures.remove(id);
        if let Some(account) = state.holders.get_mut(caller) {
            account.withdraw(id, credits);
        }

        info!(id = id.0, holder = %caller, credits, "credit burned");
        Ok(())
    }

    /// Reassign a record to a new holder, moving its accounting.
    /// Holder only. The recipient's account is created on demand.
    pub fn transfer_credit(
        &self,
        caller: &Principal,
        id: RecordId,
        recipient: &Principal,
    ) -> Result<()> {
        let mut state = self.state.write().unwrap();

        let (holder, credits) = match state.records.get(&id) {
            Some(record) => (record.holder, record.credits),
            None => return Err(LedgerError::RecordNotFound(id)),
        };
        if holder != *caller {
            return Err(LedgerError::NotAuthorized);
        }
        if !state.holders.contains_key(caller) {
            return Err(LedgerError::HolderAccountMissing(*caller));
        }

        if let Some(record) = state.records.get_mut(&id) {
            record.holder = *recipient;
        }
        if let Some(account) = state.holders.get_mut(caller) {
            account.withdraw(id, credits);
        }
        state
            .holders
            .entry(*recipient)
            .or_insert_with(HolderAccount::new)
            .deposit(id, credits);

        info!(id = id.0, from = %caller, to = %recipient, credits, "credit transferred");
        Ok(())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Queries
    // ─────────────────────────────────────────────────────────────────────────

    /// Get a record by id.
    pub fn get_record(&self, id: RecordId) -> Option<CreditRecord> {
        self.state.read().unwrap().records.get(&id).cloned()
    }

    /// Get a holder's account (total credits and held ids).
    pub fn get_holder_account(&self, holder: &Principal) -> Option<HolderAccount> {
        self.state.read().unwrap().holders.get(holder).cloned()
    }

    /// The most recently assigned record id; zero on a fresh ledger.
    pub fn get_last_token_id(&self) -> RecordId {
        self.state.read().unwrap().last_token_id
    }

    /// Total credits currently held; 0 when no account exists.
    pub fn get_total_credits(&self, holder: &Principal) -> u64 {
        self.state.read().unwrap().total_credits(holder)
    }

    /// Byte-exact comparison of a candidate signature against the
    /// stored blob; false when the record does not exist.
    pub fn verify_signature(&self, id: RecordId, candidate: &[u8]) -> bool {
        self.state.read().unwrap().signatures.verify(id, candidate)
    }

    /// Clone the full state for the persistence collaborator.
    pub fn snapshot(&self) -> LedgerState {
        self.state.read().unwrap().clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::settlement::{FailingSettlement, RecordingSettlement};

    fn valid_request(professional: Principal) -> IssueRequest {
        IssueRequest {
            professional,
            course_hash: vec![0u8; 32],
            credits: 10,
            description: "Course Description".to_string(),
            category: "ethics".to_string(),
            expiration: 1000,
            location: "Online".to_string(),
            signature: vec![0u8; 65],
        }
    }

    struct Parties {
        authority: Principal,
        issuer: Principal,
        professional: Principal,
    }

    fn bootstrapped() -> (Ledger<RecordingSettlement, ManualClock>, Parties) {
        let parties = Parties {
            authority: Principal::derive("authority"),
            issuer: Principal::derive("issuer"),
            professional: Principal::derive("professional"),
        };
        let ledger = Ledger::new(
            LedgerConfig::default(),
            RecordingSettlement::new(),
            ManualClock::new(),
        );
        ledger.set_authority(&parties.authority).unwrap();
        ledger
            .approve_issuer(&parties.authority, &parties.issuer)
            .unwrap();
        (ledger, parties)
    }

    #[test]
    fn test_issue_assigns_sequential_ids() {
        let (ledger, p) = bootstrapped();
        let other = Principal::derive("other-prof");

        let id1 = ledger
            .issue_credit(&p.issuer, &valid_request(p.professional))
            .unwrap();
        let id2 = ledger.issue_credit(&p.issuer, &valid_request(other)).unwrap();

        assert_eq!(id1, RecordId(1));
        assert_eq!(id2, RecordId(2));
        assert_eq!(ledger.get_last_token_id(), RecordId(2));
    }

    #[test]
    fn test_issue_requires_approved_issuer() {
        let (ledger, p) = bootstrapped();
        let stranger = Principal::derive("stranger");

        let err = ledger
            .issue_credit(&stranger, &valid_request(p.professional))
            .unwrap_err();
        assert_eq!(err, LedgerError::IssuerNotVerified);
    }

    #[test]
    fn test_issue_rejects_self_issuance() {
        let (ledger, p) = bootstrapped();

        let err = ledger
            .issue_credit(&p.issuer, &valid_request(p.issuer))
            .unwrap_err();
        assert_eq!(err, LedgerError::InvalidProfessional);
    }

    #[test]
    fn test_issue_requires_authority() {
        // The public API cannot approve an issuer before the authority
        // is set, so reach the unset-authority rejection through a
        // restored state that carries an approval but no latch.
        let issuer = Principal::derive("issuer");
        let prof = Principal::derive("prof");
        let mut state = crate::state::LedgerState::default();
        state.issuers.approve(issuer);
        let ledger = Ledger::with_state(state, RecordingSettlement::new(), ManualClock::new());

        let err = ledger.issue_credit(&issuer, &valid_request(prof)).unwrap_err();
        assert_eq!(err, LedgerError::AuthorityNotSet);
    }

    #[test]
    fn test_issue_without_any_setup_fails_on_issuer_check() {
        let ledger = Ledger::new(
            LedgerConfig::default(),
            RecordingSettlement::new(),
            ManualClock::new(),
        );
        let issuer = Principal::derive("issuer");
        let prof = Principal::derive("prof");

        let err = ledger.issue_credit(&issuer, &valid_request(prof)).unwrap_err();
        assert_eq!(err, LedgerError::IssuerNotVerified);
    }

    #[test]
    fn test_issue_records_fee_transfer() {
        let settlement = RecordingSettlement::new();
        let ledger = Ledger::new(
            LedgerConfig::default(),
            settlement.clone(),
            ManualClock::new(),
        );
        let authority = Principal::derive("authority");
        let issuer = Principal::derive("issuer");
        let prof = Principal::derive("prof");
        ledger.set_authority(&authority).unwrap();
        ledger.approve_issuer(&authority, &issuer).unwrap();

        ledger.issue_credit(&issuer, &valid_request(prof)).unwrap();

        let transfers = settlement.transfers();
        assert_eq!(transfers.len(), 1);
        assert_eq!(transfers[0].amount, 100);
        assert_eq!(transfers[0].from, issuer);
        assert_eq!(transfers[0].to, authority);
    }

    #[test]
    fn test_issue_cap_boundary() {
        let (ledger, p) = bootstrapped();

        // Default cap is 100; fill to 90.
        let mut req = valid_request(p.professional);
        req.credits = 90;
        ledger.issue_credit(&p.issuer, &req).unwrap();

        // Exactly reaching the cap succeeds.
        req.credits = 10;
        ledger.issue_credit(&p.issuer, &req).unwrap();
        assert_eq!(ledger.get_total_credits(&p.professional), 100);

        // One more unit fails.
        req.credits = 1;
        let err = ledger.issue_credit(&p.issuer, &req).unwrap_err();
        assert_eq!(
            err,
            LedgerError::MaxCreditsExceeded {
                held: 100,
                requested: 1,
                cap: 100
            }
        );
    }

    #[test]
    fn test_failed_issue_leaves_state_unchanged() {
        let (ledger, p) = bootstrapped();
        let before = ledger.snapshot();

        let mut req = valid_request(p.professional);
        req.credits = 0; // invalid
        assert!(ledger.issue_credit(&p.issuer, &req).is_err());

        assert_eq!(ledger.snapshot(), before);
    }

    #[test]
    fn test_settlement_refusal_aborts_issue() {
        let ledger = Ledger::new(
            LedgerConfig::default(),
            FailingSettlement,
            ManualClock::new(),
        );
        let authority = Principal::derive("authority");
        let issuer = Principal::derive("issuer");
        let prof = Principal::derive("prof");
        ledger.set_authority(&authority).unwrap();
        ledger.approve_issuer(&authority, &issuer).unwrap();
        let before = ledger.snapshot();

        let err = ledger.issue_credit(&issuer, &valid_request(prof)).unwrap_err();
        assert!(matches!(err, LedgerError::Settlement(_)));
        assert_eq!(ledger.snapshot(), before);
        assert_eq!(ledger.get_last_token_id(), RecordId::ZERO);
    }

    #[test]
    fn test_issued_at_comes_from_clock() {
        let clock = ManualClock::new();
        let ledger = Ledger::new(
            LedgerConfig::default(),
            RecordingSettlement::new(),
            clock.clone(),
        );
        let authority = Principal::derive("authority");
        let issuer = Principal::derive("issuer");
        let prof = Principal::derive("prof");
        ledger.set_authority(&authority).unwrap();
        ledger.approve_issuer(&authority, &issuer).unwrap();

        clock.advance(7);
        let id = ledger.issue_credit(&issuer, &valid_request(prof)).unwrap();

        let record = ledger.get_record(id).unwrap();
        assert_eq!(record.issued_at, 7);
        assert!(record.active);
        assert_eq!(record.issuer, issuer);
    }

    #[test]
    fn test_expiration_checked_against_clock() {
        let clock = ManualClock::new();
        let ledger = Ledger::new(
            LedgerConfig::default(),
            RecordingSettlement::new(),
            clock.clone(),
        );
        let authority = Principal::derive("authority");
        let issuer = Principal::derive("issuer");
        let prof = Principal::derive("prof");
        ledger.set_authority(&authority).unwrap();
        ledger.approve_issuer(&authority, &issuer).unwrap();

        clock.advance(1000);
        let err = ledger.issue_credit(&issuer, &valid_request(prof)).unwrap_err();
        assert_eq!(
            err,
            LedgerError::InvalidExpiration {
                expiration: 1000,
                now: 1000
            }
        );
    }

    #[test]
    fn test_update_status_issuer_only() {
        let (ledger, p) = bootstrapped();
        let id = ledger
            .issue_credit(&p.issuer, &valid_request(p.professional))
            .unwrap();

        // The holder cannot deactivate their own record.
        let err = ledger
            .update_credit_status(&p.professional, id, false)
            .unwrap_err();
        assert_eq!(err, LedgerError::NotAuthorized);

        ledger.update_credit_status(&p.issuer, id, false).unwrap();
        assert!(!ledger.get_record(id).unwrap().active);
    }

    #[test]
    fn test_update_status_rejects_noop() {
        let (ledger, p) = bootstrapped();
        let id = ledger
            .issue_credit(&p.issuer, &valid_request(p.professional))
            .unwrap();

        let err = ledger.update_credit_status(&p.issuer, id, true).unwrap_err();
        assert_eq!(err, LedgerError::InvalidStatusTransition { active: true });

        ledger.update_credit_status(&p.issuer, id, false).unwrap();
        let err = ledger.update_credit_status(&p.issuer, id, false).unwrap_err();
        assert_eq!(err, LedgerError::InvalidStatusTransition { active: false });
    }

    #[test]
    fn test_update_status_missing_record() {
        let (ledger, p) = bootstrapped();
        let err = ledger
            .update_credit_status(&p.issuer, RecordId(99), false)
            .unwrap_err();
        assert_eq!(err, LedgerError::RecordNotFound(RecordId(99)));
    }

    #[test]
    fn test_status_does_not_affect_accounting() {
        let (ledger, p) = bootstrapped();
        let id = ledger
            .issue_credit(&p.issuer, &valid_request(p.professional))
            .unwrap();

        ledger.update_credit_status(&p.issuer, id, false).unwrap();
        assert_eq!(ledger.get_total_credits(&p.professional), 10);
    }

    #[test]
    fn test_burn_holder_only() {
        let (ledger, p) = bootstrapped();
        let id = ledger
            .issue_credit(&p.issuer, &valid_request(p.professional))
            .unwrap();

        let err = ledger.burn_credit(&p.issuer, id).unwrap_err();
        assert_eq!(err, LedgerError::NotAuthorized);

        ledger.burn_credit(&p.professional, id).unwrap();
        assert!(ledger.get_record(id).is_none());
        assert_eq!(ledger.get_total_credits(&p.professional), 0);
        assert!(!ledger.verify_signature(id, &[0u8; 65]));
    }

    #[test]
    fn test_burned_id_never_reused() {
        let (ledger, p) = bootstrapped();
        let id1 = ledger
            .issue_credit(&p.issuer, &valid_request(p.professional))
            .unwrap();
        ledger.burn_credit(&p.professional, id1).unwrap();

        let id2 = ledger
            .issue_credit(&p.issuer, &valid_request(p.professional))
            .unwrap();
        assert_eq!(id2, RecordId(2));
    }

    #[test]
    fn test_transfer_moves_accounting() {
        let (ledger, p) = bootstrapped();
        let recipient = Principal::derive("recipient");
        let id = ledger
            .issue_credit(&p.issuer, &valid_request(p.professional))
            .unwrap();

        ledger
            .transfer_credit(&p.professional, id, &recipient)
            .unwrap();

        assert_eq!(ledger.get_total_credits(&p.professional), 0);
        assert_eq!(ledger.get_total_credits(&recipient), 10);
        assert_eq!(ledger.get_record(id).unwrap().holder, recipient);
        assert!(ledger.get_holder_account(&recipient).unwrap().holds(id));
        assert!(!ledger
            .get_holder_account(&p.professional)
            .unwrap()
            .holds(id));
    }

    #[test]
    fn test_transfer_non_holder_rejected() {
        let (ledger, p) = bootstrapped();
        let recipient = Principal::derive("recipient");
        let id = ledger
            .issue_credit(&p.issuer, &valid_request(p.professional))
            .unwrap();

        let err = ledger.transfer_credit(&p.issuer, id, &recipient).unwrap_err();
        assert_eq!(err, LedgerError::NotAuthorized);
    }

    #[test]
    fn test_transfer_keeps_issuer_for_status_control() {
        let (ledger, p) = bootstrapped();
        let recipient = Principal::derive("recipient");
        let id = ledger
            .issue_credit(&p.issuer, &valid_request(p.professional))
            .unwrap();
        ledger
            .transfer_credit(&p.professional, id, &recipient)
            .unwrap();

        // Issuer still controls status after transfer.
        ledger.update_credit_status(&p.issuer, id, false).unwrap();
        // New holder, not the old one, may burn.
        assert_eq!(
            ledger.burn_credit(&p.professional, id).unwrap_err(),
            LedgerError::NotAuthorized
        );
        ledger.burn_credit(&recipient, id).unwrap();
    }

    #[test]
    fn test_self_transfer_is_noop() {
        let (ledger, p) = bootstrapped();
        let id = ledger
            .issue_credit(&p.issuer, &valid_request(p.professional))
            .unwrap();

        ledger
            .transfer_credit(&p.professional, id, &p.professional)
            .unwrap();
        assert_eq!(ledger.get_total_credits(&p.professional), 10);
        assert!(ledger
            .get_holder_account(&p.professional)
            .unwrap()
            .holds(id));
    }

    #[test]
    fn test_signature_verification() {
        let (ledger, p) = bootstrapped();
        let mut req = valid_request(p.professional);
        req.signature = vec![0x5a; 65];
        let id = ledger.issue_credit(&p.issuer, &req).unwrap();

        assert!(ledger.verify_signature(id, &[0x5a; 65]));
        assert!(!ledger.verify_signature(id, &[0x5b; 65]));
        assert!(!ledger.verify_signature(RecordId(99), &[0x5a; 65]));
    }

    #[test]
    fn test_revoked_issuer_cannot_issue() {
        let (ledger, p) = bootstrapped();
        ledger.revoke_issuer(&p.authority, &p.issuer).unwrap();

        let err = ledger
            .issue_credit(&p.issuer, &valid_request(p.professional))
            .unwrap_err();
        assert_eq!(err, LedgerError::IssuerNotVerified);
    }

    #[test]
    fn test_snapshot_restores() {
        let (ledger, p) = bootstrapped();
        ledger
            .issue_credit(&p.issuer, &valid_request(p.professional))
            .unwrap();
        let snapshot = ledger.snapshot();

        let resumed = Ledger::with_state(
            snapshot,
            RecordingSettlement::new(),
            ManualClock::new(),
        );
        assert_eq!(resumed.get_total_credits(&p.professional), 10);
        assert_eq!(resumed.get_last_token_id(), RecordId(1));
        assert!(resumed.snapshot().is_consistent());
    }

    #[test]
    fn test_ledger_usable_after_rejection() {
        let (ledger, p) = bootstrapped();

        let mut bad = valid_request(p.professional);
        bad.category = "nonsense".to_string();
        assert!(ledger.issue_credit(&p.issuer, &bad).is_err());

        // The rejected call must not poison anything.
        let id = ledger
            .issue_credit(&p.issuer, &valid_request(p.professional))
            .unwrap();
        assert_eq!(id, RecordId(1));
    }
}
