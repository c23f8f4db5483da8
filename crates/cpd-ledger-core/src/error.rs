//! The closed error taxonomy for ledger operations.
//!
//! One symbol per precondition. Every failure is reported to the
//! caller as a tagged variant; nothing unwinds across the ledger
//! boundary and no partial mutation is observable after a rejection.

use thiserror::Error;

use crate::types::{BlockHeight, Principal, RecordId};

/// Errors that can occur during ledger operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    /// Caller is not the party the operation is reserved for.
    #[error("caller is not authorized for this operation")]
    NotAuthorized,

    /// Caller is not an approved issuer.
    #[error("caller is not an approved issuer")]
    IssuerNotVerified,

    /// Issuers may not mint credits to themselves.
    #[error("professional must differ from the issuing caller")]
    InvalidProfessional,

    /// Course hash is not exactly 32 bytes.
    #[error("course hash must be 32 bytes, got {len}")]
    InvalidCourseHash { len: usize },

    /// Credit amount is outside the allowed range.
    #[error("credits {credits} outside allowed range [{min}, {max}]")]
    InvalidCredits { credits: u64, min: u64, max: u64 },

    /// Description is empty or too long.
    #[error("description must be 1..=256 bytes, got {len}")]
    InvalidDescription { len: usize },

    /// Category is not one of the known wire strings.
    #[error("unknown category: {0:?}")]
    InvalidCategory(String),

    /// Expiration does not lie in the future.
    #[error("expiration {expiration} must exceed current height {now}")]
    InvalidExpiration {
        expiration: BlockHeight,
        now: BlockHeight,
    },

    /// Location is too long.
    #[error("location must be at most 100 bytes, got {len}")]
    InvalidLocation { len: usize },

    /// Signature blob is not exactly 65 bytes.
    #[error("signature must be 65 bytes, got {len}")]
    InvalidSignature { len: usize },

    /// No governing authority has been configured yet.
    #[error("authority is not set")]
    AuthorityNotSet,

    /// Issuance would push the holder past the per-holder cap.
    #[error("holder has {held} credits, adding {requested} exceeds cap {cap}")]
    MaxCreditsExceeded {
        held: u64,
        requested: u64,
        cap: u64,
    },

    /// No record exists with the given id.
    #[error("record not found: {0}")]
    RecordNotFound(RecordId),

    /// Status update would not change the record's active flag.
    #[error("status transition is a no-op (active = {active})")]
    InvalidStatusTransition { active: bool },

    /// No holder account exists for the caller. Unreachable while the
    /// conservation invariant holds; kept as a defensive check.
    #[error("no holder account for {0}")]
    HolderAccountMissing(Principal),

    /// The authority latch has already been set.
    #[error("authority is already set")]
    AuthorityAlreadySet,

    /// Rejected issuance fee. Fees are unsigned in this
    /// implementation, so `set_issuance_fee` cannot currently produce
    /// this; the variant is kept so error codes stay stable.
    #[error("invalid issuance fee")]
    InvalidFee,

    /// Per-holder cap must be greater than zero.
    #[error("per-holder credit cap must be greater than zero")]
    InvalidCap,

    /// The settlement collaborator refused the fee transfer.
    #[error("settlement failed: {0}")]
    Settlement(String),
}

/// Result type for ledger operations.
pub type Result<T> = std::result::Result<T, LedgerError>;
