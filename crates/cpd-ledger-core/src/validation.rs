//! Issue-request field validation.
//!
//! Checks run in a fixed order and the first failure wins; callers
//! depend on which error a multiply-invalid request reports. These are
//! the record-shape checks only. Authorization, authority presence and
//! the per-holder cap are evaluated by the ledger around them.

use crate::category::Category;
use crate::error::{LedgerError, Result};
use crate::request::IssueRequest;
use crate::types::{BlockHeight, CourseHash, SignatureBlob};

/// Required byte length of a course hash.
pub const COURSE_HASH_LEN: usize = 32;

/// Required byte length of a signature blob.
pub const SIGNATURE_LEN: usize = 65;

/// Upper bound on the credits carried by a single record.
pub const MAX_CREDITS: u64 = 1000;

/// Upper bound on description length in bytes.
pub const MAX_DESCRIPTION_LEN: usize = 256;

/// Upper bound on location length in bytes.
pub const MAX_LOCATION_LEN: usize = 100;

/// The typed values produced by a successful field validation.
#[derive(Debug, Clone)]
pub struct IssueFields {
    pub course_hash: CourseHash,
    pub category: Category,
    pub signature: SignatureBlob,
}

/// Validate the record-shape fields of an issue request.
///
/// On success, returns the narrowed course hash, category, and
/// signature blob. `min_credits` comes from the ledger configuration
/// and `now` from the clock collaborator.
pub fn validate_issue_fields(
    req: &IssueRequest,
    min_credits: u64,
    now: BlockHeight,
) -> Result<IssueFields> {
    // 1. Course hash must be exactly 32 bytes
    let course_hash: [u8; COURSE_HASH_LEN] = req
        .course_hash
        .as_slice()
        .try_into()
        .map_err(|_| LedgerError::InvalidCourseHash {
            len: req.course_hash.len(),
        })?;

    // 2. Credits within [min, MAX_CREDITS]
    if req.credits < min_credits || req.credits > MAX_CREDITS {
        return Err(LedgerError::InvalidCredits {
            credits: req.credits,
            min: min_credits,
            max: MAX_CREDITS,
        });
    }

    // 3. Description non-empty and bounded
    if req.description.is_empty() || req.description.len() > MAX_DESCRIPTION_LEN {
        return Err(LedgerError::InvalidDescription {
            len: req.description.len(),
        });
    }

    // 4. Category must parse
    let category: Category = req.category.parse()?;

    // 5. Expiration strictly in the future
    if req.expiration <= now {
        return Err(LedgerError::InvalidExpiration {
            expiration: req.expiration,
            now,
        });
    }

    // 6. Location bounded (empty allowed)
    if req.location.len() > MAX_LOCATION_LEN {
        return Err(LedgerError::InvalidLocation {
            len: req.location.len(),
        });
    }

    // 7. Signature must be exactly 65 bytes
    let signature: [u8; SIGNATURE_LEN] = req
        .signature
        .as_slice()
        .try_into()
        .map_err(|_| LedgerError::InvalidSignature {
            len: req.signature.len(),
        })?;

    Ok(IssueFields {
        course_hash: CourseHash::from_bytes(course_hash),
        category,
        signature: SignatureBlob::from_bytes(signature),
    })
}
