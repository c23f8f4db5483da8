//! Issue requests: the raw boundary input for minting a credit.

use crate::types::{BlockHeight, Principal};

/// The arguments an issuer submits to mint a credit record.
///
/// Fields arrive raw (variable-length byte blobs, category as a wire
/// string) and are narrowed into typed values during validation. The
/// issuing caller itself is not part of the request; it is resolved
/// separately by the caller-identity collaborator.
#[derive(Debug, Clone)]
pub struct IssueRequest {
    /// The professional receiving the credit.
    pub professional: Principal,
    /// Hash of the course artifact; must be exactly 32 bytes.
    pub course_hash: Vec<u8>,
    /// Credit amount; bounded by the ledger's min and the global max.
    pub credits: u64,
    /// Free-text description, 1..=256 bytes.
    pub description: String,
    /// Category wire string ("ethics", "technical", "management").
    pub category: String,
    /// Height after which the credit no longer counts.
    pub expiration: BlockHeight,
    /// Where the course was completed; at most 100 bytes, may be empty.
    pub location: String,
    /// Opaque signature blob; must be exactly 65 bytes.
    pub signature: Vec<u8>,
}
