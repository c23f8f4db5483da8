//! # CPD Ledger Core
//!
//! Pure primitives for the CPD credit ledger: principals, credit
//! records, holder accounts, and issue-request validation.
//!
//! This crate contains no I/O and no locking. It is pure computation
//! over the ledger's data shapes.
//!
//! ## Key Types
//!
//! - [`Principal`] - Opaque caller identity (authority, issuer, professional)
//! - [`RecordId`] - Strictly increasing credit record identifier
//! - [`CreditRecord`] - One minted unit of attested completion credit
//! - [`HolderAccount`] - Per-professional aggregate of held records
//! - [`LedgerError`] - The closed error taxonomy shared by every operation

pub mod category;
pub mod error;
pub mod record;
pub mod request;
pub mod types;
pub mod validation;

pub use category::Category;
pub use error::{LedgerError, Result};
pub use record::{CreditRecord, HolderAccount};
pub use request::IssueRequest;
pub use types::{BlockHeight, CourseHash, Principal, RecordId, SignatureBlob};
pub use validation::{
    validate_issue_fields, IssueFields, COURSE_HASH_LEN, MAX_CREDITS, MAX_DESCRIPTION_LEN,
    MAX_LOCATION_LEN, SIGNATURE_LEN,
};
