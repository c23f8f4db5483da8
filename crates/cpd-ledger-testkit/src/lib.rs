//! # CPD Ledger Testkit
//!
//! Fixtures and proptest generators for exercising the credit ledger,
//! plus the property suites (conservation, id monotonicity, cap
//! boundary, atomicity) that every change to the state machine must
//! keep green.

pub mod fixtures;
pub mod generators;

pub use fixtures::{multi_party_principals, random_principal, LedgerFixture};
pub use generators::{request_from_params, IssueParams};
