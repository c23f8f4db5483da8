//! Error types for ledger operations.
//!
//! The taxonomy lives in the core crate so that validation and the
//! state machine report from the same closed set.

pub use cpd_ledger_core::error::{LedgerError, Result};
