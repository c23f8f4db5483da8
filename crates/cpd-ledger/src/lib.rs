//! # CPD Ledger
//!
//! A credential-issuance ledger: a single-authority registry where
//! approved issuers mint revocable credit records attesting that a
//! professional completed a course, and professionals hold, transfer,
//! or burn those records.
//!
//! ## Key Concepts
//!
//! - **Authority**: the one governing principal. Set once, never
//!   reassigned. Controls issuer approval and global configuration.
//! - **Issuer**: a principal the authority has approved to mint.
//! - **Record**: one minted credit. Ids strictly increase and are
//!   never reused, even after a burn.
//! - **Holder account**: per-professional accounting; total credits
//!   always equal the sum over held records.
//!
//! Every mutating operation validates its full precondition sequence
//! before touching state, so a rejected call leaves the ledger exactly
//! as it found it.
//!
//! ## Usage
//!
//! ```rust
//! use cpd_ledger::{IssueRequest, Ledger, LedgerConfig, ManualClock, Principal,
//!                  RecordingSettlement};
//!
//! let clock = ManualClock::new();
//! let ledger = Ledger::new(
//!     LedgerConfig::default(),
//!     RecordingSettlement::new(),
//!     clock.clone(),
//! );
//!
//! let authority = Principal::derive("authority");
//! let issuer = Principal::derive("issuer");
//! let professional = Principal::derive("professional");
//!
//! ledger.set_authority(&authority).unwrap();
//! ledger.approve_issuer(&authority, &issuer).unwrap();
//!
//! let id = ledger
//!     .issue_credit(
//!         &issuer,
//!         &IssueRequest {
//!             professional,
//!             course_hash: vec![0u8; 32],
//!             credits: 10,
//!             description: "Professional Ethics 101".into(),
//!             category: "ethics".into(),
//!             expiration: 1000,
//!             location: "Online".into(),
//!             signature: vec![0u8; 65],
//!         },
//!     )
//!     .unwrap();
//!
//! assert_eq!(ledger.get_total_credits(&professional), 10);
//! assert!(ledger.get_record(id).is_some());
//! ```

pub mod clock;
pub mod config;
pub mod error;
pub mod ledger;
pub mod registry;
pub mod settlement;
pub mod signatures;
pub mod state;

// Re-export the core crate for convenience
pub use cpd_ledger_core as core;

pub use clock::{Clock, FixedClock, ManualClock};
pub use config::{AuthorityConfig, LedgerConfig};
pub use error::{LedgerError, Result};
pub use ledger::Ledger;
pub use registry::IssuerRegistry;
pub use settlement::{FailingSettlement, RecordingSettlement, Settlement, SettlementError, Transfer};
pub use signatures::SignatureStore;
pub use state::LedgerState;

// Re-export commonly used core types
pub use cpd_ledger_core::{
    Category, CourseHash, CreditRecord, HolderAccount, IssueRequest, Principal, RecordId,
    SignatureBlob,
};
