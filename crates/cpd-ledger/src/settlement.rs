//! The settlement collaborator.
//!
//! The ledger records that a fee transfer from issuer to authority
//! must occur; moving the value is this collaborator's job. It is
//! called synchronously after all preconditions pass and before any
//! state is written, so a refusal aborts the whole operation.

use std::sync::{Arc, Mutex};

use thiserror::Error;

use cpd_ledger_core::{LedgerError, Principal};

/// A settlement refusal.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("transfer of {amount} from {from} to {to} refused: {reason}")]
pub struct SettlementError {
    pub amount: u64,
    pub from: Principal,
    pub to: Principal,
    pub reason: String,
}

impl From<SettlementError> for LedgerError {
    fn from(err: SettlementError) -> Self {
        LedgerError::Settlement(err.to_string())
    }
}

/// Moves value between principal accounts.
pub trait Settlement: Send + Sync {
    /// Transfer `amount` from `from` to `to`, or refuse.
    fn transfer_value(
        &self,
        amount: u64,
        from: &Principal,
        to: &Principal,
    ) -> Result<(), SettlementError>;
}

/// One settled transfer, as recorded by [`RecordingSettlement`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transfer {
    pub amount: u64,
    pub from: Principal,
    pub to: Principal,
}

/// A settlement backend that accepts every transfer and logs it.
///
/// Clones share the same log, so a test can keep one clone and
/// inspect the transfers the ledger triggered.
#[derive(Debug, Clone, Default)]
pub struct RecordingSettlement {
    transfers: Arc<Mutex<Vec<Transfer>>>,
}

impl RecordingSettlement {
    /// Create an empty settlement log.
    pub fn new() -> Self {
        Self::default()
    }

    /// All transfers settled so far, in order.
    pub fn transfers(&self) -> Vec<Transfer> {
        self.transfers.lock().unwrap().clone()
    }
}

impl Settlement for RecordingSettlement {
    fn transfer_value(
        &self,
        amount: u64,
        from: &Principal,
        to: &Principal,
    ) -> Result<(), SettlementError> {
        self.transfers.lock().unwrap().push(Transfer {
            amount,
            from: *from,
            to: *to,
        });
        Ok(())
    }
}

/// A settlement backend that refuses every transfer.
#[derive(Debug, Clone, Copy, Default)]
pub struct FailingSettlement;

impl Settlement for FailingSettlement {
    fn transfer_value(
        &self,
        amount: u64,
        from: &Principal,
        to: &Principal,
    ) -> Result<(), SettlementError> {
        Err(SettlementError {
            amount,
            from: *from,
            to: *to,
            reason: "settlement backend unavailable".to_string(),
        })
    }
}
