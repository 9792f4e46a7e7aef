use thiserror::Error;
use uuid::Uuid;

use crate::ledger::Amount;

/// Error type that captures ledger, posting, and persistence failures.
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("Invalid reference: {0}")]
    InvalidRef(String),
    #[error("Account code `{0}` already exists")]
    DuplicateAccount(String),
    #[error("Invalid account code `{0}`")]
    InvalidAccountCode(String),
    #[error("Account `{0}` is referenced by ledger entries and cannot be removed")]
    AccountInUse(String),
    #[error("Unknown journal `{0}`")]
    UnknownJournal(String),
    #[error("Transaction {0} not found")]
    TransactionNotFound(Uuid),
    #[error("Transaction {0} is already posted")]
    AlreadyPosted(Uuid),
    #[error("Transaction {0} has no non-zero entries")]
    NoEntries(Uuid),
    #[error("Ledger entries must carry non-negative amounts")]
    NegativeAmount,
    #[error("Transaction is unbalanced: debits ({debit}) != credits ({credit})")]
    Unbalanced { debit: Amount, credit: Amount },
    #[error("Amount exceeds the supported range")]
    AmountOverflow,
    #[error("Invalid reporting period: {0}")]
    InvalidPeriod(String),
    #[error("Persistence error: {0}")]
    Persistence(String),
}
