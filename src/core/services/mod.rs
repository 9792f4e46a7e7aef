pub mod account_service;
pub mod posting_service;
pub mod report_service;

pub use account_service::AccountService;
pub use posting_service::{EntryLine, PostingService};
pub use report_service::ReportService;

use crate::errors::LedgerError;
use crate::ledger::Amount;

pub type ServiceResult<T> = Result<T, ServiceError>;

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error(transparent)]
    Ledger(#[from] LedgerError),
    #[error("{0}")]
    Invalid(String),
    #[error("Balance sheet does not balance: actif - passif = {difference}")]
    Imbalance { difference: Amount },
}
