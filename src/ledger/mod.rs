//! Double-entry ledger: accounts, journals, transactions and posting.

pub mod account;
pub mod chart;
pub mod journal;
#[allow(clippy::module_inception)]
pub mod ledger;
pub mod period;
pub mod transaction;

/// Whole currency units. FCFA has no minor unit.
pub type Amount = i64;

pub use account::{Account, NormalSide};
pub use chart::provision_default_chart;
pub use journal::Journal;
pub use ledger::{BalanceDrift, Ledger, TrialBalance};
pub use period::{ReportingPeriod, SnapshotScope};
pub use transaction::{LedgerEntry, Transaction, TransactionStatus};
