//! SYSCOHADA financial statements computed from an account snapshot.
//!
//! Everything here is pure: builders take `&[Account]` and return rows
//! without touching storage.

pub mod aggregator;
pub mod balance_sheet;
pub mod classifier;
pub mod income_statement;
pub mod row;
pub mod statements;
pub mod warning;

pub use aggregator::{signed_sum_by_prefix, sum_by_prefix, BucketTotals};
pub use balance_sheet::{
    calculate_bilan_actif, calculate_bilan_passif, BalanceCheck, BilanActif, BilanPassif,
};
pub use classifier::{classify, ActifClass, Bucket, StatementSide};
pub use income_statement::{calculate_resultat, IncomeStatement, NetResult};
pub use row::{row_value, Row};
pub use statements::FinancialStatements;
pub use warning::ReportWarning;
