pub mod json_backend;

use std::path::{Path, PathBuf};

use crate::{errors::LedgerError, ledger::Ledger};

pub type Result<T> = std::result::Result<T, LedgerError>;

/// Abstraction over persistence backends capable of storing named ledgers.
///
/// This is the data-access handle reports are built from; it is passed in
/// explicitly rather than reached through a global client.
pub trait StorageBackend: Send + Sync {
    fn save(&self, ledger: &Ledger, name: &str) -> Result<PathBuf>;
    fn load(&self, name: &str) -> Result<Ledger>;
    fn list(&self) -> Result<Vec<String>>;
    fn ledger_path(&self, name: &str) -> PathBuf;
    fn last_ledger(&self) -> Result<Option<String>>;
    fn record_last_ledger(&self, name: Option<&str>) -> Result<()>;

    fn save_to_path(&self, ledger: &Ledger, path: &Path) -> Result<()> {
        crate::utils::persistence::save_ledger_to_path(ledger, path)
    }

    fn load_from_path(&self, path: &Path) -> Result<Ledger> {
        crate::utils::persistence::load_ledger_from_path(path)
    }
}

pub use json_backend::{canonical_name, JsonStorage};
