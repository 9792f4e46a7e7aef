use std::path::{Path, PathBuf};

use crate::errors::LedgerError;
use crate::ledger::ledger::CURRENT_SCHEMA_VERSION;
use crate::ledger::Ledger;
use crate::storage::StorageBackend;

/// Owns the ledger being worked on and the storage it came from.
pub struct LedgerManager {
    pub current: Option<Ledger>,
    current_name: Option<String>,
    current_path: Option<PathBuf>,
    storage: Box<dyn StorageBackend>,
}

impl LedgerManager {
    pub fn new(storage: Box<dyn StorageBackend>) -> Self {
        Self {
            current: None,
            current_name: None,
            current_path: None,
            storage,
        }
    }

    pub fn storage(&self) -> &dyn StorageBackend {
        self.storage.as_ref()
    }

    pub fn load(&mut self, name: &str) -> Result<(), LedgerError> {
        let ledger = self.storage.load(name)?;
        ensure_schema_support(ledger.schema_version)?;
        let path = self.storage.ledger_path(name);
        self.set_current(ledger, Some(path), Some(name.to_string()));
        self.storage.record_last_ledger(Some(name))?;
        Ok(())
    }

    pub fn load_from_path(&mut self, path: &Path) -> Result<(), LedgerError> {
        let ledger = self.storage.load_from_path(path)?;
        ensure_schema_support(ledger.schema_version)?;
        self.set_current(ledger, Some(path.to_path_buf()), None);
        Ok(())
    }

    pub fn save(&mut self) -> Result<PathBuf, LedgerError> {
        let ledger = self.current_ref()?;
        if let Some(name) = self.current_name.as_deref() {
            let path = self.storage.save(ledger, name)?;
            self.current_path = Some(path.clone());
            Ok(path)
        } else if let Some(path) = self.current_path.clone() {
            self.storage.save_to_path(ledger, &path)?;
            Ok(path)
        } else {
            Err(LedgerError::Persistence(
                "unable to determine save target for current ledger".into(),
            ))
        }
    }

    pub fn save_as(&mut self, name: &str) -> Result<PathBuf, LedgerError> {
        let path = self.storage.save(self.current_ref()?, name)?;
        self.current_name = Some(name.to_string());
        self.current_path = Some(path.clone());
        self.storage.record_last_ledger(Some(name))?;
        Ok(path)
    }

    pub fn list(&self) -> Result<Vec<String>, LedgerError> {
        self.storage.list()
    }

    pub fn last_opened(&self) -> Result<Option<String>, LedgerError> {
        self.storage.last_ledger()
    }

    pub fn current_name(&self) -> Option<&str> {
        self.current_name.as_deref()
    }

    pub fn current_path(&self) -> Option<&Path> {
        self.current_path.as_deref()
    }

    pub fn set_current(&mut self, ledger: Ledger, path: Option<PathBuf>, name: Option<String>) {
        self.current = Some(ledger);
        self.current_path = path;
        self.current_name = name;
    }

    pub fn clear(&mut self) {
        self.current = None;
        self.current_name = None;
        self.current_path = None;
    }

    pub fn current_ref(&self) -> Result<&Ledger, LedgerError> {
        self.current
            .as_ref()
            .ok_or_else(|| LedgerError::Persistence("no ledger loaded".into()))
    }

    pub fn current_mut(&mut self) -> Result<&mut Ledger, LedgerError> {
        self.current
            .as_mut()
            .ok_or_else(|| LedgerError::Persistence("no ledger loaded".into()))
    }
}

fn ensure_schema_support(schema_version: u8) -> Result<(), LedgerError> {
    if schema_version > CURRENT_SCHEMA_VERSION {
        return Err(LedgerError::Persistence(format!(
            "ledger schema v{} is newer than supported v{}",
            schema_version, CURRENT_SCHEMA_VERSION
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::JsonStorage;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn save_and_load_named_roundtrip() {
        let temp = tempdir().unwrap();
        let store = JsonStorage::new(Some(temp.path().to_path_buf())).unwrap();
        let mut manager = LedgerManager::new(Box::new(store));

        manager.set_current(Ledger::new("Demo"), None, None);
        let path = manager.save_as("demo-ledger").expect("save ledger");
        assert!(path.exists());

        manager.clear();
        manager.load("demo-ledger").expect("load ledger");
        assert_eq!(manager.current_name(), Some("demo-ledger"));
        assert!(manager.current.is_some());
        assert!(manager.current_path().is_some());
        assert_eq!(manager.last_opened().unwrap().as_deref(), Some("demo_ledger"));
    }

    #[test]
    fn save_without_ledger_fails() {
        let temp = tempdir().unwrap();
        let store = JsonStorage::new(Some(temp.path().to_path_buf())).unwrap();
        let mut manager = LedgerManager::new(Box::new(store));
        assert!(matches!(manager.save(), Err(LedgerError::Persistence(_))));
        assert!(manager.current_mut().is_err());
    }

    #[test]
    fn rejects_future_schema_versions() {
        let temp = tempdir().unwrap();
        let store = JsonStorage::new(Some(temp.path().to_path_buf())).unwrap();
        let mut manager = LedgerManager::new(Box::new(store));

        let path = temp.path().join("future.json");
        let mut ledger = Ledger::new("Future");
        ledger.schema_version = CURRENT_SCHEMA_VERSION + 5;
        fs::write(&path, serde_json::to_string(&ledger).unwrap()).unwrap();

        let err = manager
            .load_from_path(&path)
            .expect_err("load future schema should fail");
        match err {
            LedgerError::Persistence(message) => {
                assert!(message.contains("newer"), "unexpected error: {message}");
            }
            other => panic!("expected persistence error, got {other:?}"),
        }
    }
}
