use std::{
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use crate::{errors::LedgerError, ledger::Ledger};

const TMP_SUFFIX: &str = "tmp";

/// Writes the provided ledger to disk atomically by staging to a temporary file.
pub fn save_ledger_to_path(ledger: &Ledger, path: &Path) -> Result<(), LedgerError> {
    let json = serde_json::to_string_pretty(ledger)?;
    write_atomic(path, &json)?;
    tracing::debug!(path = %path.display(), "ledger saved");
    Ok(())
}

/// Loads a ledger snapshot from disk, returning structured errors on failure.
pub fn load_ledger_from_path(path: &Path) -> Result<Ledger, LedgerError> {
    let data = fs::read_to_string(path)?;
    let ledger: Ledger = serde_json::from_str(&data)?;
    tracing::debug!(path = %path.display(), accounts = ledger.accounts.len(), "ledger loaded");
    Ok(ledger)
}

/// Writes `data` next to `path` first, then renames it into place so a
/// crash never leaves a truncated file behind.
pub fn write_atomic(path: &Path, data: &str) -> Result<(), LedgerError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let tmp = tmp_path(path);
    let mut file = File::create(&tmp)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    fs::rename(&tmp, path)?;
    Ok(())
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn save_then_load_preserves_accounts() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("books.json");
        let mut ledger = Ledger::new("Cabinet");
        crate::ledger::provision_default_chart(&mut ledger).unwrap();

        save_ledger_to_path(&ledger, &path).unwrap();
        let loaded = load_ledger_from_path(&path).unwrap();
        assert_eq!(loaded.id, ledger.id);
        assert_eq!(loaded.accounts.len(), ledger.accounts.len());
        assert!(!tmp_path(&path).exists());
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let dir = tempdir().unwrap();
        let err = load_ledger_from_path(&dir.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, LedgerError::Io(_)));
    }

    #[test]
    fn corrupt_file_is_a_serde_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("broken.json");
        fs::write(&path, "{ not json").unwrap();
        let err = load_ledger_from_path(&path).unwrap_err();
        assert!(matches!(err, LedgerError::Serde(_)));
    }
}
