use dirs::home_dir;
use serde::{Deserialize, Serialize};
use std::{
    env, fs,
    path::{Path, PathBuf},
};

use crate::{
    ledger::Ledger,
    utils::persistence::{load_ledger_from_path, save_ledger_to_path, write_atomic},
};

use super::{Result, StorageBackend};

pub const HOME_ENV: &str = "SYSCOHADA_CORE_HOME";
const DEFAULT_DIR_NAME: &str = ".syscohada_core";
const LEDGER_DIR: &str = "ledgers";
const STATE_FILE: &str = "state.json";
const LEDGER_EXTENSION: &str = "json";

/// Ledger files stored as pretty JSON under `<root>/ledgers/`.
#[derive(Debug, Clone)]
pub struct JsonStorage {
    root: PathBuf,
    ledgers_dir: PathBuf,
    state_file: PathBuf,
}

impl JsonStorage {
    /// Uses `root` when given, else `$SYSCOHADA_CORE_HOME`, else
    /// `~/.syscohada_core`.
    pub fn new(root: Option<PathBuf>) -> Result<Self> {
        let root = root.unwrap_or_else(default_root);
        let ledgers_dir = root.join(LEDGER_DIR);
        fs::create_dir_all(&ledgers_dir)?;
        let state_file = root.join(STATE_FILE);
        Ok(Self {
            root,
            ledgers_dir,
            state_file,
        })
    }

    pub fn base_dir(&self) -> &Path {
        &self.root
    }

    fn read_state(&self) -> Result<StoreState> {
        if self.state_file.exists() {
            let data = fs::read_to_string(&self.state_file)?;
            Ok(serde_json::from_str(&data)?)
        } else {
            Ok(StoreState::default())
        }
    }
}

impl StorageBackend for JsonStorage {
    fn save(&self, ledger: &Ledger, name: &str) -> Result<PathBuf> {
        let path = self.ledger_path(name);
        save_ledger_to_path(ledger, &path)?;
        Ok(path)
    }

    fn load(&self, name: &str) -> Result<Ledger> {
        load_ledger_from_path(&self.ledger_path(name))
    }

    fn list(&self) -> Result<Vec<String>> {
        let mut names = Vec::new();
        for entry in fs::read_dir(&self.ledgers_dir)? {
            let path = entry?.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some(LEDGER_EXTENSION) {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|stem| stem.to_str()) {
                names.push(stem.to_string());
            }
        }
        names.sort();
        Ok(names)
    }

    fn ledger_path(&self, name: &str) -> PathBuf {
        self.ledgers_dir
            .join(format!("{}.{}", canonical_name(name), LEDGER_EXTENSION))
    }

    fn last_ledger(&self) -> Result<Option<String>> {
        Ok(self.read_state()?.last_ledger)
    }

    fn record_last_ledger(&self, name: Option<&str>) -> Result<()> {
        let mut state = self.read_state()?;
        state.last_ledger = name.map(canonical_name);
        let data = serde_json::to_string_pretty(&state)?;
        write_atomic(&self.state_file, &data)
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct StoreState {
    last_ledger: Option<String>,
}

fn default_root() -> PathBuf {
    if let Some(custom) = env::var_os(HOME_ENV) {
        return PathBuf::from(custom);
    }
    home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(DEFAULT_DIR_NAME)
}

/// File-system safe slug of a ledger name.
pub fn canonical_name(name: &str) -> String {
    let sanitized: String = name
        .trim()
        .to_lowercase()
        .chars()
        .map(|c| match c {
            'a'..='z' | '0'..='9' => c,
            _ => '_',
        })
        .collect();
    if sanitized.trim_matches('_').is_empty() {
        "ledger".into()
    } else {
        sanitized
    }
}
