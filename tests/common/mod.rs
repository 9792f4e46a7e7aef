#![allow(dead_code)]

use std::sync::Mutex;

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use syscohada_core::{
    config::ConfigManager,
    core::{
        services::{EntryLine, PostingService},
        LedgerManager,
    },
    ledger::{provision_default_chart, Amount, Ledger},
    storage::JsonStorage,
};
use tempfile::TempDir;

/// Holds TempDir guards so temporary folders live for the duration of the test run.
static TEST_DIRS: Lazy<Mutex<Vec<TempDir>>> = Lazy::new(|| Mutex::new(Vec::new()));

/// Creates isolated managers backed by unique directories for each test.
pub fn setup_test_env() -> (LedgerManager, ConfigManager) {
    let temp = TempDir::new().expect("create temp dir");
    let base = temp.path().to_path_buf();
    TEST_DIRS.lock().expect("lock temp dir registry").push(temp);

    let storage = JsonStorage::new(Some(base.clone())).expect("create json storage backend");
    let ledger_manager = LedgerManager::new(Box::new(storage));
    let config_manager =
        ConfigManager::with_base_dir(base).expect("create config manager for temp dir");

    (ledger_manager, config_manager)
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

/// Ledger seeded with the default journals and chart of accounts.
pub fn provisioned_ledger(name: &str) -> Ledger {
    let mut ledger = Ledger::new(name);
    provision_default_chart(&mut ledger).expect("provision default chart");
    ledger
}

pub fn post(ledger: &mut Ledger, on: NaiveDate, journal: &str, lines: &[EntryLine]) {
    PostingService::record(ledger, on, journal, "test entry", lines).expect("record entry");
}

/// A year of activity for a small law firm.
///
/// Capital 5 000 000, fees 9 000 000 of which 1 500 000 still due,
/// rent, salaries, depreciation and one loan.
pub fn law_firm_ledger() -> Ledger {
    let mut ledger = provisioned_ledger("Cabinet Ndiaye");
    let lines = |pairs: &[(&str, Amount, Amount)]| -> Vec<EntryLine> {
        pairs
            .iter()
            .map(|(code, debit, credit)| EntryLine {
                code: (*code).to_string(),
                debit: *debit,
                credit: *credit,
            })
            .collect()
    };

    post(
        &mut ledger,
        date(2024, 1, 2),
        "AN",
        &lines(&[("521", 5_000_000, 0), ("101", 0, 5_000_000)]),
    );
    post(
        &mut ledger,
        date(2024, 1, 10),
        "BQ",
        &lines(&[("521", 2_000_000, 0), ("162", 0, 2_000_000)]),
    );
    post(
        &mut ledger,
        date(2024, 2, 1),
        "AC",
        &lines(&[("2442", 3_000_000, 0), ("521", 0, 3_000_000)]),
    );
    post(
        &mut ledger,
        date(2024, 6, 30),
        "VT",
        &lines(&[("411", 9_000_000, 0), ("7061", 0, 9_000_000)]),
    );
    post(
        &mut ledger,
        date(2024, 9, 30),
        "BQ",
        &lines(&[("521", 7_500_000, 0), ("411", 0, 7_500_000)]),
    );
    post(
        &mut ledger,
        date(2024, 12, 31),
        "OD",
        &lines(&[("622", 1_800_000, 0), ("401", 0, 1_800_000)]),
    );
    post(
        &mut ledger,
        date(2024, 12, 31),
        "OD",
        &lines(&[("661", 4_000_000, 0), ("422", 0, 4_000_000)]),
    );
    post(
        &mut ledger,
        date(2024, 12, 31),
        "OD",
        &lines(&[("681", 600_000, 0), ("2844", 0, 600_000)]),
    );
    ledger
}

/// Small deterministic generator so property runs are reproducible.
pub struct Lcg(u64);

impl Lcg {
    pub fn new(seed: u64) -> Self {
        Self(seed)
    }

    pub fn next_u64(&mut self) -> u64 {
        self.0 = self
            .0
            .wrapping_mul(6_364_136_223_846_793_005)
            .wrapping_add(1_442_695_040_888_963_407);
        self.0 >> 33
    }

    pub fn below(&mut self, bound: usize) -> usize {
        (self.next_u64() % bound as u64) as usize
    }

    pub fn amount(&mut self) -> Amount {
        1 + (self.next_u64() % 5_000_000) as Amount
    }
}

/// Posts `count` random balanced entries between any two accounts of the
/// ledger except those listed in `excluded`.
pub fn post_random_entries(ledger: &mut Ledger, rng: &mut Lcg, count: usize, excluded: &[&str]) {
    let codes: Vec<String> = ledger
        .accounts
        .iter()
        .map(|account| account.code.clone())
        .filter(|code| !excluded.iter().any(|prefix| code.starts_with(prefix)))
        .collect();
    let journals = ["AC", "VT", "BQ", "CA", "OD"];
    for idx in 0..count {
        let debit = codes[rng.below(codes.len())].clone();
        let credit = codes[rng.below(codes.len())].clone();
        let amount = rng.amount();
        let on = date(2024, 1 + (idx % 12) as u32, 1 + (idx % 28) as u32);
        post(
            ledger,
            on,
            journals[rng.below(journals.len())],
            &[EntryLine::debit(debit, amount), EntryLine::credit(credit, amount)],
        );
    }
}
