use chrono::{Duration, NaiveDate};
use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use syscohada_core::{
    ledger::{provision_default_chart, Ledger, ReportingPeriod, SnapshotScope, Transaction},
    reporting::FinancialStatements,
    utils::persistence::{load_ledger_from_path, save_ledger_to_path},
};
use tempfile::tempdir;

const PAIRS: &[(&str, &str)] = &[
    ("411", "7061"),
    ("521", "411"),
    ("622", "401"),
    ("401", "521"),
    ("661", "422"),
    ("422", "521"),
    ("2442", "521"),
    ("681", "2844"),
    ("671", "521"),
];

fn build_sample_ledger(txn_count: usize) -> Ledger {
    let mut ledger = Ledger::new("Benchmark");
    provision_default_chart(&mut ledger).expect("provision chart");

    let start_date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
    for idx in 0..txn_count {
        let (debit, credit) = PAIRS[idx % PAIRS.len()];
        let debit = ledger.account_by_code(debit).expect("debit account").id;
        let credit = ledger.account_by_code(credit).expect("credit account").id;
        let amount = 10_000 + (idx % 100) as i64 * 1_000;
        let txn = Transaction::new(
            start_date + Duration::days((idx % 730) as i64),
            "OD",
            format!("Ecriture {idx}"),
        )
        .debit(debit, amount)
        .credit(credit, amount);
        ledger.record(txn).expect("record transaction");
    }
    ledger
}

fn bench_ledger_io(c: &mut Criterion) {
    let ledger = build_sample_ledger(black_box(10_000));
    let dir = tempdir().expect("tempdir");
    let file_path = dir.path().join("ledger.json");

    c.bench_function("ledger_save_10k", |b| {
        b.iter(|| {
            save_ledger_to_path(&ledger, &file_path).expect("save ledger");
        })
    });

    save_ledger_to_path(&ledger, &file_path).expect("seed");

    c.bench_function("ledger_load_10k", |b| {
        b.iter(|| {
            let loaded = load_ledger_from_path(&file_path).expect("load ledger");
            black_box(loaded);
        })
    });
}

fn bench_statements(c: &mut Criterion) {
    let ledger = build_sample_ledger(black_box(10_000));
    let snapshot = ledger.snapshot(SnapshotScope::AllTime);
    let fiscal_2024 =
        SnapshotScope::Period(ReportingPeriod::fiscal_year(2024).expect("fiscal year"));

    c.bench_function("statements_all_time", |b| {
        b.iter(|| black_box(FinancialStatements::build(&snapshot)))
    });

    c.bench_function("statements_fiscal_year_recomputed", |b| {
        b.iter(|| black_box(FinancialStatements::build(&ledger.snapshot(fiscal_2024))))
    });

    c.bench_function("verify_balances_10k", |b| {
        b.iter_batched(
            || ledger.clone(),
            |ledger_clone| black_box(ledger_clone.verify_balances()),
            BatchSize::SmallInput,
        )
    });
}

criterion_group!(benches, bench_ledger_io, bench_statements);
criterion_main!(benches);
