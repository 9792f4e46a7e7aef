use chrono::NaiveDate;
use syscohada_core::{
    core::services::{EntryLine, PostingService},
    init,
    ledger::{provision_default_chart, Ledger, SnapshotScope},
    reporting::FinancialStatements,
};

#[test]
fn ledger_statements_smoke() {
    init();

    let mut ledger = Ledger::new("SmokeTest");
    let created = provision_default_chart(&mut ledger).unwrap();
    assert!(created > 0);

    PostingService::record(
        &mut ledger,
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        "VT",
        "Honoraires",
        &[
            EntryLine::debit("521", 250_000),
            EntryLine::credit("7061", 250_000),
        ],
    )
    .unwrap();

    let statements = FinancialStatements::build(&ledger.snapshot(SnapshotScope::AllTime));
    assert_eq!(statements.income_statement.resultat_net, 250_000);
    assert!(statements.check.is_balanced());
    assert!(ledger.trial_balance().is_balanced());
}
