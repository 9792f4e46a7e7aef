//! Builds SYSCOHADA statements from a ledger or a stored ledger.

use crate::{
    ledger::{Ledger, SnapshotScope},
    reporting::FinancialStatements,
    storage::StorageBackend,
};

use super::{ServiceError, ServiceResult};

pub struct ReportService;

impl ReportService {
    pub fn generate(ledger: &Ledger, scope: SnapshotScope) -> FinancialStatements {
        FinancialStatements::build(&ledger.snapshot(scope))
    }

    /// With `strict`, an actif/passif mismatch is an error rather than a
    /// warning.
    pub fn generate_checked(
        ledger: &Ledger,
        scope: SnapshotScope,
        strict: bool,
    ) -> ServiceResult<FinancialStatements> {
        let statements = Self::generate(ledger, scope);
        if strict && !statements.check.is_balanced() {
            return Err(ServiceError::Imbalance {
                difference: statements.check.difference(),
            });
        }
        Ok(statements)
    }

    /// Loads the named ledger first. Load failures propagate; they never
    /// degrade into an all-zero report.
    pub fn generate_from_store(
        store: &dyn StorageBackend,
        name: &str,
        scope: SnapshotScope,
        strict: bool,
    ) -> ServiceResult<FinancialStatements> {
        let ledger = store.load(name)?;
        Self::generate_checked(&ledger, scope, strict)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::services::{EntryLine, PostingService};
    use crate::errors::LedgerError;
    use crate::ledger::{provision_default_chart, ReportingPeriod};
    use crate::storage::JsonStorage;
    use chrono::NaiveDate;
    use tempfile::tempdir;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn books() -> Ledger {
        let mut ledger = Ledger::new("Cabinet");
        provision_default_chart(&mut ledger).unwrap();
        PostingService::record(
            &mut ledger,
            date(2024, 1, 2),
            "AN",
            "Apport en capital",
            &[EntryLine::debit("521", 2_000_000), EntryLine::credit("101", 2_000_000)],
        )
        .unwrap();
        PostingService::record(
            &mut ledger,
            date(2024, 6, 30),
            "VT",
            "Honoraires",
            &[EntryLine::debit("521", 800_000), EntryLine::credit("7061", 800_000)],
        )
        .unwrap();
        PostingService::record(
            &mut ledger,
            date(2025, 2, 1),
            "BQ",
            "Loyer",
            &[EntryLine::debit("622", 150_000), EntryLine::credit("521", 150_000)],
        )
        .unwrap();
        ledger
    }

    #[test]
    fn all_time_and_period_reports_differ() {
        let ledger = books();
        let all = ReportService::generate(&ledger, SnapshotScope::AllTime);
        assert_eq!(all.income_statement.resultat_net, 650_000);
        assert!(all.check.is_balanced());

        let fy = ReportingPeriod::fiscal_year(2024).unwrap();
        let period = ReportService::generate(&ledger, SnapshotScope::Period(fy));
        assert_eq!(period.income_statement.resultat_net, 800_000);
        assert_eq!(period.actif.tresorerie, 2_800_000);
        assert!(period.check.is_balanced());
    }

    #[test]
    fn strict_mode_turns_imbalance_into_error() {
        let mut ledger = books();
        PostingService::record(
            &mut ledger,
            date(2024, 12, 31),
            "OD",
            "Impot sur les benefices",
            &[EntryLine::debit("891", 100_000), EntryLine::credit("441", 100_000)],
        )
        .unwrap();

        let lenient = ReportService::generate_checked(&ledger, SnapshotScope::AllTime, false).unwrap();
        assert_eq!(lenient.check.difference(), -100_000);

        let err = ReportService::generate_checked(&ledger, SnapshotScope::AllTime, true).unwrap_err();
        assert!(matches!(err, ServiceError::Imbalance { difference: -100_000 }));
    }

    #[test]
    fn store_failures_propagate() {
        let dir = tempdir().unwrap();
        let store = JsonStorage::new(Some(dir.path().to_path_buf())).unwrap();
        let err = ReportService::generate_from_store(&store, "absent", SnapshotScope::AllTime, false)
            .unwrap_err();
        assert!(matches!(err, ServiceError::Ledger(LedgerError::Io(_))));

        store.save(&books(), "cabinet").unwrap();
        let statements =
            ReportService::generate_from_store(&store, "cabinet", SnapshotScope::AllTime, false)
                .unwrap();
        assert_eq!(statements.income_statement.chiffre_affaires, 800_000);
    }
}
