//! Journal entry workflow keyed by account codes.

use chrono::NaiveDate;
use uuid::Uuid;

use crate::ledger::{Amount, Ledger, LedgerEntry, Transaction};

use super::{AccountService, ServiceError, ServiceResult};

/// One line of a journal entry, addressed by account code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryLine {
    pub code: String,
    pub debit: Amount,
    pub credit: Amount,
}

impl EntryLine {
    pub fn debit(code: impl Into<String>, amount: Amount) -> Self {
        Self {
            code: code.into(),
            debit: amount,
            credit: 0,
        }
    }

    pub fn credit(code: impl Into<String>, amount: Amount) -> Self {
        Self {
            code: code.into(),
            debit: 0,
            credit: amount,
        }
    }
}

pub struct PostingService;

impl PostingService {
    /// Opens an empty draft in `journal`.
    pub fn open(
        ledger: &mut Ledger,
        date: NaiveDate,
        journal: &str,
        description: &str,
    ) -> ServiceResult<Uuid> {
        let description = description.trim();
        if description.is_empty() {
            return Err(ServiceError::Invalid(
                "Entry description cannot be empty".into(),
            ));
        }
        Ok(ledger.add_transaction(Transaction::new(date, journal, description))?)
    }

    pub fn add_line(ledger: &mut Ledger, transaction_id: Uuid, line: &EntryLine) -> ServiceResult<()> {
        let account_id = AccountService::id_for(ledger, &line.code)?;
        ledger.add_entry(
            transaction_id,
            LedgerEntry::new(account_id, line.debit, line.credit),
        )?;
        Ok(())
    }

    pub fn post(ledger: &mut Ledger, transaction_id: Uuid) -> ServiceResult<()> {
        Ok(ledger.post_transaction(transaction_id)?)
    }

    /// Builds and posts a complete entry. Nothing is stored when any line or
    /// the balance check fails.
    pub fn record(
        ledger: &mut Ledger,
        date: NaiveDate,
        journal: &str,
        description: &str,
        lines: &[EntryLine],
    ) -> ServiceResult<Uuid> {
        let mut transaction = Transaction::new(date, journal, description.trim());
        for line in lines {
            let account_id = AccountService::id_for(ledger, &line.code)?;
            transaction
                .entries
                .push(LedgerEntry::new(account_id, line.debit, line.credit));
        }
        Ok(ledger.record(transaction)?)
    }

    /// Drafts awaiting posting, oldest first.
    pub fn drafts(ledger: &Ledger) -> Vec<&Transaction> {
        let mut drafts: Vec<&Transaction> = ledger
            .transactions
            .iter()
            .filter(|txn| !txn.is_posted())
            .collect();
        drafts.sort_by_key(|txn| txn.date);
        drafts
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::LedgerError;
    use crate::ledger::provision_default_chart;

    fn ledger() -> Ledger {
        let mut ledger = Ledger::new("Cabinet");
        provision_default_chart(&mut ledger).unwrap();
        ledger
    }

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 15).unwrap()
    }

    #[test]
    fn draft_workflow_updates_balances_on_post() {
        let mut ledger = ledger();
        let id = PostingService::open(&mut ledger, date(), "VT", "Honoraires mars").unwrap();
        PostingService::add_line(&mut ledger, id, &EntryLine::debit("411", 500_000)).unwrap();
        PostingService::add_line(&mut ledger, id, &EntryLine::credit("7061", 500_000)).unwrap();
        assert_eq!(PostingService::drafts(&ledger).len(), 1);

        PostingService::post(&mut ledger, id).unwrap();
        assert_eq!(ledger.account_by_code("411").unwrap().balance, 500_000);
        assert_eq!(ledger.account_by_code("7061").unwrap().balance, 500_000);
        assert!(PostingService::drafts(&ledger).is_empty());
    }

    #[test]
    fn unbalanced_record_leaves_no_trace() {
        let mut ledger = ledger();
        let err = PostingService::record(
            &mut ledger,
            date(),
            "BQ",
            "Virement",
            &[EntryLine::debit("521", 100), EntryLine::credit("411", 90)],
        )
        .unwrap_err();
        assert!(matches!(
            err,
            ServiceError::Ledger(LedgerError::Unbalanced {
                debit: 100,
                credit: 90
            })
        ));
        assert!(ledger.transactions.is_empty());
        assert_eq!(ledger.account_by_code("521").unwrap().balance, 0);
    }

    #[test]
    fn unknown_codes_and_blank_descriptions_are_rejected() {
        let mut ledger = ledger();
        assert!(matches!(
            PostingService::open(&mut ledger, date(), "OD", " "),
            Err(ServiceError::Invalid(_))
        ));
        let id = PostingService::open(&mut ledger, date(), "OD", "Regularisation").unwrap();
        assert!(matches!(
            PostingService::add_line(&mut ledger, id, &EntryLine::debit("9999", 10)),
            Err(ServiceError::Invalid(_))
        ));
    }
}
