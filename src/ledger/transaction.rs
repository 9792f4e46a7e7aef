use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::Amount;
use crate::errors::LedgerError;

/// A journal entry made of balanced ledger lines.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Transaction {
    pub id: Uuid,
    pub date: NaiveDate,
    pub description: String,
    pub journal: String,
    pub status: TransactionStatus,
    #[serde(default)]
    pub entries: Vec<LedgerEntry>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub posted_at: Option<DateTime<Utc>>,
}

impl Transaction {
    pub fn new(date: NaiveDate, journal: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            date,
            description: description.into(),
            journal: journal.into(),
            status: TransactionStatus::Draft,
            entries: Vec::new(),
            posted_at: None,
        }
    }

    pub fn debit(mut self, account_id: Uuid, amount: Amount) -> Self {
        self.entries.push(LedgerEntry::debit(account_id, amount));
        self
    }

    pub fn credit(mut self, account_id: Uuid, amount: Amount) -> Self {
        self.entries.push(LedgerEntry::credit(account_id, amount));
        self
    }

    pub fn is_posted(&self) -> bool {
        matches!(self.status, TransactionStatus::Posted)
    }

    /// Saturates at `Amount::MAX`; [`Transaction::validate`] rejects
    /// transactions whose totals do not fit.
    pub fn total_debit(&self) -> Amount {
        self.entries
            .iter()
            .fold(0, |total: Amount, entry| total.saturating_add(entry.debit))
    }

    pub fn total_credit(&self) -> Amount {
        self.entries
            .iter()
            .fold(0, |total: Amount, entry| total.saturating_add(entry.credit))
    }

    fn checked_totals(&self) -> Result<(Amount, Amount), LedgerError> {
        self.entries
            .iter()
            .try_fold((0 as Amount, 0 as Amount), |(debit, credit), entry| {
                Ok((
                    debit
                        .checked_add(entry.debit)
                        .ok_or(LedgerError::AmountOverflow)?,
                    credit
                        .checked_add(entry.credit)
                        .ok_or(LedgerError::AmountOverflow)?,
                ))
            })
    }

    /// Checks the double-entry identity without touching any balance.
    pub fn validate(&self) -> Result<(), LedgerError> {
        if self
            .entries
            .iter()
            .any(|entry| entry.debit < 0 || entry.credit < 0)
        {
            return Err(LedgerError::NegativeAmount);
        }
        if self.entries.iter().all(LedgerEntry::is_zero) {
            return Err(LedgerError::NoEntries(self.id));
        }
        let (debit, credit) = self.checked_totals()?;
        if debit != credit {
            return Err(LedgerError::Unbalanced { debit, credit });
        }
        Ok(())
    }

    pub fn references(&self, account_id: Uuid) -> bool {
        self.entries
            .iter()
            .any(|entry| entry.account_id == account_id)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum TransactionStatus {
    Draft,
    Posted,
}

/// One line of a transaction against a single account.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LedgerEntry {
    pub id: Uuid,
    pub account_id: Uuid,
    #[serde(default)]
    pub debit: Amount,
    #[serde(default)]
    pub credit: Amount,
}

impl LedgerEntry {
    pub fn new(account_id: Uuid, debit: Amount, credit: Amount) -> Self {
        Self {
            id: Uuid::new_v4(),
            account_id,
            debit,
            credit,
        }
    }

    pub fn debit(account_id: Uuid, amount: Amount) -> Self {
        Self::new(account_id, amount, 0)
    }

    pub fn credit(account_id: Uuid, amount: Amount) -> Self {
        Self::new(account_id, 0, amount)
    }

    pub fn is_zero(&self) -> bool {
        self.debit == 0 && self.credit == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()
    }

    #[test]
    fn balanced_transaction_validates() {
        let txn = Transaction::new(date(), "VT", "Honoraires")
            .debit(Uuid::new_v4(), 1_000)
            .credit(Uuid::new_v4(), 1_000);
        assert!(txn.validate().is_ok());
        assert_eq!(txn.status, TransactionStatus::Draft);
    }

    #[test]
    fn unbalanced_transaction_reports_both_totals() {
        let txn = Transaction::new(date(), "VT", "Honoraires")
            .debit(Uuid::new_v4(), 1_000)
            .credit(Uuid::new_v4(), 900);
        match txn.validate() {
            Err(LedgerError::Unbalanced { debit, credit }) => {
                assert_eq!(debit, 1_000);
                assert_eq!(credit, 900);
            }
            other => panic!("expected unbalanced error, got {other:?}"),
        }
    }

    #[test]
    fn empty_or_zero_transaction_is_rejected() {
        let empty = Transaction::new(date(), "OD", "Vide");
        assert!(matches!(empty.validate(), Err(LedgerError::NoEntries(_))));

        let zeros = Transaction::new(date(), "OD", "Zero")
            .debit(Uuid::new_v4(), 0)
            .credit(Uuid::new_v4(), 0);
        assert!(matches!(zeros.validate(), Err(LedgerError::NoEntries(_))));
    }

    #[test]
    fn totals_beyond_amount_range_are_rejected() {
        let account = Uuid::new_v4();
        let txn = Transaction::new(date(), "OD", "Debits seuls")
            .debit(account, Amount::MAX)
            .debit(account, Amount::MAX)
            .debit(account, 2);
        assert!(matches!(txn.validate(), Err(LedgerError::AmountOverflow)));
        assert_eq!(txn.total_debit(), Amount::MAX);
        assert_eq!(txn.total_credit(), 0);
    }

    #[test]
    fn negative_amounts_are_rejected() {
        let txn = Transaction::new(date(), "OD", "Negatif")
            .debit(Uuid::new_v4(), -10)
            .credit(Uuid::new_v4(), -10);
        assert!(matches!(txn.validate(), Err(LedgerError::NegativeAmount)));
    }
}
