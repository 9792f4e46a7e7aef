use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{
    account::{is_valid_code, Account},
    journal::Journal,
    period::SnapshotScope,
    transaction::{LedgerEntry, Transaction, TransactionStatus},
    Amount,
};
use crate::errors::LedgerError;

pub(crate) const CURRENT_SCHEMA_VERSION: u8 = 1;

/// The books of one entity: chart of accounts, journals and transactions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ledger {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub accounts: Vec<Account>,
    #[serde(default)]
    pub journals: Vec<Journal>,
    #[serde(default)]
    pub transactions: Vec<Transaction>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default = "Ledger::schema_version_default")]
    pub schema_version: u8,
}

/// Debit and credit totals over every posted entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrialBalance {
    pub total_debit: Amount,
    pub total_credit: Amount,
}

impl TrialBalance {
    pub fn is_balanced(&self) -> bool {
        self.total_debit == self.total_credit
    }
}

/// A cached account balance that disagrees with its posted entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BalanceDrift {
    pub code: String,
    pub cached: Amount,
    pub computed: Amount,
}

impl Ledger {
    pub fn new(name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            accounts: Vec::new(),
            journals: Vec::new(),
            transactions: Vec::new(),
            created_at: now,
            updated_at: now,
            schema_version: CURRENT_SCHEMA_VERSION,
        }
    }

    pub fn add_account(&mut self, account: Account) -> Result<Uuid, LedgerError> {
        if !is_valid_code(&account.code) {
            return Err(LedgerError::InvalidAccountCode(account.code));
        }
        if self.account_by_code(&account.code).is_some() {
            return Err(LedgerError::DuplicateAccount(account.code));
        }
        let id = account.id;
        self.accounts.push(account);
        self.touch();
        Ok(id)
    }

    pub fn account(&self, id: Uuid) -> Option<&Account> {
        self.accounts.iter().find(|account| account.id == id)
    }

    pub fn account_by_code(&self, code: &str) -> Option<&Account> {
        self.accounts.iter().find(|account| account.code == code)
    }

    /// Removes an account that no transaction references, drafts included.
    pub fn remove_account(&mut self, id: Uuid) -> Result<Account, LedgerError> {
        let index = self
            .accounts
            .iter()
            .position(|account| account.id == id)
            .ok_or_else(|| LedgerError::InvalidRef(format!("account {id}")))?;
        if self.transactions.iter().any(|txn| txn.references(id)) {
            return Err(LedgerError::AccountInUse(self.accounts[index].code.clone()));
        }
        let removed = self.accounts.remove(index);
        self.touch();
        Ok(removed)
    }

    /// Adds a journal unless one with the same code already exists.
    pub fn add_journal(&mut self, journal: Journal) -> bool {
        if self.journal(&journal.code).is_some() {
            return false;
        }
        self.journals.push(journal);
        self.touch();
        true
    }

    pub fn journal(&self, code: &str) -> Option<&Journal> {
        self.journals
            .iter()
            .find(|journal| journal.code.eq_ignore_ascii_case(code))
    }

    /// Stores a transaction as a draft; nothing is posted yet.
    pub fn add_transaction(&mut self, mut transaction: Transaction) -> Result<Uuid, LedgerError> {
        if self.journal(&transaction.journal).is_none() {
            return Err(LedgerError::UnknownJournal(transaction.journal));
        }
        self.ensure_accounts_exist(&transaction.entries)?;
        transaction.status = TransactionStatus::Draft;
        transaction.posted_at = None;
        let id = transaction.id;
        self.transactions.push(transaction);
        self.touch();
        Ok(id)
    }

    /// Adds then posts a transaction. A rejected transaction leaves no trace.
    pub fn record(&mut self, transaction: Transaction) -> Result<Uuid, LedgerError> {
        transaction.validate()?;
        let id = self.add_transaction(transaction)?;
        if let Err(err) = self.post_transaction(id) {
            self.transactions.retain(|txn| txn.id != id);
            return Err(err);
        }
        Ok(id)
    }

    pub fn transaction(&self, id: Uuid) -> Option<&Transaction> {
        self.transactions.iter().find(|txn| txn.id == id)
    }

    pub fn add_entry(&mut self, transaction_id: Uuid, entry: LedgerEntry) -> Result<(), LedgerError> {
        self.ensure_accounts_exist(std::slice::from_ref(&entry))?;
        let txn = self.draft_mut(transaction_id)?;
        txn.entries.push(entry);
        self.touch();
        Ok(())
    }

    pub fn remove_draft(&mut self, transaction_id: Uuid) -> Result<Transaction, LedgerError> {
        self.draft_mut(transaction_id)?;
        let index = self
            .transactions
            .iter()
            .position(|txn| txn.id == transaction_id)
            .ok_or(LedgerError::TransactionNotFound(transaction_id))?;
        let removed = self.transactions.remove(index);
        self.touch();
        Ok(removed)
    }

    /// Validates a draft and applies its entries to the cached balances.
    ///
    /// Validation and the new balances are computed before any mutation, so
    /// a failed post (including a balance leaving the `Amount` range) leaves
    /// both the transaction and every balance untouched.
    pub fn post_transaction(&mut self, transaction_id: Uuid) -> Result<(), LedgerError> {
        let txn = self.draft_mut(transaction_id)?;
        txn.validate()?;
        let entries = txn.entries.clone();
        self.ensure_accounts_exist(&entries)?;

        let mut updated: Vec<(usize, Amount)> = Vec::with_capacity(entries.len());
        for entry in &entries {
            let Some(index) = self
                .accounts
                .iter()
                .position(|account| account.id == entry.account_id)
            else {
                continue;
            };
            let account = &self.accounts[index];
            let current = updated
                .iter()
                .rev()
                .find(|(seen, _)| *seen == index)
                .map_or(account.balance, |(_, balance)| *balance);
            let next = current
                .checked_add(account.normal_side().movement(entry.debit, entry.credit))
                .ok_or(LedgerError::AmountOverflow)?;
            updated.push((index, next));
        }
        for (index, balance) in updated {
            self.accounts[index].balance = balance;
        }

        let now = Utc::now();
        if let Some(txn) = self
            .transactions
            .iter_mut()
            .find(|txn| txn.id == transaction_id)
        {
            txn.status = TransactionStatus::Posted;
            txn.posted_at = Some(now);
            tracing::info!(
                transaction = %txn.id,
                journal = %txn.journal,
                amount = txn.total_debit(),
                "posted transaction"
            );
        }
        self.touch();
        Ok(())
    }

    pub fn posted(&self) -> impl Iterator<Item = &Transaction> {
        self.transactions.iter().filter(|txn| txn.is_posted())
    }

    pub fn trial_balance(&self) -> TrialBalance {
        self.posted().fold(
            TrialBalance {
                total_debit: 0,
                total_credit: 0,
            },
            |acc, txn| TrialBalance {
                total_debit: acc.total_debit.saturating_add(txn.total_debit()),
                total_credit: acc.total_credit.saturating_add(txn.total_credit()),
            },
        )
    }

    /// Lists accounts whose cached balance no longer matches their entries.
    pub fn verify_balances(&self) -> Vec<BalanceDrift> {
        let computed = self.balances_in(SnapshotScope::AllTime);
        self.accounts
            .iter()
            .filter_map(|account| {
                let expected = computed.get(&account.id).copied().unwrap_or(0);
                (expected != account.balance).then(|| BalanceDrift {
                    code: account.code.clone(),
                    cached: account.balance,
                    computed: expected,
                })
            })
            .collect()
    }

    pub fn recompute_balances(&mut self) {
        let computed = self.balances_in(SnapshotScope::AllTime);
        for account in &mut self.accounts {
            account.balance = computed.get(&account.id).copied().unwrap_or(0);
        }
        self.touch();
    }

    /// Account snapshot handed to the reporting core.
    ///
    /// `AllTime` returns the cached balances. `Period` recomputes every
    /// balance from the posted entries dated inside the period.
    pub fn snapshot(&self, scope: SnapshotScope) -> Vec<Account> {
        match scope {
            SnapshotScope::AllTime => self.accounts.clone(),
            SnapshotScope::Period(_) => {
                let computed = self.balances_in(scope);
                self.accounts
                    .iter()
                    .map(|account| Account {
                        balance: computed.get(&account.id).copied().unwrap_or(0),
                        ..account.clone()
                    })
                    .collect()
            }
        }
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    pub fn schema_version_default() -> u8 {
        CURRENT_SCHEMA_VERSION
    }

    fn balances_in(&self, scope: SnapshotScope) -> HashMap<Uuid, Amount> {
        let sides: HashMap<Uuid, _> = self
            .accounts
            .iter()
            .map(|account| (account.id, account.normal_side()))
            .collect();
        let mut balances = HashMap::new();
        for txn in self.posted().filter(|txn| scope.includes(txn.date)) {
            for entry in &txn.entries {
                if let Some(side) = sides.get(&entry.account_id) {
                    let balance = balances.entry(entry.account_id).or_insert(0);
                    *balance = side
                        .movement(entry.debit, entry.credit)
                        .saturating_add(*balance);
                }
            }
        }
        balances
    }

    fn ensure_accounts_exist(&self, entries: &[LedgerEntry]) -> Result<(), LedgerError> {
        match entries
            .iter()
            .find(|entry| self.account(entry.account_id).is_none())
        {
            Some(entry) => Err(LedgerError::InvalidRef(format!(
                "account {}",
                entry.account_id
            ))),
            None => Ok(()),
        }
    }

    fn draft_mut(&mut self, transaction_id: Uuid) -> Result<&mut Transaction, LedgerError> {
        let txn = self
            .transactions
            .iter_mut()
            .find(|txn| txn.id == transaction_id)
            .ok_or(LedgerError::TransactionNotFound(transaction_id))?;
        if txn.is_posted() {
            return Err(LedgerError::AlreadyPosted(transaction_id));
        }
        Ok(txn)
    }
}
