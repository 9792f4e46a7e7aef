use uuid::Uuid;

use crate::ledger::{Account, Ledger};

use super::{ServiceError, ServiceResult};

pub struct AccountService;

impl AccountService {
    pub fn add(ledger: &mut Ledger, code: &str, name: &str) -> ServiceResult<Uuid> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ServiceError::Invalid("Account name cannot be empty".into()));
        }
        Ok(ledger.add_account(Account::new(code.trim(), name))?)
    }

    pub fn remove(ledger: &mut Ledger, code: &str) -> ServiceResult<Account> {
        let id = Self::id_for(ledger, code)?;
        Ok(ledger.remove_account(id)?)
    }

    /// Accounts sorted by code, optionally restricted to a prefix.
    pub fn list<'a>(ledger: &'a Ledger, prefix: Option<&str>) -> Vec<&'a Account> {
        let mut accounts: Vec<&Account> = ledger
            .accounts
            .iter()
            .filter(|account| prefix.map_or(true, |p| account.code.starts_with(p)))
            .collect();
        accounts.sort_by(|a, b| a.code.cmp(&b.code));
        accounts
    }

    pub fn id_for(ledger: &Ledger, code: &str) -> ServiceResult<Uuid> {
        ledger
            .account_by_code(code.trim())
            .map(|account| account.id)
            .ok_or_else(|| ServiceError::Invalid(format!("Unknown account code `{}`", code.trim())))
    }
}
