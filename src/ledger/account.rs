use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::Amount;

/// A ledger account of the SYSCOHADA chart.
///
/// `balance` is carried positive on the account's normal side: a
/// debit-normal account with more debits than credits has a positive
/// balance, and so does a credit-normal account with more credits than
/// debits. Use [`Account::debit_balance`] for the raw debit-minus-credit
/// figure.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Account {
    pub id: Uuid,
    pub code: String,
    pub name: String,
    #[serde(default)]
    pub balance: Amount,
}

impl Account {
    /// Creates a new account with a zero balance.
    pub fn new(code: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            code: code.into(),
            name: name.into(),
            balance: 0,
        }
    }

    /// Builds an account snapshot with an already known balance.
    pub fn with_balance(code: impl Into<String>, name: impl Into<String>, balance: Amount) -> Self {
        Self {
            balance,
            ..Self::new(code, name)
        }
    }

    pub fn normal_side(&self) -> NormalSide {
        NormalSide::of(&self.code)
    }

    /// Balance expressed as debit minus credit.
    pub fn debit_balance(&self) -> Amount {
        self.normal_side().to_debit_positive(self.balance)
    }

    /// SYSCOHADA class digit (1 to 9), if the code starts with one.
    pub fn class(&self) -> Option<u8> {
        account_class(&self.code)
    }
}

/// Returns the leading class digit of an account code.
pub fn account_class(code: &str) -> Option<u8> {
    code.chars()
        .next()
        .and_then(|ch| ch.to_digit(10))
        .filter(|digit| *digit > 0)
        .map(|digit| digit as u8)
}

/// Checks that a code is a non-empty run of ASCII digits.
pub fn is_valid_code(code: &str) -> bool {
    !code.is_empty() && code.chars().all(|ch| ch.is_ascii_digit())
}

/// The side on which an account normally carries its balance.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum NormalSide {
    Debit,
    Credit,
}

impl NormalSide {
    /// Normal side for a SYSCOHADA account code.
    ///
    /// Contra-accounts (28, 29, 39, 49, 59) are credit-normal. In class 4,
    /// suppliers, staff, social bodies, the State and international bodies
    /// (40, 42-45) and investment suppliers (481-484) are credit-normal,
    /// except recoverable VAT (445) which is a receivable on the State.
    /// In class 8, even sub-classes are HAO income. Codes outside classes
    /// 1-8 default to debit.
    pub fn of(code: &str) -> Self {
        const CREDIT_PREFIXES: &[&str] = &[
            "1", "28", "29", "39", "40", "42", "43", "44", "45", "481", "482", "483", "484",
            "49", "59", "7", "82", "84", "86", "88",
        ];
        const DEBIT_EXCEPTIONS: &[&str] = &["445"];
        if DEBIT_EXCEPTIONS.iter().any(|prefix| code.starts_with(prefix)) {
            NormalSide::Debit
        } else if CREDIT_PREFIXES.iter().any(|prefix| code.starts_with(prefix)) {
            NormalSide::Credit
        } else {
            NormalSide::Debit
        }
    }

    /// Converts a normal-side balance to a debit-minus-credit figure.
    pub fn to_debit_positive(self, balance: Amount) -> Amount {
        match self {
            NormalSide::Debit => balance,
            NormalSide::Credit => balance.saturating_neg(),
        }
    }

    /// Balance movement produced by one debit/credit pair.
    pub fn movement(self, debit: Amount, credit: Amount) -> Amount {
        match self {
            NormalSide::Debit => debit - credit,
            NormalSide::Credit => credit - debit,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normal_side_follows_class_conventions() {
        assert_eq!(NormalSide::of("101"), NormalSide::Credit);
        assert_eq!(NormalSide::of("2411"), NormalSide::Debit);
        assert_eq!(NormalSide::of("2845"), NormalSide::Credit);
        assert_eq!(NormalSide::of("401"), NormalSide::Credit);
        assert_eq!(NormalSide::of("411"), NormalSide::Debit);
        assert_eq!(NormalSide::of("4411"), NormalSide::Credit);
        assert_eq!(NormalSide::of("4452"), NormalSide::Debit);
        assert_eq!(NormalSide::of("471"), NormalSide::Debit);
        assert_eq!(NormalSide::of("4812"), NormalSide::Credit);
        assert_eq!(NormalSide::of("485"), NormalSide::Debit);
        assert_eq!(NormalSide::of("521"), NormalSide::Debit);
        assert_eq!(NormalSide::of("601"), NormalSide::Debit);
        assert_eq!(NormalSide::of("706"), NormalSide::Credit);
        assert_eq!(NormalSide::of("821"), NormalSide::Credit);
        assert_eq!(NormalSide::of("891"), NormalSide::Debit);
    }

    #[test]
    fn debit_balance_flips_credit_normal_accounts() {
        let capital = Account::with_balance("101", "Capital social", 500);
        assert_eq!(capital.debit_balance(), -500);
        let bank = Account::with_balance("521", "Banque", 500);
        assert_eq!(bank.debit_balance(), 500);
    }

    #[test]
    fn class_ignores_malformed_codes() {
        assert_eq!(account_class("706"), Some(7));
        assert_eq!(account_class(""), None);
        assert_eq!(account_class("0100"), None);
        assert_eq!(account_class("X12"), None);
        assert!(is_valid_code("4011"));
        assert!(!is_valid_code("40A"));
        assert!(!is_valid_code(""));
    }
}
