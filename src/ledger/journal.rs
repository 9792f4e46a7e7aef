use serde::{Deserialize, Serialize};

/// An accounting journal transactions are recorded in.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Journal {
    pub code: String,
    pub name: String,
}

impl Journal {
    pub fn new(code: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            code: code.into().to_uppercase(),
            name: name.into(),
        }
    }

    /// Journals every provisioned ledger starts with.
    pub fn defaults() -> Vec<Journal> {
        vec![
            Journal::new("AN", "À-nouveaux"),
            Journal::new("AC", "Achats"),
            Journal::new("VT", "Ventes"),
            Journal::new("BQ", "Banque"),
            Journal::new("CA", "Caisse"),
            Journal::new("OD", "Opérations diverses"),
        ]
    }
}
