//! Maps SYSCOHADA account codes to the statement line they report on.

use serde::{Deserialize, Serialize};

use crate::ledger::{account::is_valid_code, Account, Amount};

/// A reporting line an account balance rolls up into.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Bucket {
    // Bilan actif
    ImmobilisationsIncorporelles,
    ImmobilisationsCorporelles,
    ImmobilisationsFinancieres,
    Stocks,
    Clients,
    AutresCreances,
    Tresorerie,

    // Bilan passif
    Capital,
    Reserves,
    AutresCapitauxPropres,
    Emprunts,
    AutresDettesFinancieres,
    Fournisseurs,
    DettesFiscales,
    AutresDettes,

    // Compte de résultat
    ChiffreAffaires,
    Achats,
    ServicesExterieurs,
    ImpotsEtTaxes,
    ChargesPersonnel,
    Dotations,
    Reprises,
    ProduitsFinanciers,
    ChargesFinancieres,
    AutresProduitsCharges,
    ImpotSurResultat,

    Unclassified,
}

/// Statement a bucket belongs to.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum StatementSide {
    Actif,
    Passif,
    Resultat,
    Unclassified,
}

/// Longest matching prefix wins, so `445` overrides `44` and `491`
/// overrides `49`. Every valid code lands in exactly one bucket.
const RULES: &[(&str, Bucket)] = &[
    ("20", Bucket::ImmobilisationsIncorporelles),
    ("21", Bucket::ImmobilisationsIncorporelles),
    ("22", Bucket::ImmobilisationsCorporelles),
    ("23", Bucket::ImmobilisationsCorporelles),
    ("24", Bucket::ImmobilisationsCorporelles),
    ("25", Bucket::ImmobilisationsCorporelles),
    ("26", Bucket::ImmobilisationsFinancieres),
    ("27", Bucket::ImmobilisationsFinancieres),
    ("28", Bucket::ImmobilisationsCorporelles),
    ("281", Bucket::ImmobilisationsIncorporelles),
    ("29", Bucket::ImmobilisationsCorporelles),
    ("291", Bucket::ImmobilisationsIncorporelles),
    ("296", Bucket::ImmobilisationsFinancieres),
    ("297", Bucket::ImmobilisationsFinancieres),
    ("3", Bucket::Stocks),
    ("40", Bucket::Fournisseurs),
    ("41", Bucket::Clients),
    ("42", Bucket::AutresDettes),
    ("43", Bucket::AutresDettes),
    ("44", Bucket::DettesFiscales),
    ("445", Bucket::AutresCreances),
    ("45", Bucket::AutresDettes),
    ("46", Bucket::AutresCreances),
    ("47", Bucket::AutresCreances),
    ("48", Bucket::AutresCreances),
    ("481", Bucket::AutresDettes),
    ("482", Bucket::AutresDettes),
    ("483", Bucket::AutresDettes),
    ("484", Bucket::AutresDettes),
    ("49", Bucket::AutresCreances),
    ("491", Bucket::Clients),
    ("5", Bucket::Tresorerie),
    ("10", Bucket::Capital),
    ("11", Bucket::Reserves),
    ("12", Bucket::Reserves),
    ("13", Bucket::AutresCapitauxPropres),
    ("14", Bucket::AutresCapitauxPropres),
    ("15", Bucket::AutresCapitauxPropres),
    ("16", Bucket::Emprunts),
    ("17", Bucket::AutresDettesFinancieres),
    ("18", Bucket::AutresDettesFinancieres),
    ("19", Bucket::AutresDettesFinancieres),
    ("6", Bucket::AutresProduitsCharges),
    ("60", Bucket::Achats),
    ("61", Bucket::ServicesExterieurs),
    ("62", Bucket::ServicesExterieurs),
    ("63", Bucket::ServicesExterieurs),
    ("64", Bucket::ImpotsEtTaxes),
    ("66", Bucket::ChargesPersonnel),
    ("67", Bucket::ChargesFinancieres),
    ("68", Bucket::Dotations),
    ("7", Bucket::AutresProduitsCharges),
    ("70", Bucket::ChiffreAffaires),
    ("77", Bucket::ProduitsFinanciers),
    ("78", Bucket::Reprises),
    ("8", Bucket::AutresProduitsCharges),
    ("89", Bucket::ImpotSurResultat),
];

/// Classifies an account code. Empty or non-numeric codes, class 9 and
/// codes too short to reach a rule are [`Bucket::Unclassified`].
pub fn classify(code: &str) -> Bucket {
    if !is_valid_code(code) {
        return Bucket::Unclassified;
    }
    RULES
        .iter()
        .filter(|(prefix, _)| code.starts_with(prefix))
        .max_by_key(|(prefix, _)| prefix.len())
        .map(|(_, bucket)| *bucket)
        .unwrap_or(Bucket::Unclassified)
}

impl Bucket {
    pub const ALL: [Bucket; 27] = [
        Bucket::ImmobilisationsIncorporelles,
        Bucket::ImmobilisationsCorporelles,
        Bucket::ImmobilisationsFinancieres,
        Bucket::Stocks,
        Bucket::Clients,
        Bucket::AutresCreances,
        Bucket::Tresorerie,
        Bucket::Capital,
        Bucket::Reserves,
        Bucket::AutresCapitauxPropres,
        Bucket::Emprunts,
        Bucket::AutresDettesFinancieres,
        Bucket::Fournisseurs,
        Bucket::DettesFiscales,
        Bucket::AutresDettes,
        Bucket::ChiffreAffaires,
        Bucket::Achats,
        Bucket::ServicesExterieurs,
        Bucket::ImpotsEtTaxes,
        Bucket::ChargesPersonnel,
        Bucket::Dotations,
        Bucket::Reprises,
        Bucket::ProduitsFinanciers,
        Bucket::ChargesFinancieres,
        Bucket::AutresProduitsCharges,
        Bucket::ImpotSurResultat,
        Bucket::Unclassified,
    ];

    pub fn side(self) -> StatementSide {
        use Bucket::*;
        match self {
            ImmobilisationsIncorporelles | ImmobilisationsCorporelles
            | ImmobilisationsFinancieres | Stocks | Clients | AutresCreances | Tresorerie => {
                StatementSide::Actif
            }
            Capital | Reserves | AutresCapitauxPropres | Emprunts | AutresDettesFinancieres
            | Fournisseurs | DettesFiscales | AutresDettes => StatementSide::Passif,
            Unclassified => StatementSide::Unclassified,
            _ => StatementSide::Resultat,
        }
    }

    /// Whether the bucket is shown credit-positive.
    fn credit_presented(self) -> bool {
        self.side() == StatementSide::Passif
            || matches!(
                self,
                Bucket::ChiffreAffaires
                    | Bucket::Reprises
                    | Bucket::ProduitsFinanciers
                    | Bucket::AutresProduitsCharges
            )
    }

    /// Contribution of an account to this bucket's displayed total.
    ///
    /// Actif and charge lines are debit-positive, passif and produit lines
    /// credit-positive. Unclassified accounts stay debit-positive; their
    /// sign decides which side of the balance sheet shows them.
    pub fn presented(self, account: &Account) -> Amount {
        let debit = account.debit_balance();
        if self.credit_presented() {
            debit.saturating_neg()
        } else {
            debit
        }
    }

    pub fn label(self) -> &'static str {
        use Bucket::*;
        match self {
            ImmobilisationsIncorporelles => "Immobilisations incorporelles",
            ImmobilisationsCorporelles => "Immobilisations corporelles",
            ImmobilisationsFinancieres => "Immobilisations financières",
            Stocks => "Stocks et encours",
            Clients => "Clients",
            AutresCreances => "Autres créances",
            Tresorerie => "Trésorerie-Actif",
            Capital => "Capital",
            Reserves => "Réserves et report à nouveau",
            AutresCapitauxPropres => "Autres capitaux propres",
            Emprunts => "Emprunts",
            AutresDettesFinancieres => "Autres dettes financières et provisions",
            Fournisseurs => "Fournisseurs",
            DettesFiscales => "Dettes fiscales",
            AutresDettes => "Autres dettes",
            ChiffreAffaires => "Chiffre d'affaires",
            Achats => "Achats",
            ServicesExterieurs => "Services extérieurs",
            ImpotsEtTaxes => "Impôts et taxes",
            ChargesPersonnel => "Charges de personnel",
            Dotations => "Dotations aux amortissements et provisions",
            Reprises => "Reprises",
            ProduitsFinanciers => "Produits financiers",
            ChargesFinancieres => "Charges financières",
            AutresProduitsCharges => "Autres produits et charges non ventilés",
            ImpotSurResultat => "Impôt sur le résultat",
            Unclassified => "Comptes non classés",
        }
    }
}

/// Coarse class-level view of the balance-sheet actif.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActifClass {
    Immobilisations,
    Stocks,
    Creances,
    Tresorerie,
}

impl ActifClass {
    /// `2` immobilisations, `3` stocks, `4` except `48`/`49` créances,
    /// `5` trésorerie. Anything else has no actif class.
    pub fn of(code: &str) -> Option<ActifClass> {
        if !is_valid_code(code) {
            return None;
        }
        match code.as_bytes()[0] {
            b'2' => Some(ActifClass::Immobilisations),
            b'3' => Some(ActifClass::Stocks),
            b'4' if !(code.starts_with("48") || code.starts_with("49")) => {
                Some(ActifClass::Creances)
            }
            b'5' => Some(ActifClass::Tresorerie),
            _ => None,
        }
    }
}
