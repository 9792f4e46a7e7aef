//! Cascading SYSCOHADA income statement (compte de résultat).

use serde::{Deserialize, Serialize};

use super::{aggregator::BucketTotals, classifier::Bucket, row::Row};
use crate::ledger::{Account, Amount};

/// Net result of the income statement, required by the passif builder.
///
/// It can only be produced by [`IncomeStatement`], so a balance sheet
/// cannot be built with a net result that was never computed. The figure
/// is pre-tax: class 89 is not deducted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NetResult(Amount);

impl NetResult {
    pub fn amount(self) -> Amount {
        self.0
    }
}

/// Every stage of the cascade, in display order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncomeStatement {
    pub chiffre_affaires: Amount,
    pub achats: Amount,
    pub marge_brute: Amount,
    pub services_exterieurs: Amount,
    pub valeur_ajoutee: Amount,
    pub impots_taxes: Amount,
    pub charges_personnel: Amount,
    pub excedent_brut_exploitation: Amount,
    pub dotations: Amount,
    pub reprises: Amount,
    pub resultat_exploitation: Amount,
    pub produits_financiers: Amount,
    pub charges_financieres: Amount,
    pub resultat_financier: Amount,
    /// Net produit of result accounts outside the cascade (65, 69, 71-76, 79, 81-88).
    pub autres_produits_charges: Amount,
    pub resultat_net: Amount,
    /// Class 89, reported for information only.
    pub impot_sur_resultat: Amount,
}

impl IncomeStatement {
    pub fn compute(totals: &BucketTotals) -> Self {
        let chiffre_affaires = totals.get(Bucket::ChiffreAffaires);
        let achats = totals.get(Bucket::Achats);
        let marge_brute = chiffre_affaires.saturating_sub(achats);

        let services_exterieurs = totals.get(Bucket::ServicesExterieurs);
        let valeur_ajoutee = marge_brute.saturating_sub(services_exterieurs);

        let impots_taxes = totals.get(Bucket::ImpotsEtTaxes);
        let charges_personnel = totals.get(Bucket::ChargesPersonnel);
        let excedent_brut_exploitation = valeur_ajoutee
            .saturating_sub(impots_taxes)
            .saturating_sub(charges_personnel);

        let dotations = totals.get(Bucket::Dotations);
        let reprises = totals.get(Bucket::Reprises);
        let resultat_exploitation = excedent_brut_exploitation
            .saturating_sub(dotations)
            .saturating_add(reprises);

        let produits_financiers = totals.get(Bucket::ProduitsFinanciers);
        let charges_financieres = totals.get(Bucket::ChargesFinancieres);
        let resultat_financier = produits_financiers.saturating_sub(charges_financieres);

        let autres_produits_charges = totals.get(Bucket::AutresProduitsCharges);
        // Pre-tax: class 89 stays out of the net result.
        let resultat_net = resultat_exploitation
            .saturating_add(resultat_financier)
            .saturating_add(autres_produits_charges);

        Self {
            chiffre_affaires,
            achats,
            marge_brute,
            services_exterieurs,
            valeur_ajoutee,
            impots_taxes,
            charges_personnel,
            excedent_brut_exploitation,
            dotations,
            reprises,
            resultat_exploitation,
            produits_financiers,
            charges_financieres,
            resultat_financier,
            autres_produits_charges,
            resultat_net,
            impot_sur_resultat: totals.get(Bucket::ImpotSurResultat),
        }
    }

    pub fn from_accounts(accounts: &[Account]) -> Self {
        Self::compute(&BucketTotals::aggregate(accounts))
    }

    pub fn net_result(&self) -> NetResult {
        NetResult(self.resultat_net)
    }

    pub fn rows(&self) -> Vec<Row> {
        let mut rows = vec![
            Row::title("ACTIVITÉ D'EXPLOITATION"),
            Row::line("Chiffre d'affaires", self.chiffre_affaires).with_ref("XB"),
            Row::line("Achats consommés", self.achats),
            Row::total("Marge brute", self.marge_brute).with_ref("XA"),
            Row::line("Services extérieurs", self.services_exterieurs),
            Row::total("Valeur ajoutée", self.valeur_ajoutee).with_ref("XC"),
            Row::line("Impôts et taxes", self.impots_taxes),
            Row::line("Charges de personnel", self.charges_personnel),
            Row::total("Excédent brut d'exploitation", self.excedent_brut_exploitation)
                .with_ref("XD"),
            Row::line("Dotations aux amortissements et provisions", self.dotations),
            Row::line("Reprises", self.reprises),
            Row::total("Résultat d'exploitation", self.resultat_exploitation).with_ref("XE"),
            Row::title("ACTIVITÉ FINANCIÈRE"),
            Row::line("Produits financiers", self.produits_financiers),
            Row::line("Charges financières", self.charges_financieres),
            Row::total("Résultat financier", self.resultat_financier).with_ref("XF"),
        ];
        if self.autres_produits_charges != 0 {
            rows.push(Row::line(
                Bucket::AutresProduitsCharges.label(),
                self.autres_produits_charges,
            ));
        }
        rows.push(
            Row::total("Résultat net", self.resultat_net)
                .with_ref("XI")
                .highlighted(),
        );
        if self.impot_sur_resultat != 0 {
            rows.push(Row::line(
                "Impôt sur le résultat (non déduit)",
                self.impot_sur_resultat,
            ));
        }
        rows
    }
}

/// Income statement rows for an account snapshot.
pub fn calculate_resultat(accounts: &[Account]) -> Vec<Row> {
    IncomeStatement::from_accounts(accounts).rows()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reporting::row::row_value;

    fn scenario() -> Vec<Account> {
        vec![
            Account::with_balance("701", "Ventes", 1_000_000),
            Account::with_balance("601", "Achats", 400_000),
            Account::with_balance("661", "Salaires", 200_000),
        ]
    }

    #[test]
    fn cascade_matches_reference_scenario() {
        let statement = IncomeStatement::from_accounts(&scenario());
        assert_eq!(statement.chiffre_affaires, 1_000_000);
        assert_eq!(statement.achats, 400_000);
        assert_eq!(statement.marge_brute, 600_000);
        assert_eq!(statement.valeur_ajoutee, 600_000);
        assert_eq!(statement.excedent_brut_exploitation, 400_000);
        assert_eq!(statement.resultat_exploitation, 400_000);
        assert_eq!(statement.resultat_net, 400_000);
        assert_eq!(statement.net_result().amount(), 400_000);
    }

    #[test]
    fn rows_expose_each_stage() {
        let rows = calculate_resultat(&scenario());
        assert_eq!(row_value(&rows, "Marge brute"), Some(600_000));
        assert_eq!(row_value(&rows, "Excédent brut d'exploitation"), Some(400_000));
        let net = rows.iter().find(|row| row.label == "Résultat net").unwrap();
        assert!(net.is_total && net.highlight);
        assert_eq!(net.value, Some(400_000));
        assert!(rows.iter().all(|row| row.label != "Autres produits et charges non ventilés"));
    }

    #[test]
    fn financial_and_depreciation_lines_flow_into_net_result() {
        let accounts = vec![
            Account::with_balance("706", "Honoraires", 900),
            Account::with_balance("622", "Loyers", 100),
            Account::with_balance("631", "Frais bancaires", 20),
            Account::with_balance("641", "Patente", 30),
            Account::with_balance("681", "Dotations", 50),
            Account::with_balance("781", "Reprises", 10),
            Account::with_balance("771", "Interets recus", 15),
            Account::with_balance("671", "Interets payes", 25),
        ];
        let statement = IncomeStatement::from_accounts(&accounts);
        assert_eq!(statement.services_exterieurs, 120);
        assert_eq!(statement.excedent_brut_exploitation, 900 - 120 - 30);
        assert_eq!(statement.resultat_exploitation, 750 - 50 + 10);
        assert_eq!(statement.resultat_financier, -10);
        assert_eq!(statement.resultat_net, 700);
    }

    #[test]
    fn accounts_outside_the_cascade_get_a_visible_line() {
        let accounts = vec![
            Account::with_balance("706", "Honoraires", 500),
            Account::with_balance("658", "Charges diverses", 80),
            Account::with_balance("758", "Produits divers", 30),
        ];
        let statement = IncomeStatement::from_accounts(&accounts);
        assert_eq!(statement.autres_produits_charges, -50);
        assert_eq!(statement.resultat_net, 450);
        let rows = statement.rows();
        assert_eq!(
            row_value(&rows, "Autres produits et charges non ventilés"),
            Some(-50)
        );
    }

    #[test]
    fn income_tax_is_shown_but_not_deducted() {
        let accounts = vec![
            Account::with_balance("706", "Honoraires", 1_000),
            Account::with_balance("891", "Impot sur les benefices", 300),
        ];
        let statement = IncomeStatement::from_accounts(&accounts);
        assert_eq!(statement.resultat_net, 1_000);
        assert_eq!(statement.impot_sur_resultat, 300);
        let rows = statement.rows();
        assert_eq!(rows.last().unwrap().label, "Impôt sur le résultat (non déduit)");
    }

    #[test]
    fn net_result_serializes_as_a_plain_amount() {
        let net = IncomeStatement::from_accounts(&scenario()).net_result();
        assert_eq!(serde_json::to_string(&net).unwrap(), "400000");
    }

    #[test]
    fn extreme_totals_saturate_through_the_cascade() {
        let accounts = vec![
            Account::with_balance("701", "Ventes", Amount::MAX),
            Account::with_balance("601", "Achats", Amount::MIN),
            Account::with_balance("771", "Interets recus", Amount::MAX),
        ];
        let statement = IncomeStatement::from_accounts(&accounts);
        assert_eq!(statement.marge_brute, Amount::MAX);
        assert_eq!(statement.resultat_exploitation, Amount::MAX);
        assert_eq!(statement.resultat_net, Amount::MAX);

        let statements = crate::reporting::FinancialStatements::build(&accounts);
        assert_eq!(statements.passif.resultat_net, Amount::MAX);
        assert_eq!(statements.check.total_passif, Amount::MAX);
        assert_eq!(statements.check.difference(), -Amount::MAX);
    }
}
