//! SYSCOHADA balance sheet (bilan actif / passif).

use serde::{Deserialize, Serialize};

use super::{aggregator::BucketTotals, classifier::Bucket, income_statement::NetResult, row::Row};
use crate::ledger::{Account, Amount};

const UNCLASSIFIED_LABEL: &str = "Comptes non classés";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BilanActif {
    pub incorporelles: Amount,
    pub corporelles: Amount,
    pub financieres: Amount,
    pub total_immobilise: Amount,
    pub stocks: Amount,
    pub clients: Amount,
    pub autres_creances: Amount,
    pub total_circulant: Amount,
    pub tresorerie: Amount,
    pub total_tresorerie: Amount,
    pub non_classes: Amount,
    pub total: Amount,
}

fn saturating_total(amounts: &[Amount]) -> Amount {
    amounts
        .iter()
        .fold(0, |total: Amount, amount| total.saturating_add(*amount))
}

impl BilanActif {
    pub fn compute(totals: &BucketTotals) -> Self {
        let incorporelles = totals.get(Bucket::ImmobilisationsIncorporelles);
        let corporelles = totals.get(Bucket::ImmobilisationsCorporelles);
        let financieres = totals.get(Bucket::ImmobilisationsFinancieres);
        let total_immobilise = saturating_total(&[incorporelles, corporelles, financieres]);

        let stocks = totals.get(Bucket::Stocks);
        let clients = totals.get(Bucket::Clients);
        let autres_creances = totals.get(Bucket::AutresCreances);
        let total_circulant = saturating_total(&[stocks, clients, autres_creances]);

        let tresorerie = totals.get(Bucket::Tresorerie);
        let total_tresorerie = tresorerie;

        let non_classes = totals.unclassified_debit();
        Self {
            incorporelles,
            corporelles,
            financieres,
            total_immobilise,
            stocks,
            clients,
            autres_creances,
            total_circulant,
            tresorerie,
            total_tresorerie,
            non_classes,
            total: saturating_total(&[total_immobilise, total_circulant, total_tresorerie, non_classes]),
        }
    }

    pub fn rows(&self) -> Vec<Row> {
        let mut rows = vec![
            Row::title("ACTIF IMMOBILISÉ"),
            Row::line(Bucket::ImmobilisationsIncorporelles.label(), self.incorporelles)
                .with_ref("AD"),
            Row::line(Bucket::ImmobilisationsCorporelles.label(), self.corporelles)
                .with_ref("AI"),
            Row::line(Bucket::ImmobilisationsFinancieres.label(), self.financieres)
                .with_ref("AQ"),
            Row::total("Total actif immobilisé", self.total_immobilise).with_ref("AZ"),
            Row::title("ACTIF CIRCULANT"),
            Row::line(Bucket::Stocks.label(), self.stocks).with_ref("BB"),
            Row::line(Bucket::Clients.label(), self.clients).with_ref("BI"),
            Row::line(Bucket::AutresCreances.label(), self.autres_creances).with_ref("BJ"),
            Row::total("Total actif circulant", self.total_circulant).with_ref("BK"),
            Row::title("TRÉSORERIE-ACTIF"),
            Row::line(Bucket::Tresorerie.label(), self.tresorerie).with_ref("BS"),
            Row::total("Total trésorerie-actif", self.total_tresorerie).with_ref("BT"),
        ];
        if self.non_classes != 0 {
            rows.push(Row::line(UNCLASSIFIED_LABEL, self.non_classes));
        }
        rows.push(
            Row::total("Total Actif", self.total)
                .with_ref("BZ")
                .highlighted(),
        );
        rows
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BilanPassif {
    pub capital: Amount,
    pub reserves: Amount,
    pub autres_capitaux: Amount,
    pub resultat_net: Amount,
    pub total_capitaux: Amount,
    pub emprunts: Amount,
    pub autres_dettes_financieres: Amount,
    pub total_dettes_financieres: Amount,
    pub fournisseurs: Amount,
    pub dettes_fiscales: Amount,
    pub autres_dettes: Amount,
    pub total_passif_circulant: Amount,
    pub non_classes: Amount,
    pub total: Amount,
}

impl BilanPassif {
    /// The net result is taken as given, never recomputed here.
    pub fn compute(totals: &BucketTotals, net_result: NetResult) -> Self {
        let capital = totals.get(Bucket::Capital);
        let reserves = totals.get(Bucket::Reserves);
        let autres_capitaux = totals.get(Bucket::AutresCapitauxPropres);
        let resultat_net = net_result.amount();
        let total_capitaux = saturating_total(&[capital, reserves, autres_capitaux, resultat_net]);

        let emprunts = totals.get(Bucket::Emprunts);
        let autres_dettes_financieres = totals.get(Bucket::AutresDettesFinancieres);
        let total_dettes_financieres = emprunts.saturating_add(autres_dettes_financieres);

        let fournisseurs = totals.get(Bucket::Fournisseurs);
        let dettes_fiscales = totals.get(Bucket::DettesFiscales);
        let autres_dettes = totals.get(Bucket::AutresDettes);
        let total_passif_circulant = saturating_total(&[fournisseurs, dettes_fiscales, autres_dettes]);

        let non_classes = totals.unclassified_credit();
        Self {
            capital,
            reserves,
            autres_capitaux,
            resultat_net,
            total_capitaux,
            emprunts,
            autres_dettes_financieres,
            total_dettes_financieres,
            fournisseurs,
            dettes_fiscales,
            autres_dettes,
            total_passif_circulant,
            non_classes,
            total: saturating_total(&[
                total_capitaux,
                total_dettes_financieres,
                total_passif_circulant,
                non_classes,
            ]),
        }
    }

    pub fn rows(&self) -> Vec<Row> {
        let mut rows = vec![
            Row::title("CAPITAUX PROPRES"),
            Row::line(Bucket::Capital.label(), self.capital).with_ref("CA"),
            Row::line(Bucket::Reserves.label(), self.reserves).with_ref("CD"),
            Row::line(Bucket::AutresCapitauxPropres.label(), self.autres_capitaux)
                .with_ref("CL"),
            Row::line("Résultat net de l'exercice", self.resultat_net).with_ref("CJ"),
            Row::total("Total capitaux propres", self.total_capitaux).with_ref("CP"),
            Row::title("DETTES FINANCIÈRES"),
            Row::line(Bucket::Emprunts.label(), self.emprunts).with_ref("DA"),
            Row::line(
                Bucket::AutresDettesFinancieres.label(),
                self.autres_dettes_financieres,
            )
            .with_ref("DC"),
            Row::total("Total dettes financières", self.total_dettes_financieres)
                .with_ref("DD"),
            Row::title("PASSIF CIRCULANT"),
            Row::line(Bucket::Fournisseurs.label(), self.fournisseurs).with_ref("DJ"),
            Row::line(Bucket::DettesFiscales.label(), self.dettes_fiscales).with_ref("DK"),
            Row::line(Bucket::AutresDettes.label(), self.autres_dettes).with_ref("DM"),
            Row::total("Total passif circulant", self.total_passif_circulant).with_ref("DP"),
        ];
        if self.non_classes != 0 {
            rows.push(Row::line(UNCLASSIFIED_LABEL, self.non_classes));
        }
        rows.push(
            Row::total("Total Passif", self.total)
                .with_ref("DZ")
                .highlighted(),
        );
        rows
    }
}

/// Outcome of comparing both sides of the balance sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalanceCheck {
    pub total_actif: Amount,
    pub total_passif: Amount,
}

impl BalanceCheck {
    pub fn new(actif: &BilanActif, passif: &BilanPassif) -> Self {
        Self {
            total_actif: actif.total,
            total_passif: passif.total,
        }
    }

    /// Actif minus passif.
    pub fn difference(&self) -> Amount {
        self.total_actif.saturating_sub(self.total_passif)
    }

    pub fn is_balanced(&self) -> bool {
        self.difference() == 0
    }
}

/// Balance sheet actif rows for an account snapshot.
pub fn calculate_bilan_actif(accounts: &[Account]) -> Vec<Row> {
    BilanActif::compute(&BucketTotals::aggregate(accounts)).rows()
}

/// Balance sheet passif rows. `net_result` must come from the income
/// statement of the same snapshot.
pub fn calculate_bilan_passif(accounts: &[Account], net_result: NetResult) -> Vec<Row> {
    BilanPassif::compute(&BucketTotals::aggregate(accounts), net_result).rows()
}
