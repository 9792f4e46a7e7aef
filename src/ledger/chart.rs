//! Default SYSCOHADA chart of accounts for a service firm.

use super::{account::Account, journal::Journal, ledger::Ledger};
use crate::errors::LedgerError;

const DEFAULT_ACCOUNTS: &[(&str, &str)] = &[
    ("101", "Capital social"),
    ("111", "Réserve légale"),
    ("121", "Report à nouveau créditeur"),
    ("131", "Résultat net : bénéfice"),
    ("162", "Emprunts auprès des établissements de crédit"),
    ("196", "Provisions pour charges"),
    ("211", "Frais de développement"),
    ("213", "Logiciels"),
    ("231", "Bâtiments"),
    ("244", "Matériel et mobilier de bureau"),
    ("2441", "Matériel de bureau"),
    ("2442", "Matériel informatique"),
    ("245", "Matériel de transport"),
    ("275", "Dépôts et cautionnements versés"),
    ("2813", "Amortissements des logiciels"),
    ("2844", "Amortissements du matériel et mobilier"),
    ("2845", "Amortissements du matériel de transport"),
    ("321", "Fournitures consommables"),
    ("401", "Fournisseurs, dettes en compte"),
    ("411", "Clients"),
    ("416", "Clients douteux ou litigieux"),
    ("422", "Personnel, rémunérations dues"),
    ("431", "Sécurité sociale"),
    ("441", "État, impôt sur les bénéfices"),
    ("443", "État, TVA facturée"),
    ("445", "État, TVA récupérable"),
    ("447", "État, impôts retenus à la source"),
    ("471", "Débiteurs et créditeurs divers"),
    ("476", "Charges constatées d'avance"),
    ("491", "Dépréciations des comptes clients"),
    ("521", "Banques locales"),
    ("531", "Chèques postaux"),
    ("571", "Caisse"),
    ("585", "Virements de fonds"),
    ("601", "Achats de marchandises"),
    ("604", "Achats stockés de matières et fournitures"),
    ("605", "Autres achats"),
    ("6051", "Fournitures non stockables, eau"),
    ("6052", "Fournitures non stockables, électricité"),
    ("6055", "Fournitures de bureau"),
    ("612", "Transports sur ventes"),
    ("622", "Locations et charges locatives"),
    ("624", "Entretien, réparations et maintenance"),
    ("625", "Primes d'assurance"),
    ("626", "Études, recherches et documentation"),
    ("628", "Frais de télécommunications"),
    ("631", "Frais bancaires"),
    ("632", "Rémunérations d'intermédiaires et de conseils"),
    ("638", "Autres charges externes"),
    ("641", "Impôts et taxes directs"),
    ("646", "Droits d'enregistrement"),
    ("658", "Charges diverses"),
    ("661", "Rémunérations directes versées au personnel national"),
    ("664", "Charges sociales"),
    ("671", "Intérêts des emprunts"),
    ("681", "Dotations aux amortissements d'exploitation"),
    ("691", "Dotations aux provisions d'exploitation"),
    ("706", "Services vendus"),
    ("7061", "Honoraires"),
    ("707", "Produits accessoires"),
    ("758", "Produits divers"),
    ("771", "Intérêts de prêts"),
    ("781", "Transferts de charges d'exploitation"),
    ("791", "Reprises de provisions d'exploitation"),
    ("891", "Impôts sur les bénéfices de l'exercice"),
];

/// Seeds the default journals and chart into a ledger.
///
/// Accounts and journals that already exist are left alone, so the call
/// can be repeated. Returns the number of accounts created.
pub fn provision_default_chart(ledger: &mut Ledger) -> Result<usize, LedgerError> {
    for journal in Journal::defaults() {
        ledger.add_journal(journal);
    }
    let mut created = 0;
    for (code, name) in DEFAULT_ACCOUNTS {
        if ledger.account_by_code(code).is_some() {
            continue;
        }
        ledger.add_account(Account::new(*code, *name))?;
        created += 1;
    }
    tracing::debug!(ledger = %ledger.name, created, "provisioned default chart");
    Ok(created)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reporting::classifier::{classify, Bucket};

    #[test]
    fn provisioning_is_repeatable() {
        let mut ledger = Ledger::new("Cabinet");
        let first = provision_default_chart(&mut ledger).unwrap();
        assert_eq!(first, DEFAULT_ACCOUNTS.len());
        assert_eq!(provision_default_chart(&mut ledger).unwrap(), 0);
        assert_eq!(ledger.journals.len(), Journal::defaults().len());
    }

    #[test]
    fn default_chart_has_no_unclassified_accounts() {
        for (code, _) in DEFAULT_ACCOUNTS {
            assert_ne!(classify(code), Bucket::Unclassified, "code {code}");
        }
    }
}
