use crate::cli::core::{parse_scope, CommandError, CommandResult, ShellContext};
use crate::cli::output;
use crate::cli::registry::CommandEntry;
use crate::cli::table::statement_table;
use crate::core::services::ReportService;
use crate::ledger::SnapshotScope;
use crate::reporting::{signed_sum_by_prefix, sum_by_prefix, FinancialStatements, Row};

use super::subcommand;

const USAGE: &str = "report resultat|actif|passif|all [--json] [year | from to]";

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "report",
            "Print the income statement and balance sheet",
            USAGE,
            cmd_report,
        )
        .with_subcommands(&["resultat", "actif", "passif", "all"]),
        CommandEntry::new(
            "sum",
            "Sum account balances by code prefix",
            "sum <prefix> [--signed]",
            cmd_sum,
        ),
        CommandEntry::new(
            "trial-balance",
            "Compare total debits and credits of posted entries",
            "trial-balance",
            cmd_trial_balance,
        ),
    ]
}

fn cmd_report(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let (which, rest) = subcommand(args, USAGE)?;
    let json = rest.contains(&"--json");
    let period_args: Vec<&str> = rest.iter().copied().filter(|arg| *arg != "--json").collect();
    let scope = parse_scope(&period_args)?;

    let statements =
        ReportService::generate_checked(context.ledger()?, scope, context.config.strict_balance)?;

    let sections: Vec<(&str, Vec<Row>)> = match which.as_str() {
        "resultat" => vec![("Compte de résultat", statements.resultat_rows())],
        "actif" => vec![("Bilan actif", statements.actif_rows())],
        "passif" => vec![("Bilan passif", statements.passif_rows())],
        "all" => vec![
            ("Compte de résultat", statements.resultat_rows()),
            ("Bilan actif", statements.actif_rows()),
            ("Bilan passif", statements.passif_rows()),
        ],
        _ => return Err(CommandError::InvalidArguments(format!("usage: {}", USAGE))),
    };

    if json {
        let rendered = if which == "all" {
            serde_json::to_string_pretty(&statements)?
        } else {
            serde_json::to_string_pretty(&sections[0].1)?
        };
        output::raw(rendered);
        return Ok(());
    }

    print_header(context, scope);
    for (title, rows) in &sections {
        output::section(title);
        output::raw(statement_table(rows, |amount| context.format_amount(amount)).render());
    }
    print_footer(context, &statements);
    Ok(())
}

fn print_header(context: &ShellContext, scope: SnapshotScope) {
    let entity = context
        .config
        .entity_name
        .clone()
        .or_else(|| context.ledger().ok().map(|ledger| ledger.name.clone()))
        .unwrap_or_default();
    let period = match scope {
        SnapshotScope::AllTime => "toutes périodes".to_string(),
        SnapshotScope::Period(period) if period.is_fiscal_year() => {
            format!("exercice {}", period.start.format("%Y"))
        }
        SnapshotScope::Period(period) => format!("du {} au {}", period.start, period.end),
    };
    output::info(format!(
        "{} ({}), montants en {}",
        entity,
        period,
        crate::currency::symbol_for(context.config.currency_code().as_str())
    ));
}

fn print_footer(context: &ShellContext, statements: &FinancialStatements) {
    for warning in &statements.warnings {
        output::warning(warning);
    }
    if statements.check.is_balanced() {
        output::success(format!(
            "Bilan équilibré: {}.",
            context.format_money(statements.check.total_actif)
        ));
    }
}

fn cmd_sum(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let signed = args.contains(&"--signed");
    let prefix = args
        .iter()
        .find(|arg| **arg != "--signed")
        .ok_or_else(|| CommandError::InvalidArguments("usage: sum <prefix> [--signed]".into()))?;
    let accounts = &context.ledger()?.accounts;
    let total = if signed {
        signed_sum_by_prefix(accounts, prefix)
    } else {
        sum_by_prefix(accounts, prefix)
    };
    output::info(format!(
        "Σ {}* = {}",
        prefix,
        context.format_money(total)
    ));
    Ok(())
}

fn cmd_trial_balance(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let ledger = context.ledger()?;
    let trial = ledger.trial_balance();
    output::info(format!("Total débit  : {}", context.format_money(trial.total_debit)));
    output::info(format!("Total crédit : {}", context.format_money(trial.total_credit)));
    if trial.is_balanced() {
        output::success("Balance équilibrée.");
    } else {
        output::warning(format!(
            "Écart de {}.",
            context.format_money(trial.total_debit.saturating_sub(trial.total_credit))
        ));
    }
    for drift in ledger.verify_balances() {
        output::warning(format!(
            "Cached balance of `{}` is {} but entries give {}.",
            drift.code, drift.cached, drift.computed
        ));
    }
    Ok(())
}
