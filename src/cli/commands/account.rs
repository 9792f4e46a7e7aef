use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::output;
use crate::cli::registry::CommandEntry;
use crate::cli::table::{Alignment, LineStyle, Table, TableColumn};
use crate::core::services::AccountService;
use crate::reporting::classify;

use super::subcommand;

const USAGE: &str = "account add <code> <name> | account list [prefix] | account remove <code>";

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![CommandEntry::new(
        "account",
        "Manage the chart of accounts",
        USAGE,
        cmd_account,
    )
    .with_subcommands(&["add", "list", "remove"])]
}

fn cmd_account(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let (action, rest) = subcommand(args, USAGE)?;
    match action.as_str() {
        "add" => add(context, rest),
        "list" => list(context, rest),
        "remove" => remove(context, rest),
        _ => Err(CommandError::InvalidArguments(format!("usage: {}", USAGE))),
    }
}

fn add(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let (code, name) = match args.split_first() {
        Some((code, name)) if !name.is_empty() => (*code, name.join(" ")),
        _ => {
            return Err(CommandError::InvalidArguments(
                "usage: account add <code> <name>".into(),
            ))
        }
    };
    AccountService::add(context.ledger_mut()?, code, &name)?;
    output::success(format!("Account {} `{}` added.", code, name));
    Ok(())
}

fn list(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let ledger = context.ledger()?;
    let accounts = AccountService::list(ledger, args.first().copied());
    if accounts.is_empty() {
        output::info("No accounts found.");
        return Ok(());
    }
    let mut table = Table::new(vec![
        TableColumn::new("Compte", Alignment::Left),
        TableColumn::new("Intitulé", Alignment::Left).max_width(44),
        TableColumn::new("Rubrique", Alignment::Left).max_width(40),
        TableColumn::new("Solde", Alignment::Right),
    ]);
    for account in accounts {
        table.push(
            vec![
                account.code.clone(),
                account.name.clone(),
                classify(&account.code).label().to_string(),
                context.format_amount(account.balance),
            ],
            LineStyle::Plain,
        );
    }
    output::raw(table.render());
    Ok(())
}

fn remove(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let code = args
        .first()
        .ok_or_else(|| CommandError::InvalidArguments("usage: account remove <code>".into()))?;
    let removed = AccountService::remove(context.ledger_mut()?, code)?;
    output::success(format!("Account {} `{}` removed.", removed.code, removed.name));
    Ok(())
}
