use uuid::Uuid;

use crate::cli::core::{parse_amount, parse_date, CommandError, CommandResult, ShellContext};
use crate::cli::output;
use crate::cli::registry::CommandEntry;
use crate::cli::table::{Alignment, LineStyle, Table, TableColumn};
use crate::core::services::{EntryLine, PostingService};
use crate::currency::format_date;
use crate::ledger::Transaction;

use super::subcommand;

const USAGE: &str = "entry new <date> <journal> <description> | entry line <code> <debit> <credit> \
| entry post | entry show | entry discard | entry list";

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![CommandEntry::new(
        "entry",
        "Draft, balance and post journal entries",
        USAGE,
        cmd_entry,
    )
    .with_subcommands(&["new", "line", "post", "show", "discard", "list"])]
}

fn cmd_entry(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let (action, rest) = subcommand(args, USAGE)?;
    match action.as_str() {
        "new" => open(context, rest),
        "line" => line(context, rest),
        "post" => post(context),
        "show" => show(context),
        "discard" => discard(context),
        "list" => list(context),
        _ => Err(CommandError::InvalidArguments(format!("usage: {}", USAGE))),
    }
}

fn open(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let [date, journal, description @ ..] = args else {
        return Err(CommandError::InvalidArguments(
            "usage: entry new <date> <journal> <description>".into(),
        ));
    };
    if let Some(previous) = context.open_entry {
        output::warning(format!(
            "Draft {} stays unposted; use `entry list` to find it.",
            short_id(previous)
        ));
    }
    let date = parse_date(date)?;
    let id = PostingService::open(context.ledger_mut()?, date, journal, &description.join(" "))?;
    context.open_entry = Some(id);
    output::success(format!("Draft {} opened in journal {}.", short_id(id), journal.to_uppercase()));
    Ok(())
}

fn line(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let [code, debit, credit] = args else {
        return Err(CommandError::InvalidArguments(
            "usage: entry line <code> <debit> <credit>".into(),
        ));
    };
    let id = require_open(context)?;
    let line = EntryLine {
        code: code.to_string(),
        debit: parse_amount(debit)?,
        credit: parse_amount(credit)?,
    };
    PostingService::add_line(context.ledger_mut()?, id, &line)?;
    let txn = draft(context, id)?;
    output::info(format!(
        "Debit {} / credit {}.",
        context.format_amount(txn.total_debit()),
        context.format_amount(txn.total_credit())
    ));
    Ok(())
}

fn post(context: &mut ShellContext) -> CommandResult {
    let id = require_open(context)?;
    PostingService::post(context.ledger_mut()?, id)?;
    context.open_entry = None;
    output::success(format!("Entry {} posted.", short_id(id)));
    Ok(())
}

fn show(context: &mut ShellContext) -> CommandResult {
    let id = require_open(context)?;
    let ledger = context.ledger()?;
    let txn = draft(context, id)?;
    output::section(format!(
        "{} {} {}",
        txn.journal,
        format_date(&context.config.locale_config(), txn.date),
        txn.description
    ));
    let mut table = Table::new(vec![
        TableColumn::new("Compte", Alignment::Left),
        TableColumn::new("Intitulé", Alignment::Left).max_width(40),
        TableColumn::new("Débit", Alignment::Right),
        TableColumn::new("Crédit", Alignment::Right),
    ]);
    for entry in &txn.entries {
        let (code, name) = ledger
            .account(entry.account_id)
            .map(|account| (account.code.clone(), account.name.clone()))
            .unwrap_or_else(|| ("?".into(), "compte inconnu".into()));
        table.push(
            vec![
                code,
                name,
                context.format_amount(entry.debit),
                context.format_amount(entry.credit),
            ],
            LineStyle::Plain,
        );
    }
    table.push(
        vec![
            String::new(),
            "Total".into(),
            context.format_amount(txn.total_debit()),
            context.format_amount(txn.total_credit()),
        ],
        LineStyle::Total,
    );
    output::raw(table.render());
    if txn.total_debit() != txn.total_credit() {
        output::warning("Entry is not balanced yet.");
    }
    Ok(())
}

fn discard(context: &mut ShellContext) -> CommandResult {
    let id = require_open(context)?;
    context.ledger_mut()?.remove_draft(id)?;
    context.open_entry = None;
    output::success(format!("Draft {} discarded.", short_id(id)));
    Ok(())
}

fn list(context: &mut ShellContext) -> CommandResult {
    let drafts = PostingService::drafts(context.ledger()?);
    if drafts.is_empty() {
        output::info("No draft entries.");
        return Ok(());
    }
    for txn in drafts {
        output::info(format!(
            "  {} {} {} {} ({} / {})",
            short_id(txn.id),
            txn.date,
            txn.journal,
            txn.description,
            context.format_amount(txn.total_debit()),
            context.format_amount(txn.total_credit())
        ));
    }
    Ok(())
}

fn require_open(context: &ShellContext) -> Result<Uuid, CommandError> {
    context.open_entry.ok_or_else(|| {
        CommandError::InvalidArguments("No open entry. Use `entry new` first.".into())
    })
}

fn draft(context: &ShellContext, id: Uuid) -> Result<&Transaction, CommandError> {
    context
        .ledger()?
        .transaction(id)
        .ok_or(CommandError::Message(format!("entry {} not found", short_id(id))))
}

fn short_id(id: Uuid) -> String {
    let mut short = id.simple().to_string();
    short.truncate(8);
    short
}
