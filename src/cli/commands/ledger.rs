use std::path::Path;

use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::output;
use crate::cli::registry::CommandEntry;
use crate::ledger::{provision_default_chart, Ledger};

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "new-ledger",
            "Create a ledger seeded with the SYSCOHADA chart",
            "new-ledger <name> [--empty]",
            cmd_new_ledger,
        ),
        CommandEntry::new(
            "load",
            "Load a stored ledger by name or JSON path",
            "load <name|path.json>",
            cmd_load,
        ),
        CommandEntry::new(
            "save",
            "Save the current ledger, optionally under a new name",
            "save [name]",
            cmd_save,
        ),
        CommandEntry::new("ledgers", "List stored ledgers", "ledgers", cmd_ledgers),
    ]
}

fn cmd_new_ledger(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let empty = args.contains(&"--empty");
    let name = args
        .iter()
        .filter(|arg| **arg != "--empty")
        .copied()
        .collect::<Vec<_>>()
        .join(" ");
    if name.trim().is_empty() {
        return Err(CommandError::InvalidArguments(
            "usage: new-ledger <name> [--empty]".into(),
        ));
    }

    let mut ledger = Ledger::new(name.trim());
    let created = if empty {
        0
    } else {
        provision_default_chart(&mut ledger)?
    };
    context.ledger_manager.set_current(ledger, None, None);
    context.open_entry = None;
    output::success(format!(
        "New ledger `{}` created with {} accounts.",
        name.trim(),
        created
    ));
    Ok(())
}

fn cmd_load(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let target = args
        .first()
        .ok_or_else(|| CommandError::InvalidArguments("usage: load <name|path.json>".into()))?;
    let path = Path::new(target);
    if path.extension().and_then(|ext| ext.to_str()) == Some("json") && path.exists() {
        context.ledger_manager.load_from_path(path)?;
    } else {
        context.ledger_manager.load(target)?;
        context.remember_ledger(target)?;
    }
    context.open_entry = None;

    let ledger = context.ledger()?;
    let drift = ledger.verify_balances();
    output::success(format!(
        "Ledger `{}` loaded ({} accounts, {} transactions).",
        target,
        ledger.accounts.len(),
        ledger.transactions.len()
    ));
    for item in drift {
        output::warning(format!(
            "Cached balance of `{}` is {} but entries give {}.",
            item.code, item.cached, item.computed
        ));
    }
    Ok(())
}

fn cmd_save(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let path = match args.first() {
        Some(name) => {
            let path = context.ledger_manager.save_as(name)?;
            context.remember_ledger(name)?;
            path
        }
        None => {
            context.ledger()?;
            if context.ledger_manager.current_name().is_none()
                && context.ledger_manager.current_path().is_none()
            {
                return Err(CommandError::InvalidArguments(
                    "No named ledger associated. Use `save <name>` once to bind it.".into(),
                ));
            }
            context.ledger_manager.save()?
        }
    };
    output::success(format!("Ledger saved to {}.", path.display()));
    Ok(())
}

fn cmd_ledgers(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let names = context.ledger_manager.list()?;
    if names.is_empty() {
        output::info("No stored ledgers.");
        return Ok(());
    }
    output::section("Stored ledgers");
    for name in names {
        output::info(format!("  {}", name));
    }
    Ok(())
}
