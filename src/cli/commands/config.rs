use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::output;
use crate::cli::registry::CommandEntry;
use crate::config::Config;

use super::subcommand;

const USAGE: &str = "config show | config set <key> <value>";

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![CommandEntry::new(
        "config",
        "Show or change preferences",
        USAGE,
        cmd_config,
    )
    .with_subcommands(&["show", "set"])]
}

fn cmd_config(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let (action, rest) = subcommand(args, USAGE)?;
    match action.as_str() {
        "show" => {
            output::section("Configuration");
            for key in Config::KEYS {
                output::info(format!("  {:<16} {}", key, context.config.get(key)?));
            }
            output::info(format!("  {:<16} {}", "file", context.config_manager.path().display()));
            Ok(())
        }
        "set" => {
            let [key, value @ ..] = rest else {
                return Err(CommandError::InvalidArguments(
                    "usage: config set <key> <value>".into(),
                ));
            };
            context.config.set(key, &value.join(" "))?;
            context.persist_config()?;
            output::success(format!("`{}` set to `{}`.", key, context.config.get(key)?));
            Ok(())
        }
        _ => Err(CommandError::InvalidArguments(format!("usage: {}", USAGE))),
    }
}
