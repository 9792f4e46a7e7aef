pub mod account;
pub mod config;
pub mod entry;
pub mod ledger;
pub mod report;
pub mod system;

use crate::cli::core::CommandError;
use crate::cli::registry::CommandRegistry;

pub(crate) fn register_all(registry: &mut CommandRegistry) {
    for entry in system::definitions()
        .into_iter()
        .chain(ledger::definitions())
        .chain(account::definitions())
        .chain(entry::definitions())
        .chain(report::definitions())
        .chain(config::definitions())
    {
        registry.register(entry);
    }
}

/// Splits `args` into its sub-command and the remaining arguments.
pub(crate) fn subcommand<'a>(
    args: &'a [&'a str],
    usage: &str,
) -> Result<(String, &'a [&'a str]), CommandError> {
    match args.split_first() {
        Some((first, rest)) => Ok((first.to_lowercase(), rest)),
        None => Err(CommandError::InvalidArguments(format!("usage: {}", usage))),
    }
}
