//! Core CLI loop, dispatch, and shell context helpers.

use std::{
    io::{self, BufRead, Write},
    path::PathBuf,
};

use chrono::NaiveDate;
use rustyline::error::ReadlineError;
use strsim::levenshtein;
use uuid::Uuid;

use crate::{
    config::{Config, ConfigError, ConfigManager},
    core::{services::ServiceError, LedgerManager},
    currency::{format_amount, CurrencyDisplay, FormatOptions},
    errors::LedgerError,
    ledger::{Amount, Ledger, ReportingPeriod, SnapshotScope},
    storage::JsonStorage,
};

use super::commands;
use super::help;
use super::output;
use super::registry::{CommandEntry, CommandRegistry};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliMode {
    Interactive,
    Script,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LoopControl {
    Continue,
    Exit,
}

pub type CommandResult = Result<(), CommandError>;

pub struct ShellContext {
    pub mode: CliMode,
    pub registry: CommandRegistry,
    pub ledger_manager: LedgerManager,
    pub config_manager: ConfigManager,
    pub config: Config,
    /// Draft entry that `entry line` and `entry post` act on.
    pub open_entry: Option<Uuid>,
    pub last_command: Option<String>,
    pub running: bool,
}

impl ShellContext {
    pub fn new(mode: CliMode) -> Result<Self, CliError> {
        Self::with_base_dir(mode, None)
    }

    /// `base` overrides the data directory; `None` resolves it from the
    /// environment.
    pub fn with_base_dir(mode: CliMode, base: Option<PathBuf>) -> Result<Self, CliError> {
        let mut registry = CommandRegistry::new();
        commands::register_all(&mut registry);

        let storage = JsonStorage::new(base)?;
        let config_manager = ConfigManager::with_base_dir(storage.base_dir().to_path_buf())?;
        let config = config_manager.load()?;

        let mut context = Self {
            mode,
            registry,
            ledger_manager: LedgerManager::new(Box::new(storage)),
            config_manager,
            config,
            open_entry: None,
            last_command: None,
            running: true,
        };
        context.auto_load_last();
        Ok(context)
    }

    fn auto_load_last(&mut self) {
        if self.mode != CliMode::Interactive {
            return;
        }
        let Some(name) = self.config.last_opened_ledger.clone() else {
            return;
        };
        match self.ledger_manager.load(&name) {
            Ok(()) => output::success(format!("Automatically loaded last ledger `{}`.", name)),
            Err(err) => tracing::debug!(ledger = %name, error = %err, "auto-load skipped"),
        }
    }

    pub fn command(&self, name: &str) -> Option<&CommandEntry> {
        self.registry.get(name)
    }

    pub fn prompt(&self) -> String {
        match self.ledger_manager.current.as_ref() {
            Some(ledger) => format!("syscohada [{}]> ", ledger.name),
            None => "syscohada> ".to_string(),
        }
    }

    pub(crate) fn dispatch(
        &mut self,
        command: &str,
        raw: &str,
        args: &[&str],
    ) -> Result<LoopControl, CommandError> {
        if let Some(handler) = self.registry.handler(command) {
            match handler(self, args) {
                Ok(()) => Ok(LoopControl::Continue),
                Err(CommandError::ExitRequested) => Ok(LoopControl::Exit),
                Err(err) => Err(err),
            }
        } else {
            self.suggest_command(raw);
            Ok(LoopControl::Continue)
        }
    }

    #[cfg(test)]
    pub(crate) fn process_line(&mut self, line: &str) -> Result<LoopControl, CommandError> {
        let tokens = match crate::cli::shell::parse_command_line(line) {
            Ok(tokens) => tokens,
            Err(err) => {
                output::warning(err);
                return Ok(LoopControl::Continue);
            }
        };
        if tokens.is_empty() {
            return Ok(LoopControl::Continue);
        }
        let command = tokens[0].to_lowercase();
        let args: Vec<&str> = tokens.iter().skip(1).map(String::as_str).collect();
        self.dispatch(&command, &tokens[0], &args)
    }

    pub(crate) fn suggest_command(&self, input: &str) {
        output::warning(format!(
            "Unknown command `{}`. Type `help` to see available commands.",
            input
        ));

        let mut suggestions: Vec<_> = self
            .registry
            .names()
            .map(|key| (levenshtein(key, input), key))
            .collect();
        suggestions.sort_by_key(|(distance, _)| *distance);

        if let Some((distance, best)) = suggestions.first() {
            if *distance <= 3 {
                output::info(format!("Suggestion: `{}`?", best));
            }
        }
    }

    pub(crate) fn print_help(&self, command: Option<&str>) {
        match command {
            Some(name) => match self.command(&name.to_lowercase()) {
                Some(entry) => help::print_command(entry),
                None => self.suggest_command(name),
            },
            None => help::print_overview(&self.registry),
        }
    }

    pub(crate) fn confirm_exit(&self) -> Result<bool, CliError> {
        if self.mode == CliMode::Script {
            return Ok(true);
        }
        print!("Exit shell? [y/N] ");
        io::stdout().flush()?;
        let mut answer = String::new();
        io::stdin().lock().read_line(&mut answer)?;
        Ok(matches!(answer.trim().to_lowercase().as_str(), "y" | "yes" | "o" | "oui"))
    }

    pub(crate) fn report_error(&self, err: CommandError) -> Result<(), CliError> {
        match err {
            CommandError::ExitRequested => Ok(()),
            CommandError::InvalidArguments(message) => {
                output::error(message);
                output::hint("Use `help <command>` for usage details.");
                Ok(())
            }
            CommandError::LedgerNotLoaded => {
                output::error("Ledger not loaded. Use `new-ledger` or `load` first.");
                output::hint("Try `new-ledger \"Cabinet Demo\"` to get started.");
                Ok(())
            }
            other => {
                output::error(other);
                Ok(())
            }
        }
    }

    pub(crate) fn ledger(&self) -> Result<&Ledger, CommandError> {
        self.ledger_manager
            .current
            .as_ref()
            .ok_or(CommandError::LedgerNotLoaded)
    }

    pub(crate) fn ledger_mut(&mut self) -> Result<&mut Ledger, CommandError> {
        self.ledger_manager
            .current
            .as_mut()
            .ok_or(CommandError::LedgerNotLoaded)
    }

    pub(crate) fn persist_config(&self) -> CommandResult {
        self.config_manager.save(&self.config)?;
        Ok(())
    }

    pub(crate) fn remember_ledger(&mut self, name: &str) -> CommandResult {
        self.config.last_opened_ledger = Some(name.to_string());
        self.persist_config()
    }

    /// Amount rendered with the configured locale, without the currency unit.
    pub(crate) fn format_amount(&self, amount: Amount) -> String {
        let options = FormatOptions {
            currency_display: CurrencyDisplay::None,
            ..FormatOptions::default()
        };
        format_amount(
            amount,
            &self.config.currency_code(),
            &self.config.locale_config(),
            &options,
        )
    }

    pub(crate) fn format_money(&self, amount: Amount) -> String {
        format_amount(
            amount,
            &self.config.currency_code(),
            &self.config.locale_config(),
            &FormatOptions::default(),
        )
    }
}

pub(crate) fn parse_date(input: &str) -> Result<NaiveDate, CommandError> {
    NaiveDate::parse_from_str(input, "%Y-%m-%d").map_err(|_| {
        CommandError::InvalidArguments(format!("invalid date `{}` (use YYYY-MM-DD)", input))
    })
}

/// Whole units; `_` and spaces are accepted as digit separators.
pub(crate) fn parse_amount(input: &str) -> Result<Amount, CommandError> {
    let cleaned: String = input
        .chars()
        .filter(|c| !matches!(c, '_' | ' ' | '\u{202f}'))
        .collect();
    let value: Amount = cleaned.parse().map_err(|_| {
        CommandError::InvalidArguments(format!("invalid amount `{}` (whole units expected)", input))
    })?;
    if value < 0 {
        return Err(CommandError::InvalidArguments(
            "amounts must be non-negative; use the other column instead".into(),
        ));
    }
    Ok(value)
}

/// No argument means all time, one means a fiscal year, two an explicit range.
pub(crate) fn parse_scope(args: &[&str]) -> Result<SnapshotScope, CommandError> {
    match args {
        [] => Ok(SnapshotScope::AllTime),
        [year] => {
            let year: i32 = year.parse().map_err(|_| {
                CommandError::InvalidArguments(format!("invalid fiscal year `{}`", year))
            })?;
            Ok(SnapshotScope::Period(ReportingPeriod::fiscal_year(year)?))
        }
        [from, to] => Ok(SnapshotScope::Period(ReportingPeriod::new(
            parse_date(from)?,
            parse_date(to)?,
        )?)),
        _ => Err(CommandError::InvalidArguments(
            "expected `[year]` or `[from to]`".into(),
        )),
    }
}

/// User-facing CLI error wrapper.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] LedgerError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("Invalid input: {0}")]
    Input(String),
    #[error("Command failed: {0}")]
    Command(String),
}

#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error("Ledger not loaded. Use `new-ledger` or `load` first.")]
    LedgerNotLoaded,
    #[error("{0}")]
    InvalidArguments(String),
    #[error("{0}")]
    Message(String),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Serde(#[from] serde_json::Error),
    #[error(transparent)]
    Ledger(#[from] LedgerError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("exit requested")]
    ExitRequested,
}

impl From<ServiceError> for CommandError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::Ledger(err) => CommandError::Ledger(err),
            ServiceError::Invalid(message) => CommandError::InvalidArguments(message),
            other @ ServiceError::Imbalance { .. } => CommandError::Message(other.to_string()),
        }
    }
}

impl From<CommandError> for CliError {
    fn from(err: CommandError) -> Self {
        CliError::Command(err.to_string())
    }
}

impl From<io::Error> for CliError {
    fn from(err: io::Error) -> Self {
        CliError::Command(err.to_string())
    }
}

impl From<ReadlineError> for CliError {
    fn from(err: ReadlineError) -> Self {
        CliError::Input(err.to_string())
    }
}

#[cfg(test)]
pub(crate) fn process_script(base: PathBuf, lines: &[&str]) -> Result<ShellContext, CliError> {
    let mut app = ShellContext::with_base_dir(CliMode::Script, Some(base))?;
    for line in lines {
        match app.process_line(line) {
            Ok(LoopControl::Continue) => {}
            Ok(LoopControl::Exit) => break,
            Err(err) => app.report_error(err)?,
        }
    }
    Ok(app)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn scripted_session_posts_and_saves() {
        let home = tempdir().unwrap();
        let app = process_script(
            home.path().to_path_buf(),
            &[
                "new-ledger \"Cabinet Sow\"",
                "entry new 2024-01-05 AN \"Apport initial\"",
                "entry line 521 1_000_000 0",
                "entry line 101 0 1_000_000",
                "entry post",
                "save cabinet-sow",
                "exit",
            ],
        )
        .unwrap();

        let ledger = app.ledger().unwrap();
        assert_eq!(ledger.account_by_code("521").unwrap().balance, 1_000_000);
        assert!(app.open_entry.is_none());
        assert_eq!(app.config.last_opened_ledger.as_deref(), Some("cabinet-sow"));
        assert!(home.path().join("ledgers/cabinet_sow.json").exists());
    }

    #[test]
    fn failed_commands_do_not_stop_the_script() {
        let home = tempdir().unwrap();
        let app = process_script(
            home.path().to_path_buf(),
            &["account list", "bogus", "new-ledger Demo --empty", "account add 521 Banque"],
        )
        .unwrap();
        assert_eq!(app.ledger().unwrap().accounts.len(), 1);
    }

    #[test]
    fn parses_amounts_and_scopes() {
        assert_eq!(parse_amount("1_250_000").unwrap(), 1_250_000);
        assert!(parse_amount("-5").is_err());
        assert!(parse_amount("12.5").is_err());
        assert_eq!(parse_scope(&[]).unwrap(), SnapshotScope::AllTime);
        assert_eq!(
            parse_scope(&["2024"]).unwrap(),
            SnapshotScope::Period(ReportingPeriod::fiscal_year(2024).unwrap())
        );
        assert!(parse_scope(&["2024-12-31", "2024-01-01"]).is_err());
    }
}
