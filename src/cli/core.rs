//! Dispatch, argument parsing and error reporting shared by all commands.

use std::io;

use saver_core::{CoreError, CurrencyFormatter};
use saver_domain::{ItemId, ItemKind, RecurrenceInterval};
use strsim::levenshtein;

use crate::cli::io as cli_io;
use crate::errors::CliError;

pub use crate::cli::shell_context::{CliMode, ShellContext};

const SUGGESTION_DISTANCE: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopControl {
    Continue,
    Exit,
}

pub type CommandResult = Result<(), CommandError>;

#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error("{0}")]
    InvalidArguments(String),
    #[error("{0}")]
    Message(String),
    #[error(transparent)]
    Core(#[from] CoreError),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Dialoguer(#[from] dialoguer::Error),
    #[error("exit requested")]
    ExitRequested,
}

impl From<CommandError> for CliError {
    fn from(err: CommandError) -> Self {
        CliError::Command(err.to_string())
    }
}

impl ShellContext {
    pub fn dispatch(
        &mut self,
        command: &str,
        raw: &str,
        args: &[&str],
    ) -> Result<LoopControl, CommandError> {
        if let Some(handler) = self.registry.get(command).map(|entry| entry.handler) {
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

    /// Tokenizes and dispatches one input line.
    pub fn process_line(&mut self, line: &str) -> Result<LoopControl, CommandError> {
        let tokens = match crate::cli::shell::parse_command_line(line) {
            Ok(tokens) => tokens,
            Err(err) => {
                cli_io::print_warning(&err);
                return Ok(LoopControl::Continue);
            }
        };

        let Some(raw) = tokens.first() else {
            return Ok(LoopControl::Continue);
        };

        let command = raw.to_lowercase();
        let args: Vec<&str> = tokens.iter().skip(1).map(String::as_str).collect();

        match self.dispatch(&command, raw, &args) {
            Ok(LoopControl::Exit) => {
                self.running = false;
                Ok(LoopControl::Exit)
            }
            other => other,
        }
    }

    pub fn suggest_command(&self, input: &str) {
        cli_io::print_warning(format!(
            "Unknown command `{}`. Type `help` to see available commands.",
            input
        ));
        if let Some(best) = self.closest_command(input) {
            cli_io::print_info(format!("Did you mean `{}`?", best));
        }
    }

    /// Registered command nearest to `input`, if within the suggestion distance.
    pub fn closest_command(&self, input: &str) -> Option<&'static str> {
        let needle = input.to_lowercase();
        self.registry
            .names()
            .map(|name| (levenshtein(name, &needle), name))
            .filter(|(distance, _)| *distance <= SUGGESTION_DISTANCE)
            .min_by_key(|(distance, _)| *distance)
            .map(|(_, name)| name)
    }

    pub fn confirm_exit(&self) -> Result<bool, CliError> {
        if self.mode == CliMode::Script {
            return Ok(true);
        }
        Ok(cli_io::confirm_action(&self.theme, "Exit shell?", true)?)
    }

    /// Asks before a destructive action. Script mode never prompts.
    pub fn confirm(&self, prompt: &str) -> Result<bool, CommandError> {
        if self.mode == CliMode::Script {
            return Ok(true);
        }
        cli_io::confirm_action(&self.theme, prompt, false)
    }

    pub fn report_error(&self, err: CommandError) -> Result<(), CliError> {
        match err {
            CommandError::ExitRequested => Ok(()),
            CommandError::InvalidArguments(message) => {
                cli_io::print_error(message);
                cli_io::print_hint("Use `help <command>` for usage details.");
                Ok(())
            }
            CommandError::Core(err @ CoreError::ItemNotFound { .. }) => {
                cli_io::print_error(err);
                cli_io::print_hint("Use `list` to see item ids.");
                Ok(())
            }
            CommandError::Core(CoreError::Validation(message)) => {
                cli_io::print_error(format!("Invalid input: {message}"));
                Ok(())
            }
            other => {
                cli_io::print_error(other);
                Ok(())
            }
        }
    }

    pub fn format_amount(&self, amount: f64) -> String {
        self.formatter
            .format_amount(amount, &self.store.snapshot().currency_label)
    }

    /// Resolves an identifier prefix to exactly one item of `kind`.
    pub fn resolve_item(&self, kind: ItemKind, prefix: &str) -> Result<ItemId, CommandError> {
        if let Ok(id) = prefix.parse::<ItemId>() {
            return Ok(id);
        }
        let matches = self.store.snapshot().find_by_prefix(kind, prefix);
        match matches.as_slice() {
            [item] => Ok(item.id),
            [] => Err(CommandError::Message(format!(
                "No {kind} item matches id `{prefix}`."
            ))),
            many => Err(CommandError::InvalidArguments(format!(
                "Id `{prefix}` is ambiguous: it matches {} {kind} items.",
                many.len()
            ))),
        }
    }
}

pub fn parse_kind(raw: &str) -> Result<ItemKind, CommandError> {
    raw.parse::<ItemKind>().map_err(|_| {
        CommandError::InvalidArguments(format!(
            "unknown collection `{raw}` (use `income` or `expense`)"
        ))
    })
}

/// Parses trailing interval tokens, e.g. `weekly`, `custom:3` or `custom 3`.
pub fn parse_interval(tokens: &[&str]) -> Result<Option<RecurrenceInterval>, CommandError> {
    if tokens.is_empty() {
        return Ok(None);
    }
    let joined = tokens.join(" ");
    joined.parse::<RecurrenceInterval>().map(Some).map_err(|_| {
        CommandError::InvalidArguments(format!(
            "unknown interval `{joined}` (use daily, weekly, monthly, yearly or custom:<months>)"
        ))
    })
}

pub fn parse_percent(raw: &str) -> Result<f64, CommandError> {
    let trimmed = raw.trim().trim_end_matches('%');
    trimmed
        .parse::<f64>()
        .map_err(|_| CommandError::InvalidArguments(format!("`{raw}` is not a percentage")))
}
