//! Non-interactive command driver over [`ExpenseSession`].

pub mod output;

use std::{path::PathBuf, str::FromStr};

use chrono::NaiveDate;
use rust_decimal::Decimal;
use thiserror::Error;

use crate::{
    config::{Config, ConfigManager},
    core::ExpenseSession,
    errors::ExpenseError,
    export::default_report_name,
    ledger::Entry,
};

const DATE_FORMAT: &str = "%Y-%m-%d";

pub const USAGE: &str = "Usage: expenditure_cli [--file <ledger.json>] <command>\n\
Commands:\n  \
summary [date]\n  \
list [date]\n  \
add <date> <category> <name> <recipient> <amount> [comment]\n  \
remove <date> <number>\n  \
export [report.csv]\n  \
help\n\
Dates use YYYY-MM-DD; omitted dates mean today.";

/// User-facing CLI error wrapper.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] ExpenseError),
    #[error("{}\n{}", .0, USAGE)]
    Usage(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Summary(Option<NaiveDate>),
    List(Option<NaiveDate>),
    Add {
        date: NaiveDate,
        entry: Entry,
    },
    Remove {
        date: NaiveDate,
        number: usize,
    },
    Export(Option<PathBuf>),
    Help,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub file: Option<PathBuf>,
    pub command: Command,
}

pub fn parse_args<I>(args: I) -> Result<Invocation, CliError>
where
    I: IntoIterator<Item = String>,
{
    let mut file = None;
    let mut rest = Vec::new();
    let mut args = args.into_iter();
    while let Some(arg) = args.next() {
        if arg == "--file" {
            let path = args
                .next()
                .ok_or_else(|| CliError::Usage("--file needs a path".into()))?;
            file = Some(PathBuf::from(path));
        } else {
            rest.push(arg);
        }
    }

    let mut rest = rest.into_iter();
    let name = rest.next().unwrap_or_else(|| "help".to_string());
    let command = match name.as_str() {
        "summary" => Command::Summary(rest.next().as_deref().map(parse_date).transpose()?),
        "list" => Command::List(rest.next().as_deref().map(parse_date).transpose()?),
        "add" => {
            let date = parse_date(&required(&mut rest, "date")?)?;
            let category = required(&mut rest, "category")?;
            let name = required(&mut rest, "name")?;
            let recipient = required(&mut rest, "recipient")?;
            let amount = parse_amount(&required(&mut rest, "amount")?)?;
            let comment = rest.next().unwrap_or_default();
            Command::Add {
                date,
                entry: Entry::new(name, category, recipient, amount).with_comment(comment),
            }
        }
        "remove" => {
            let date = parse_date(&required(&mut rest, "date")?)?;
            let raw = required(&mut rest, "number")?;
            let number = raw
                .parse::<usize>()
                .ok()
                .filter(|number| *number > 0)
                .ok_or_else(|| CliError::Usage(format!("`{raw}` is not an entry number")))?;
            Command::Remove { date, number }
        }
        "export" => Command::Export(rest.next().map(PathBuf::from)),
        "help" | "--help" | "-h" => Command::Help,
        other => return Err(CliError::Usage(format!("unknown command `{other}`"))),
    };
    if let Some(extra) = rest.next() {
        return Err(CliError::Usage(format!("unexpected argument `{extra}`")));
    }
    Ok(Invocation { file, command })
}

/// Runs one command against the configured ledger and returns what should be
/// printed.
pub fn run_cli<I>(args: I, today: NaiveDate) -> Result<String, CliError>
where
    I: IntoIterator<Item = String>,
{
    let invocation = parse_args(args)?;
    if invocation.command == Command::Help {
        return Ok(USAGE.to_string());
    }
    let config = ConfigManager::new_default()
        .load()
        .map_err(ExpenseError::from)?;
    execute(&config, invocation, today)
}

pub fn execute(config: &Config, invocation: Invocation, today: NaiveDate) -> Result<String, CliError> {
    let Invocation { file, command } = invocation;
    let selected = match &command {
        Command::Summary(date) | Command::List(date) => date.unwrap_or(today),
        Command::Add { date, .. } | Command::Remove { date, .. } => *date,
        Command::Export(_) | Command::Help => today,
    };
    let mut session = ExpenseSession::from_config(config, selected);
    let metadata = session.load(file.as_deref())?;
    let prefix = config.currency_prefix.as_str();

    let message = match command {
        Command::Summary(_) => output::render_summary(&session, prefix)?,
        Command::List(_) => output::render_entries(&session, prefix),
        Command::Add { entry, .. } => {
            let totals = session.add_entry(entry)?;
            let path = session.save(None)?;
            output::success(format!(
                "Entry added; day total {} (saved to {})",
                crate::currency::format_display(prefix, totals.day),
                path.display()
            ))
        }
        Command::Remove { number, .. } => {
            let removed = session.remove_entry(number - 1)?;
            let path = session.save(None)?;
            output::success(format!(
                "Removed `{}` (saved to {})",
                removed.name,
                path.display()
            ))
        }
        Command::Export(path) => {
            let path = path.unwrap_or_else(|| PathBuf::from(default_report_name(today)));
            let rows = session.export_csv(&path)?;
            output::success(format!("Exported {} entries to {}", rows, path.display()))
        }
        Command::Help => USAGE.to_string(),
    };

    let mut rendered = String::new();
    for warning in &metadata.warnings {
        rendered.push_str(&output::warning(warning));
        rendered.push('\n');
    }
    rendered.push_str(&message);
    Ok(rendered)
}

fn required(args: &mut impl Iterator<Item = String>, what: &str) -> Result<String, CliError> {
    args.next()
        .ok_or_else(|| CliError::Usage(format!("missing <{what}>")))
}

fn parse_date(raw: &str) -> Result<NaiveDate, CliError> {
    NaiveDate::parse_from_str(raw, DATE_FORMAT).map_err(|_| {
        CliError::Core(ExpenseError::InvalidInput(format!(
            "`{raw}` is not a YYYY-MM-DD date"
        )))
    })
}

fn parse_amount(raw: &str) -> Result<Decimal, CliError> {
    Decimal::from_str(raw.trim()).map_err(|_| {
        CliError::Core(ExpenseError::InvalidInput(format!(
            "`{raw}` is not a decimal amount"
        )))
    })
}
