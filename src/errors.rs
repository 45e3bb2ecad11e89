use std::{io, path::PathBuf};

use thiserror::Error;

/// Error type that captures ledger, persistence and export failures.
#[derive(Debug, Error)]
pub enum ExpenseError {
    #[error("IO error on `{}`: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Malformed ledger `{}`: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("Invalid reference: {0}")]
    InvalidReference(String),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, ExpenseError>;

impl ExpenseError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        ExpenseError::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn parse(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        ExpenseError::Parse {
            path: path.into(),
            source,
        }
    }
}

impl From<crate::config::ConfigError> for ExpenseError {
    fn from(err: crate::config::ConfigError) -> Self {
        ExpenseError::Config(err.to_string())
    }
}
