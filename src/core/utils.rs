use dirs::{document_dir, home_dir};
use std::{
    env, fs,
    path::{Path, PathBuf},
};

use crate::errors::{ExpenseError, Result};

pub const APP_DIR_NAME: &str = "ExpenditureManager";
pub const HOME_ENV: &str = "EXPENDITURE_MANAGER_HOME";
pub const DEFAULT_FILE_PREFIX: &str = "MyExpenses";
const CONFIG_FILE: &str = "config.json";

/// Returns the application data directory, defaulting to
/// `<documents>/ExpenditureManager`. `EXPENDITURE_MANAGER_HOME` overrides it.
pub fn app_data_dir() -> PathBuf {
    if let Some(custom) = env::var_os(HOME_ENV) {
        return PathBuf::from(custom);
    }
    document_dir()
        .or_else(home_dir)
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR_NAME)
}

/// Per-year ledger file, e.g. `MyExpenses_2024.json`.
pub fn ledger_file_in(base: &Path, prefix: &str, year: i32) -> PathBuf {
    base.join(format!("{}_{}.json", prefix, year))
}

pub fn config_file_in(base: &Path) -> PathBuf {
    base.join(CONFIG_FILE)
}

pub fn ensure_dir(path: &Path) -> Result<()> {
    fs::create_dir_all(path).map_err(|err| ExpenseError::io(path, err))
}
