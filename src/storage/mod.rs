pub mod json_backend;

use std::path::{Path, PathBuf};

use crate::{errors::Result, ledger::Ledger};

/// Abstraction over persistence backends capable of storing a ledger.
pub trait StorageBackend: Send + Sync {
    /// Loads the ledger at `path`. An absent or blank file yields an empty
    /// ledger; unreadable or malformed content is an error.
    fn load(&self, path: &Path) -> Result<LoadReport>;

    /// Replaces the ledger at `path` so readers never observe a partial write.
    fn save(&self, ledger: &Ledger, path: &Path) -> Result<()>;

    /// Location used when the caller never chose a path.
    fn default_path(&self, year: i32) -> PathBuf;
}

/// Outcome of a load operation.
#[derive(Debug, Clone)]
pub struct LoadReport {
    pub ledger: Ledger,
    pub warnings: Vec<String>,
    pub path: PathBuf,
    pub existed: bool,
}

impl LoadReport {
    pub(crate) fn empty(path: &Path, existed: bool) -> Self {
        Self {
            ledger: Ledger::new(),
            warnings: Vec::new(),
            path: path.to_path_buf(),
            existed,
        }
    }
}

pub use json_backend::{load_ledger_from_path, save_ledger_to_path, JsonStorage};
