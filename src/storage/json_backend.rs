use std::{
    fs::{self, File},
    io::{self, Write},
    path::{Path, PathBuf},
};

use crate::{
    core::utils::{app_data_dir, ensure_dir, ledger_file_in, DEFAULT_FILE_PREFIX},
    errors::{ExpenseError, Result},
    ledger::{DayBucket, Ledger},
};

use super::{LoadReport, StorageBackend};

const TMP_SUFFIX: &str = "tmp";

/// Stores ledgers as JSON arrays of day records.
#[derive(Debug, Clone)]
pub struct JsonStorage {
    root: PathBuf,
    file_prefix: String,
}

impl JsonStorage {
    pub fn new(root: Option<PathBuf>, file_prefix: Option<String>) -> Self {
        Self {
            root: root.unwrap_or_else(app_data_dir),
            file_prefix: file_prefix.unwrap_or_else(|| DEFAULT_FILE_PREFIX.to_string()),
        }
    }

    pub fn base_dir(&self) -> &Path {
        &self.root
    }
}

impl StorageBackend for JsonStorage {
    fn load(&self, path: &Path) -> Result<LoadReport> {
        load_ledger_from_path(path)
    }

    fn save(&self, ledger: &Ledger, path: &Path) -> Result<()> {
        save_ledger_to_path(ledger, path)
    }

    fn default_path(&self, year: i32) -> PathBuf {
        ledger_file_in(&self.root, &self.file_prefix, year)
    }
}

pub fn load_ledger_from_path(path: &Path) -> Result<LoadReport> {
    let data = match fs::read_to_string(path) {
        Ok(data) => data,
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            return Ok(LoadReport::empty(path, false));
        }
        Err(err) => return Err(ExpenseError::io(path, err)),
    };
    let body = data.trim_start_matches('\u{feff}');
    if body.trim().is_empty() {
        return Ok(LoadReport::empty(path, true));
    }
    let records: Vec<DayBucket> =
        serde_json::from_str(body).map_err(|err| ExpenseError::parse(path, err))?;
    let (ledger, warnings) = Ledger::from_buckets(records).map_err(|err| match err {
        ExpenseError::InvalidInput(reason) => {
            ExpenseError::InvalidInput(format!("{reason} in `{}`", path.display()))
        }
        other => other,
    })?;
    Ok(LoadReport {
        ledger,
        warnings,
        path: path.to_path_buf(),
        existed: true,
    })
}

pub fn save_ledger_to_path(ledger: &Ledger, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(ledger.buckets())?;
    write_atomic(path, json.as_bytes())
}

/// Stages `data` in a sibling temp file, then renames it over `path`.
pub(crate) fn write_atomic(path: &Path, data: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        ensure_dir(parent)?;
    }
    let tmp = tmp_path(path);
    let mut file = File::create(&tmp).map_err(|err| ExpenseError::io(&tmp, err))?;
    if let Err(err) = file.write_all(data).and_then(|_| file.sync_all()) {
        let _ = fs::remove_file(&tmp);
        return Err(ExpenseError::io(&tmp, err));
    }
    drop(file);
    fs::rename(&tmp, path).map_err(|err| {
        let _ = fs::remove_file(&tmp);
        ExpenseError::io(path, err)
    })
}

pub(crate) fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}
