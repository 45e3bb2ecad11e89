use std::path::{Path, PathBuf};

use chrono::{Datelike, NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;

use crate::{
    config::Config,
    errors::Result,
    export::CsvExporter,
    ledger::{calendar, BucketState, DayBucket, Entry, Ledger, PeriodTotals, ViewBucket},
    storage::{JsonStorage, StorageBackend},
};

/// Callback fired with the selected date and fresh totals after the selection
/// changes or the selected bucket is mutated.
pub type TotalsObserver = Box<dyn FnMut(NaiveDate, PeriodTotals)>;

/// Metadata describing the outcome of a load operation.
#[derive(Debug, Clone)]
pub struct LoadMetadata {
    pub path: PathBuf,
    pub warnings: Vec<String>,
    pub existed: bool,
    pub buckets: usize,
}

/// Facade that owns the session's ledger, the selected date and its view
/// bucket, and coordinates persistence and export.
pub struct ExpenseSession {
    ledger: Ledger,
    selected: NaiveDate,
    /// Empty bucket shown for `selected` while the ledger has none stored.
    transient: DayBucket,
    path: Option<PathBuf>,
    storage: Box<dyn StorageBackend>,
    exporter: CsvExporter,
    observers: Vec<TotalsObserver>,
}

impl ExpenseSession {
    pub fn new(storage: Box<dyn StorageBackend>, exporter: CsvExporter, selected: NaiveDate) -> Self {
        Self {
            ledger: Ledger::new(),
            selected,
            transient: DayBucket::new(selected),
            path: None,
            storage,
            exporter,
            observers: Vec::new(),
        }
    }

    pub fn from_config(config: &Config, selected: NaiveDate) -> Self {
        let storage = JsonStorage::new(
            Some(config.resolved_data_dir()),
            Some(config.file_prefix.clone()),
        );
        Self::new(
            Box::new(storage),
            CsvExporter::new(config.currency_prefix.clone()),
            selected,
        )
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn is_dirty(&self) -> bool {
        self.ledger.is_dirty()
    }

    pub fn selected_date(&self) -> NaiveDate {
        self.selected
    }

    pub fn subscribe(&mut self, observer: TotalsObserver) {
        self.observers.push(observer);
    }

    /// Switches the view to `date`. An untouched transient bucket for the
    /// previous date is dropped.
    pub fn select_date(&mut self, date: NaiveDate) -> Result<PeriodTotals> {
        self.selected = date;
        self.transient = match self.ledger.get_or_create_view_bucket(date) {
            ViewBucket::Transient(bucket) => bucket,
            ViewBucket::Persisted(_) => DayBucket::new(date),
        };
        tracing::debug!(%date, state = ?self.bucket_state(date), "selected date");
        self.notify()
    }

    pub fn select_datetime(&mut self, moment: NaiveDateTime) -> Result<PeriodTotals> {
        self.select_date(calendar::normalize(moment))
    }

    pub fn bucket_state(&self, date: NaiveDate) -> BucketState {
        match self.ledger.bucket_state(date) {
            BucketState::Absent if date == self.selected => BucketState::Transient,
            state => state,
        }
    }

    /// Bucket currently shown for the selected date.
    pub fn view_bucket(&self) -> &DayBucket {
        self.ledger
            .find_bucket(self.selected)
            .unwrap_or(&self.transient)
    }

    pub fn entries(&self) -> &[Entry] {
        self.view_bucket().entries()
    }

    pub fn add_entry(&mut self, entry: Entry) -> Result<PeriodTotals> {
        let ((), totals) = self.apply(|bucket| {
            bucket.push(entry);
            Ok(())
        })?;
        Ok(totals)
    }

    pub fn remove_entry(&mut self, index: usize) -> Result<Entry> {
        let (removed, _) = self.apply(|bucket| bucket.remove(index))?;
        Ok(removed)
    }

    /// In-place access for editing; finish with [`ExpenseSession::commit_edit`].
    pub fn entry_mut(&mut self, index: usize) -> Result<&mut Entry> {
        match self.ledger.find_bucket_mut(self.selected) {
            Some(bucket) => bucket.entry_mut(index),
            None => self.transient.entry_mut(index),
        }
    }

    /// Recomputes the selected bucket after in-place edits and marks the
    /// ledger dirty. A transient bucket has no entries to edit, so committing
    /// it stores nothing. If the edited amounts overflow, the edits stay in
    /// place with the previous total until they are corrected.
    pub fn commit_edit(&mut self) -> Result<PeriodTotals> {
        if self.ledger.find_bucket(self.selected).is_none() {
            return self.totals();
        }
        let ((), totals) = self.apply(|_| Ok(()))?;
        Ok(totals)
    }

    pub fn day_total(&self) -> Decimal {
        self.ledger.day_total(self.selected)
    }

    pub fn week_total(&self) -> Result<Decimal> {
        self.ledger.week_total(self.selected)
    }

    pub fn month_total(&self) -> Result<Decimal> {
        self.ledger.month_total(self.selected)
    }

    pub fn totals(&self) -> Result<PeriodTotals> {
        self.ledger.totals(self.selected)
    }

    pub fn day_week_label(&self) -> String {
        calendar::day_week_label(self.selected)
    }

    /// Path used by path-less `load`/`save` calls, if one is fixed yet.
    pub fn save_path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Fixes the default path on first use from the selected date's year; it
    /// does not follow later selections.
    pub fn resolve_path(&mut self) -> PathBuf {
        if let Some(path) = &self.path {
            return path.clone();
        }
        let path = self.storage.default_path(self.selected.year());
        tracing::debug!(path = %path.display(), "resolved default ledger path");
        self.path = Some(path.clone());
        path
    }

    /// Replaces the ledger with the stored one. On failure the current ledger
    /// and path are kept.
    pub fn load(&mut self, path: Option<&Path>) -> Result<LoadMetadata> {
        let path = match path {
            Some(path) => path.to_path_buf(),
            None => self.resolve_path(),
        };
        let report = self.storage.load(&path)?;
        for warning in &report.warnings {
            tracing::warn!(path = %report.path.display(), "{warning}");
        }
        report.ledger.totals(self.selected)?;
        let metadata = LoadMetadata {
            path: report.path,
            warnings: report.warnings,
            existed: report.existed,
            buckets: report.ledger.len(),
        };
        self.ledger = report.ledger;
        self.ledger.mark_clean();
        self.path = Some(path);
        tracing::info!(
            path = %metadata.path.display(),
            buckets = metadata.buckets,
            existed = metadata.existed,
            "loaded expenditure ledger"
        );
        self.select_date(self.selected)?;
        Ok(metadata)
    }

    /// Writes every stored bucket. The ledger stays dirty if the write fails.
    pub fn save(&mut self, path: Option<&Path>) -> Result<PathBuf> {
        let path = match path {
            Some(path) => path.to_path_buf(),
            None => self.resolve_path(),
        };
        self.ledger.recompute_totals()?;
        self.storage.save(&self.ledger, &path)?;
        self.ledger.mark_clean();
        self.path = Some(path.clone());
        tracing::info!(
            path = %path.display(),
            buckets = self.ledger.len(),
            "saved expenditure ledger"
        );
        Ok(path)
    }

    pub fn export_csv(&self, path: &Path) -> Result<usize> {
        self.exporter.export(&self.ledger, path)
    }

    /// Runs `edit` on a copy of the selected bucket, then stores the copy,
    /// promoting a transient bucket. If `edit` fails or any total overflows,
    /// the ledger is left as it was.
    fn apply<T>(
        &mut self,
        edit: impl FnOnce(&mut DayBucket) -> Result<T>,
    ) -> Result<(T, PeriodTotals)> {
        let was_dirty = self.ledger.is_dirty();
        let mut working = self.view_bucket().clone();
        let value = edit(&mut working)?;
        working.recompute_total()?;

        let previous = if self.ledger.find_bucket(self.selected).is_some() {
            Some(self.ledger.replace_bucket(working)?)
        } else {
            tracing::debug!(date = %self.selected, "promoting transient bucket");
            self.ledger.commit_bucket(working)?;
            None
        };

        if let Err(err) = self.ledger.totals(self.selected) {
            match previous {
                Some(bucket) => {
                    self.ledger.replace_bucket(bucket)?;
                }
                None => {
                    self.ledger.discard_bucket(self.selected);
                }
            }
            if !was_dirty {
                self.ledger.mark_clean();
            }
            return Err(err);
        }
        self.transient = DayBucket::new(self.selected);
        Ok((value, self.notify()?))
    }

    fn notify(&mut self) -> Result<PeriodTotals> {
        let totals = self.totals()?;
        let date = self.selected;
        for observer in &mut self.observers {
            observer(date, totals);
        }
        Ok(totals)
    }
}
