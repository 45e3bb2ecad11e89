use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::{
    calendar,
    day_bucket::{checked_sum, DayBucket},
    entry::Entry,
};
use crate::errors::{ExpenseError, Result};

/// Where a date stands with respect to the persisted collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BucketState {
    /// No bucket exists and none is being shown.
    Absent,
    /// An empty bucket exists only for display; it is not part of the ledger.
    Transient,
    /// The bucket is part of the ledger and will be saved.
    Persisted,
}

/// Day, Sunday-start week and calendar month totals around one date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PeriodTotals {
    pub day: Decimal,
    pub week: Decimal,
    pub month: Decimal,
}

/// Bucket handed to a caller that asked to view a date.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewBucket<'a> {
    Persisted(&'a DayBucket),
    Transient(DayBucket),
}

impl ViewBucket<'_> {
    pub fn bucket(&self) -> &DayBucket {
        match self {
            ViewBucket::Persisted(bucket) => bucket,
            ViewBucket::Transient(bucket) => bucket,
        }
    }

    pub fn state(&self) -> BucketState {
        match self {
            ViewBucket::Persisted(_) => BucketState::Persisted,
            ViewBucket::Transient(_) => BucketState::Transient,
        }
    }
}

/// The full expenditure history for a session: at most one bucket per date,
/// kept in the order buckets were first stored.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Ledger {
    buckets: Vec<DayBucket>,
    dirty: bool,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a ledger from stored records. Records sharing a date are merged
    /// into the first one, and one warning is returned per merge. Totals are
    /// recomputed rather than trusted.
    pub fn from_buckets(records: Vec<DayBucket>) -> Result<(Self, Vec<String>)> {
        let mut ledger = Ledger::new();
        let mut warnings = Vec::new();
        for record in records {
            match ledger.position(record.date) {
                Some(index) => {
                    warnings.push(format!(
                        "duplicate record for {} merged ({} entries appended)",
                        record.date,
                        record.len()
                    ));
                    ledger.buckets[index].absorb(record);
                }
                None => ledger.buckets.push(record),
            }
        }
        ledger.recompute_totals()?;
        Ok((ledger, warnings))
    }

    pub fn buckets(&self) -> &[DayBucket] {
        &self.buckets
    }

    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    pub fn entry_count(&self) -> usize {
        self.buckets.iter().map(DayBucket::len).sum()
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn mark_clean(&mut self) {
        self.dirty = false;
    }

    pub fn find_bucket(&self, date: NaiveDate) -> Option<&DayBucket> {
        self.buckets.iter().find(|bucket| bucket.date == date)
    }

    pub fn find_bucket_mut(&mut self, date: NaiveDate) -> Option<&mut DayBucket> {
        self.buckets.iter_mut().find(|bucket| bucket.date == date)
    }

    pub fn bucket_state(&self, date: NaiveDate) -> BucketState {
        if self.find_bucket(date).is_some() {
            BucketState::Persisted
        } else {
            BucketState::Absent
        }
    }

    /// The stored bucket for `date`, or an empty transient one that is not
    /// inserted until [`Ledger::commit_bucket`] is called with it.
    pub fn get_or_create_view_bucket(&self, date: NaiveDate) -> ViewBucket<'_> {
        match self.find_bucket(date) {
            Some(bucket) => ViewBucket::Persisted(bucket),
            None => ViewBucket::Transient(DayBucket::new(date)),
        }
    }

    /// Promotes a transient bucket that has gained entries into the ledger
    /// and marks it dirty. Empty buckets stay transient and are rejected.
    pub fn commit_bucket(&mut self, mut bucket: DayBucket) -> Result<&mut DayBucket> {
        if self.position(bucket.date).is_some() {
            return Err(ExpenseError::InvalidReference(format!(
                "a bucket for {} is already stored",
                bucket.date
            )));
        }
        if bucket.is_empty() {
            return Err(ExpenseError::InvalidInput(format!(
                "the bucket for {} has no entries to store",
                bucket.date
            )));
        }
        bucket.recompute_total()?;
        self.buckets.push(bucket);
        self.dirty = true;
        let last = self.buckets.len() - 1;
        Ok(&mut self.buckets[last])
    }

    /// Swaps in a new version of an already stored bucket, keeping its place,
    /// and returns the previous one.
    pub fn replace_bucket(&mut self, mut bucket: DayBucket) -> Result<DayBucket> {
        let index = self.position(bucket.date).ok_or_else(|| {
            ExpenseError::InvalidReference(format!("no bucket is stored for {}", bucket.date))
        })?;
        bucket.recompute_total()?;
        self.dirty = true;
        Ok(std::mem::replace(&mut self.buckets[index], bucket))
    }

    /// Appends `entry` to the bucket for `date`, committing a new bucket when
    /// none is stored, and returns the refreshed day total. On overflow the
    /// ledger is left unchanged.
    pub fn record(&mut self, date: NaiveDate, entry: Entry) -> Result<Decimal> {
        let Some(index) = self.position(date) else {
            let bucket = DayBucket::with_entries(date, vec![entry])?;
            return Ok(self.commit_bucket(bucket)?.total_amount());
        };
        let bucket = &mut self.buckets[index];
        bucket.push(entry);
        if let Err(err) = bucket.recompute_total() {
            let last = bucket.len() - 1;
            bucket.remove(last)?;
            return Err(err);
        }
        self.dirty = true;
        Ok(bucket.total_amount())
    }

    /// Drops the bucket for `date`. Used to undo a commit.
    pub(crate) fn discard_bucket(&mut self, date: NaiveDate) -> Option<DayBucket> {
        self.position(date).map(|index| self.buckets.remove(index))
    }

    pub fn recompute_totals(&mut self) -> Result<()> {
        for bucket in &mut self.buckets {
            bucket.recompute_total()?;
        }
        Ok(())
    }

    pub fn day_total(&self, date: NaiveDate) -> Decimal {
        self.find_bucket(date)
            .map(DayBucket::total_amount)
            .unwrap_or(Decimal::ZERO)
    }

    /// Sunday..Saturday window containing `date`; missing days add nothing.
    pub fn week_total(&self, date: NaiveDate) -> Result<Decimal> {
        checked_sum(calendar::week_dates(date).map(|day| self.day_total(day)))
    }

    /// All buckets in the same calendar year and month as `date`.
    pub fn month_total(&self, date: NaiveDate) -> Result<Decimal> {
        checked_sum(
            self.buckets
                .iter()
                .filter(|bucket| calendar::same_month(bucket.date, date))
                .map(DayBucket::total_amount),
        )
    }

    pub fn totals(&self, date: NaiveDate) -> Result<PeriodTotals> {
        Ok(PeriodTotals {
            day: self.day_total(date),
            week: self.week_total(date)?,
            month: self.month_total(date)?,
        })
    }

    fn position(&self, date: NaiveDate) -> Option<usize> {
        self.buckets.iter().position(|bucket| bucket.date == date)
    }
}
