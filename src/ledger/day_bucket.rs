use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{calendar::stored_date, entry::Entry};
use crate::errors::{ExpenseError, Result};

/// All entries recorded against one calendar date.
///
/// `total_amount` is a cache. Positional mutators leave it stale;
/// callers run [`DayBucket::recompute_total`] once they are done mutating.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayBucket {
    #[serde(with = "stored_date")]
    pub date: NaiveDate,
    #[serde(
        rename = "totalamount",
        default,
        with = "rust_decimal::serde::arbitrary_precision"
    )]
    total_amount: Decimal,
    #[serde(rename = "entrylist", default)]
    entries: Vec<Entry>,
}

impl DayBucket {
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date,
            total_amount: Decimal::ZERO,
            entries: Vec::new(),
        }
    }

    pub fn with_entries(date: NaiveDate, entries: Vec<Entry>) -> Result<Self> {
        let mut bucket = Self {
            date,
            total_amount: Decimal::ZERO,
            entries,
        };
        bucket.recompute_total()?;
        Ok(bucket)
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Cached total as of the last recompute.
    pub fn total_amount(&self) -> Decimal {
        self.total_amount
    }

    /// Sums entry amounts with exact decimal addition and caches the result.
    /// A sum outside the decimal range is an error and leaves the cache as it
    /// was.
    pub fn recompute_total(&mut self) -> Result<Decimal> {
        self.total_amount = checked_sum(self.entries.iter().map(|entry| entry.amount))?;
        Ok(self.total_amount)
    }

    pub fn push(&mut self, entry: Entry) {
        self.entries.push(entry);
    }

    pub fn remove(&mut self, index: usize) -> Result<Entry> {
        if index >= self.entries.len() {
            return Err(self.out_of_range(index));
        }
        Ok(self.entries.remove(index))
    }

    pub fn entry_mut(&mut self, index: usize) -> Result<&mut Entry> {
        let len = self.entries.len();
        let date = self.date;
        self.entries
            .get_mut(index)
            .ok_or_else(|| out_of_range(date, index, len))
    }

    /// Moves the entries of `other` to the end of this bucket, keeping order.
    pub(crate) fn absorb(&mut self, other: DayBucket) {
        self.entries.extend(other.entries);
    }

    fn out_of_range(&self, index: usize) -> ExpenseError {
        out_of_range(self.date, index, self.entries.len())
    }
}

/// Exact sum of `amounts`, failing instead of overflowing.
pub(crate) fn checked_sum(amounts: impl IntoIterator<Item = Decimal>) -> Result<Decimal> {
    amounts
        .into_iter()
        .try_fold(Decimal::ZERO, |acc, amount| acc.checked_add(amount))
        .ok_or_else(|| {
            ExpenseError::InvalidInput("amounts exceed the representable decimal range".into())
        })
}

fn out_of_range(date: NaiveDate, index: usize, len: usize) -> ExpenseError {
    ExpenseError::InvalidReference(format!(
        "entry {} on {} (bucket holds {} entries)",
        index, date, len
    ))
}
