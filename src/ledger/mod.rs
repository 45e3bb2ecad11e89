//! Ledger domain models, aggregation windows, and date helpers.

pub mod calendar;
pub mod day_bucket;
pub mod entry;
#[allow(clippy::module_inception)]
pub mod ledger;

pub use day_bucket::DayBucket;
pub use entry::Entry;
pub use ledger::{BucketState, Ledger, PeriodTotals, ViewBucket};
