#![doc(test(attr(deny(warnings))))]

//! Expenditure Core tracks spending per calendar day and derives day,
//! Sunday-start week, and calendar month totals, with JSON persistence and a
//! CSV report export.

pub mod cli;
pub mod config;
pub mod core;
pub mod currency;
pub mod errors;
pub mod export;
pub mod ledger;
pub mod storage;
pub mod utils;

pub use crate::core::{ExpenseSession, LoadMetadata};
pub use errors::{ExpenseError, Result};
pub use ledger::{BucketState, DayBucket, Entry, Ledger, PeriodTotals};

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Expenditure Core tracing initialized.");
    });
}
