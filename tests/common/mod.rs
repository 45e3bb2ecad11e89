#![allow(dead_code)]

use chrono::NaiveDate;
use expenditure_core::{
    core::ExpenseSession, export::CsvExporter, storage::JsonStorage, Entry,
};
use rust_decimal::Decimal;
use tempfile::TempDir;

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

pub fn entry(name: &str, category: &str, amount: Decimal) -> Entry {
    Entry::new(name, category, "Shop", amount)
}

/// Session whose default ledger path lives inside a fresh temp dir. Keep the
/// returned guard alive for the duration of the test.
pub fn setup_session(selected: NaiveDate) -> (ExpenseSession, TempDir) {
    let temp = TempDir::new().expect("create temp dir");
    let storage = JsonStorage::new(Some(temp.path().join("ExpenditureManager")), None);
    let session = ExpenseSession::new(Box::new(storage), CsvExporter::default(), selected);
    (session, temp)
}
