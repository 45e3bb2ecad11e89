mod common;

use std::error::Error;

use chrono::NaiveDateTime;
use common::{date, entry, setup_session};
use expenditure_core::{BucketState, ExpenseError, PeriodTotals};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

#[test]
fn fresh_session_shows_transient_empty_day() -> Result<(), Box<dyn Error>> {
    let (session, _temp) = setup_session(date(2024, 3, 6));
    assert_eq!(session.bucket_state(date(2024, 3, 6)), BucketState::Transient);
    assert!(session.entries().is_empty());
    assert_eq!(session.totals()?, PeriodTotals::default());
    assert!(!session.is_dirty());
    assert_eq!(session.day_week_label(), "Wednesday, Week Number 9");
    Ok(())
}

#[test]
fn first_entry_promotes_the_bucket() -> Result<(), Box<dyn Error>> {
    let (mut session, _temp) = setup_session(date(2024, 3, 6));
    let totals = session.add_entry(entry("Lunch", "Food", dec!(12.50)))?;
    assert_eq!(totals.day, dec!(12.50));
    assert_eq!(session.bucket_state(date(2024, 3, 6)), BucketState::Persisted);
    assert!(session.is_dirty());
    assert_eq!(session.ledger().len(), 1);
    Ok(())
}

#[test]
fn selection_drives_all_three_totals() -> Result<(), Box<dyn Error>> {
    let (mut session, _temp) = setup_session(date(2024, 3, 3));
    session.add_entry(entry("Market", "Food", dec!(40)))?;
    session.select_date(date(2024, 3, 6))?;
    session.add_entry(entry("Lunch", "Food", dec!(12.50)))?;
    session.select_date(date(2024, 3, 20))?;
    session.add_entry(entry("Fuel", "Transport", dec!(60)))?;

    let totals = session.select_date(date(2024, 3, 6))?;
    assert_eq!(totals.day, dec!(12.50));
    assert_eq!(totals.week, dec!(52.50));
    assert_eq!(totals.month, dec!(112.50));

    let totals = session.select_date(date(2024, 3, 10))?;
    assert_eq!(totals.day, Decimal::ZERO);
    assert_eq!(totals.week, Decimal::ZERO);
    assert_eq!(totals.month, dec!(112.50));
    Ok(())
}

#[test]
fn time_of_day_is_ignored_on_selection() -> Result<(), Box<dyn Error>> {
    let (mut session, _temp) = setup_session(date(2024, 3, 6));
    session.add_entry(entry("Lunch", "Food", dec!(12.50)))?;
    let evening = NaiveDateTime::parse_from_str("2024-03-06 21:45:10", "%Y-%m-%d %H:%M:%S")?;
    let totals = session.select_datetime(evening)?;
    assert_eq!(session.selected_date(), date(2024, 3, 6));
    assert_eq!(totals.day, dec!(12.50));
    Ok(())
}

#[test]
fn editing_in_place_requires_commit_to_refresh_total() -> Result<(), Box<dyn Error>> {
    let (mut session, _temp) = setup_session(date(2024, 3, 6));
    session.add_entry(entry("Lunch", "Food", dec!(12.50)))?;
    session.entry_mut(0)?.amount = dec!(15);
    assert_eq!(session.view_bucket().total_amount(), dec!(12.50));
    let totals = session.commit_edit()?;
    assert_eq!(totals.day, dec!(15));
    assert_eq!(session.view_bucket().total_amount(), dec!(15));
    Ok(())
}

#[test]
fn removal_by_position_updates_totals() -> Result<(), Box<dyn Error>> {
    let (mut session, _temp) = setup_session(date(2024, 3, 6));
    session.add_entry(entry("A", "Food", dec!(1)))?;
    session.add_entry(entry("B", "Food", dec!(2)))?;
    session.add_entry(entry("C", "Food", dec!(4)))?;
    let removed = session.remove_entry(1)?;
    assert_eq!(removed.name, "B");
    assert_eq!(session.day_total(), dec!(5));
    let names: Vec<_> = session.entries().iter().map(|e| e.name.clone()).collect();
    assert_eq!(names, ["A", "C"]);

    let err = session.remove_entry(7).expect_err("out of range");
    assert!(matches!(err, ExpenseError::InvalidReference(_)));
    assert_eq!(session.entries().len(), 2);
    Ok(())
}

#[test]
fn commit_on_untouched_transient_day_stores_nothing() -> Result<(), Box<dyn Error>> {
    let (mut session, _temp) = setup_session(date(2024, 3, 6));
    session.commit_edit()?;
    assert_eq!(session.bucket_state(date(2024, 3, 6)), BucketState::Transient);
    assert!(session.ledger().is_empty());
    assert!(!session.is_dirty());
    Ok(())
}

#[test]
fn emptied_stored_day_stays_stored() -> Result<(), Box<dyn Error>> {
    let (mut session, _temp) = setup_session(date(2024, 3, 6));
    session.add_entry(entry("Lunch", "Food", dec!(12.50)))?;
    session.remove_entry(0)?;
    assert_eq!(session.bucket_state(date(2024, 3, 6)), BucketState::Persisted);
    assert_eq!(session.day_total(), Decimal::ZERO);
    Ok(())
}

#[test]
fn explicit_save_path_becomes_session_path() -> Result<(), Box<dyn Error>> {
    let (mut session, temp) = setup_session(date(2024, 3, 6));
    session.add_entry(entry("Lunch", "Food", dec!(12.50)))?;
    let custom = temp.path().join("elsewhere.json");
    session.save(Some(custom.as_path()))?;
    assert_eq!(session.save_path(), Some(custom.as_path()));
    assert_eq!(session.resolve_path(), custom);
    Ok(())
}

#[test]
fn overflowing_entry_is_rejected_and_rolled_back() -> Result<(), Box<dyn Error>> {
    let (mut session, _temp) = setup_session(date(2024, 3, 6));
    session.add_entry(entry("Huge", "Misc", Decimal::MAX))?;
    session.save(None)?;

    let err = session
        .add_entry(entry("One", "Misc", dec!(1)))
        .expect_err("day total leaves the decimal range");
    assert!(matches!(err, ExpenseError::InvalidInput(_)));
    assert_eq!(session.entries().len(), 1);
    assert_eq!(session.day_total(), Decimal::MAX);
    assert!(!session.is_dirty());
    Ok(())
}

#[test]
fn overflowing_week_keeps_the_new_day_absent() -> Result<(), Box<dyn Error>> {
    let (mut session, _temp) = setup_session(date(2024, 3, 4));
    session.add_entry(entry("Huge", "Misc", Decimal::MAX))?;
    session.select_date(date(2024, 3, 5))?;

    assert!(session.add_entry(entry("One", "Misc", dec!(1))).is_err());
    assert_eq!(session.bucket_state(date(2024, 3, 5)), BucketState::Transient);
    assert!(session.entries().is_empty());
    assert_eq!(session.ledger().len(), 1);
    Ok(())
}
