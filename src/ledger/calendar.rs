//! Date-key normalization and the Sunday-start week arithmetic used by the
//! aggregation windows.

use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveDateTime};

const STORED_DATE_FORMAT: &str = "%Y-%m-%d";
const STORED_DATETIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

/// Strips the time-of-day component so dates compare as bucket keys.
pub fn normalize(moment: NaiveDateTime) -> NaiveDate {
    moment.date()
}

/// Sunday on or before `date`.
pub fn week_start(date: NaiveDate) -> NaiveDate {
    let offset = date.weekday().num_days_from_sunday() as i64;
    date - Duration::days(offset)
}

/// Inclusive Sunday..Saturday bounds of the week containing `date`.
pub fn week_bounds(date: NaiveDate) -> (NaiveDate, NaiveDate) {
    let start = week_start(date);
    (start, start + Duration::days(6))
}

/// The seven dates of the week containing `date`, Sunday first.
pub fn week_dates(date: NaiveDate) -> impl Iterator<Item = NaiveDate> {
    let start = week_start(date);
    (0..7).map(move |offset| start + Duration::days(offset))
}

pub fn same_month(a: NaiveDate, b: NaiveDate) -> bool {
    a.year() == b.year() && a.month() == b.month()
}

/// Week number where weeks start on Sunday and week 1 is the first full week
/// of the year. Days before that week count toward the previous year's last
/// week.
pub fn week_of_year(date: NaiveDate) -> u32 {
    let mut start = first_full_week_start(date);
    if date < start {
        let last_year = date.with_ordinal(1).unwrap_or(date) - Duration::days(1);
        start = first_full_week_start(last_year);
    }
    ((date - start).num_days() / 7 + 1) as u32
}

fn first_full_week_start(date: NaiveDate) -> NaiveDate {
    let jan_first = date.with_ordinal(1).unwrap_or(date);
    let offset = (7 - jan_first.weekday().num_days_from_sunday()) % 7;
    jan_first + Duration::days(offset as i64)
}

/// Heading shown above a selected day, e.g. `Wednesday, Week Number 9`.
pub fn day_week_label(date: NaiveDate) -> String {
    format!("{}, Week Number {}", date.format("%A"), week_of_year(date))
}

/// Accepts the stored `YYYY-MM-DDT00:00:00` form, date-times carrying
/// fractional seconds or an offset, and bare dates.
pub fn parse_stored_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if let Ok(moment) = DateTime::parse_from_rfc3339(raw) {
        return Some(moment.date_naive());
    }
    if let Ok(moment) = NaiveDateTime::parse_from_str(raw, STORED_DATETIME_FORMAT) {
        return Some(normalize(moment));
    }
    NaiveDate::parse_from_str(raw, STORED_DATE_FORMAT).ok()
}

pub fn format_stored_date(date: NaiveDate) -> String {
    format!("{}T00:00:00", date.format(STORED_DATE_FORMAT))
}

/// Serde adapter writing bucket dates as midnight date-times.
pub mod stored_date {
    use chrono::NaiveDate;
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&super::format_stored_date(*date))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        super::parse_stored_date(&raw)
            .ok_or_else(|| de::Error::custom(format!("unrecognised date `{raw}`")))
    }
}
