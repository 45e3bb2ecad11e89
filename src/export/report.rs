use std::{io::Write, path::Path};

use chrono::NaiveDate;
use csv::{QuoteStyle, Terminator, WriterBuilder};

use crate::{
    currency::{format_plain, DEFAULT_CURRENCY_PREFIX},
    errors::{ExpenseError, Result},
    ledger::Ledger,
    storage::json_backend::write_atomic,
};

pub const CSV_HEADER: [&str; 6] = ["Date", "Category", "Name", "Recipient", "Amount", "Comment"];
const CSV_DATE_FORMAT: &str = "%d-%m-%Y";

/// Flattens every stored entry into one report row.
///
/// Text fields are trimmed and embedded quotes doubled, but fields are never
/// wrapped in quotes, so a comma inside a field shifts the columns of that
/// row. Spreadsheets importing older reports rely on this exact layout.
/// Lines end with a bare `\n` on every platform, never `\r\n`.
#[derive(Debug, Clone)]
pub struct CsvExporter {
    currency_prefix: String,
}

impl Default for CsvExporter {
    fn default() -> Self {
        Self::new(DEFAULT_CURRENCY_PREFIX)
    }
}

impl CsvExporter {
    pub fn new(currency_prefix: impl Into<String>) -> Self {
        Self {
            currency_prefix: currency_prefix.into(),
        }
    }

    /// Writes the header and one row per entry, buckets in stored order.
    /// Returns the number of entry rows.
    pub fn write_to<W: Write>(&self, ledger: &Ledger, writer: W) -> Result<(usize, W)> {
        let mut out = WriterBuilder::new()
            .quote_style(QuoteStyle::Never)
            .terminator(Terminator::Any(b'\n'))
            .from_writer(writer);
        out.write_record(CSV_HEADER)?;
        let mut rows = 0;
        for bucket in ledger.buckets() {
            let date = bucket.date.format(CSV_DATE_FORMAT).to_string();
            for entry in bucket.entries() {
                let row: [String; 6] = [
                    date.clone(),
                    escape_field(&entry.category),
                    escape_field(&entry.name),
                    escape_field(&entry.recipient),
                    format_plain(&self.currency_prefix, entry.amount),
                    escape_field(&entry.comment),
                ];
                out.write_record(&row)?;
                rows += 1;
            }
        }
        let writer = out
            .into_inner()
            .map_err(|err| ExpenseError::Csv(err.into_error().into()))?;
        Ok((rows, writer))
    }

    pub fn render(&self, ledger: &Ledger) -> Result<String> {
        let (_, bytes) = self.write_to(ledger, Vec::new())?;
        String::from_utf8(bytes).map_err(|err| ExpenseError::InvalidInput(err.to_string()))
    }

    /// Writes the report to `path` through a temp file so a failed export
    /// never leaves a truncated report behind.
    pub fn export(&self, ledger: &Ledger, path: &Path) -> Result<usize> {
        let (rows, bytes) = self.write_to(ledger, Vec::new())?;
        write_atomic(path, &bytes)?;
        tracing::info!(path = %path.display(), rows, "exported expenditure report");
        Ok(rows)
    }
}

/// Report text using the default `RM` prefix.
pub fn render_csv(ledger: &Ledger) -> Result<String> {
    CsvExporter::default().render(ledger)
}

/// Trims surrounding whitespace and doubles embedded double quotes.
pub fn escape_field(value: &str) -> String {
    value.trim().replace('"', "\"\"")
}

/// Suggested file name for a report produced on `today`.
pub fn default_report_name(today: NaiveDate) -> String {
    format!("My Budget Report as of {}.csv", today.format("%Y-%m-%d"))
}
