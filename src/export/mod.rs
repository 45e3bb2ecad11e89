//! Delimited-text reports built from the ledger.

pub mod report;

pub use report::{default_report_name, escape_field, render_csv, CsvExporter, CSV_HEADER};
