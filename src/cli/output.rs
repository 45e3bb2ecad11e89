use colored::Colorize;
use std::fmt;

use crate::{core::ExpenseSession, currency::format_display, errors::Result};

pub fn section(title: impl fmt::Display) -> String {
    format!("=== {} ===", title.to_string().trim()).bold().to_string()
}

pub fn success(message: impl fmt::Display) -> String {
    format!("{} {}", "[ok]".green(), message)
}

pub fn warning(message: impl fmt::Display) -> String {
    format!("{} {}", "[!]".yellow(), message)
}

/// Heading plus the three aggregation windows for the selected date.
pub fn render_summary(session: &ExpenseSession, prefix: &str) -> Result<String> {
    let totals = session.totals()?;
    let mut lines = vec![section(session.day_week_label())];
    lines.push(format!("Date:  {}", session.selected_date().format("%d-%m-%Y")));
    lines.push(format!("Day:   {}", format_display(prefix, totals.day)));
    lines.push(format!("Week:  {}", format_display(prefix, totals.week)));
    lines.push(format!("Month: {}", format_display(prefix, totals.month)));
    Ok(lines.join("\n"))
}

/// Numbered entries for the selected date, numbering from 1.
pub fn render_entries(session: &ExpenseSession, prefix: &str) -> String {
    let entries = session.entries();
    let mut lines = vec![section(session.selected_date().format("%A %d-%m-%Y"))];
    if entries.is_empty() {
        lines.push("No entries recorded.".dimmed().to_string());
    }
    for (index, entry) in entries.iter().enumerate() {
        let mut line = format!(
            "{:>3}. [{}] {} -> {}  {}",
            index + 1,
            entry.category,
            entry.name,
            entry.recipient,
            format_display(prefix, entry.amount)
        );
        if !entry.comment.is_empty() {
            line.push_str(&format!("  ({})", entry.comment));
        }
        lines.push(line);
    }
    lines.push(format!(
        "Total: {}",
        format_display(prefix, session.view_bucket().total_amount())
    ));
    lines.join("\n")
}
