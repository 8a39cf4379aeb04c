//! Output formatting utilities.

use chrono::{DateTime, Utc};
use colored::Colorize;
use serde::Serialize;
use tabled::{
    settings::{object::Columns, Alignment, Modify, Style},
    Table, Tabled,
};

/// Placeholder for values the payloads did not provide.
pub const MISSING: &str = "n/a";

/// Prints data as a formatted table.
pub fn print_table<T: Tabled>(data: &[T]) {
    if data.is_empty() {
        println!("No results.");
        return;
    }

    let table = Table::new(data)
        .with(Style::rounded())
        .with(Modify::new(Columns::first()).with(Alignment::left()))
        .to_string();

    println!("{}", table);
}

/// Prints any serializable value as pretty JSON.
pub fn print_json<T: Serialize>(data: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(data)?);
    Ok(())
}

/// Formats a fractional return (0.0123) as a percentage string.
pub fn format_percent(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{:.2}%", v * 100.0),
        None => MISSING.to_string(),
    }
}

/// Formats a currency amount.
pub fn format_amount(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{:.2}", v),
        None => MISSING.to_string(),
    }
}

/// Formats epoch milliseconds as a UTC timestamp.
pub fn format_timestamp(millis: Option<i64>) -> String {
    millis
        .and_then(DateTime::<Utc>::from_timestamp_millis)
        .map(|t| t.format("%Y-%m-%d %H:%M UTC").to_string())
        .unwrap_or_else(|| MISSING.to_string())
}

/// Prints a success message.
pub fn print_success(message: &str) {
    println!("{} {}", "✓".green(), message);
}

/// Prints a warning message.
pub fn print_warning(message: &str) {
    eprintln!("{} {}", "⚠".yellow(), message);
}

/// Prints an info message.
pub fn print_info(message: &str) {
    println!("{} {}", "ℹ".blue(), message);
}

/// A key-value pair for display.
#[derive(Debug, Clone, Serialize, Tabled)]
pub struct KeyValue {
    #[tabled(rename = "Metric")]
    pub key: String,
    #[tabled(rename = "Value")]
    pub value: String,
}

impl KeyValue {
    /// Creates a new key-value pair.
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }

    /// Creates a key-value pair formatted as percentage.
    pub fn from_percent(key: impl Into<String>, value: Option<f64>) -> Self {
        Self::new(key, format_percent(value))
    }

    /// Creates a key-value pair formatted as an amount.
    pub fn from_amount(key: impl Into<String>, value: Option<f64>) -> Self {
        Self::new(key, format_amount(value))
    }
}

/// Prints a header for a section.
pub fn print_header(title: &str) {
    println!("\n{}", title.bold().underline());
}
