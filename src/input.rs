//! Validation of transaction fields typed on the command line

use anyhow::{anyhow, bail, Result};
use chrono::NaiveDateTime;
use tallybook_core::time::{parse_date, parse_time};
use tallybook_core::{Direction, Transaction};

use crate::args::TransactionFields;

pub const DEFAULT_CATEGORY: &str = "Uncategorized";
pub const DEFAULT_COUNTERPARTY: &str = "Unknown";

pub fn validate_date(value: &str) -> Result<String> {
    let value = value.trim();
    if parse_date(value).is_none() {
        bail!("Invalid date '{}': expected an existing YYYY-MM-DD date", value);
    }
    Ok(value.to_string())
}

/// Validate `H:M` and zero-pad it to `HH:MM`
pub fn normalize_time(value: &str) -> Result<String> {
    let (hour, minute) =
        parse_time(value).ok_or_else(|| anyhow!("Invalid time '{}': expected HH:MM between 00:00 and 23:59", value))?;
    Ok(format!("{:02}:{:02}", hour, minute))
}

pub fn parse_direction(value: &str) -> Result<Direction> {
    value.parse::<Direction>().map_err(|e| anyhow!(e))
}

pub fn parse_amount(value: &str) -> Result<f64> {
    let amount: f64 = value
        .trim()
        .parse()
        .map_err(|_| anyhow!("Invalid amount '{}': expected a number", value.trim()))?;
    if !amount.is_finite() || amount < 0.0 {
        bail!("Invalid amount '{}': must be a finite, non-negative number", value.trim());
    }
    Ok(amount)
}

/// Free text for category and counterparty; blank input takes `default`
pub fn clean_text(field: &str, value: &str, default: &str) -> Result<String> {
    if value.contains(['\t', '\n', '\r']) {
        bail!("Invalid {}: tabs and line breaks are not allowed", field);
    }
    let value = value.trim();
    Ok(if value.is_empty() { default.to_string() } else { value.to_string() })
}

/// Build a new transaction, taking date and time from `now` when unset
pub fn new_transaction(fields: &TransactionFields, now: NaiveDateTime) -> Result<Transaction> {
    let date = match &fields.date {
        Some(value) => validate_date(value)?,
        None => now.format("%Y-%m-%d").to_string(),
    };
    let time = match &fields.time {
        Some(value) => normalize_time(value)?,
        None => now.format("%H:%M").to_string(),
    };
    let direction = parse_direction(fields.direction.as_deref().ok_or_else(|| anyhow!("--direction is required"))?)?;
    let amount = parse_amount(fields.amount.as_deref().ok_or_else(|| anyhow!("--amount is required"))?)?;
    let category = clean_text("category", fields.category.as_deref().unwrap_or_default(), DEFAULT_CATEGORY)?;
    let counterparty = clean_text(
        "counterparty",
        fields.counterparty.as_deref().unwrap_or_default(),
        DEFAULT_COUNTERPARTY,
    )?;

    Ok(Transaction::new(date, time, direction, category, amount, counterparty))
}

/// Overlay the set fields onto `current`. Blank text keeps the current value.
pub fn updated_transaction(current: &Transaction, fields: &TransactionFields) -> Result<Transaction> {
    let mut updated = current.clone();
    if let Some(value) = &fields.date {
        updated.date = validate_date(value)?;
    }
    if let Some(value) = &fields.time {
        updated.time = normalize_time(value)?;
    }
    if let Some(value) = &fields.direction {
        updated.direction = parse_direction(value)?;
    }
    if let Some(value) = &fields.category {
        updated.category = clean_text("category", value, &current.category)?;
    }
    if let Some(value) = &fields.amount {
        updated.amount = parse_amount(value)?;
    }
    if let Some(value) = &fields.counterparty {
        updated.counterparty = clean_text("counterparty", value, &current.counterparty)?;
    }
    Ok(updated)
}

/// Convert a 1-based number as shown by `list` to an index
pub fn index(number: usize) -> Result<usize> {
    number.checked_sub(1).ok_or_else(|| anyhow!("Transaction numbers start at 1"))
}
