//! The three ledger reports
//!
//! Every report filters a slice of transactions into a fresh list and orders
//! it with the heap sort. An empty `entries` list means nothing matched.

use std::cmp::Reverse;

use serde::{Deserialize, Serialize};
use tallybook_parser::Transaction;

use crate::error::{CoreError, CoreResult};
use crate::sort::{compare_keys, heap_sort_by, heap_sort_by_key, SortOrder};
use crate::time::{clock_minutes, latest_valid_date, parse_date, parse_time, subtract_days, INVALID_DATE_KEY};

/// Income received during the last `days` days before the latest date
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IncomeReport {
    pub days: u32,
    /// Inclusive lower bound
    pub start_date: String,
    /// Latest valid date in the ledger
    pub end_date: String,
    pub entries: Vec<Transaction>,
}

/// Expenses in a single category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryReport {
    pub category: String,
    pub entries: Vec<Transaction>,
}

/// Expenses made between two times of day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntervalReport {
    pub start: String,
    pub end: String,
    /// `start` is later in the day than `end`, so nothing matched
    pub inverted: bool,
    pub entries: Vec<Transaction>,
}

macro_rules! impl_report {
    ($($report:ty),*) => {
        $(
            impl $report {
                pub fn is_empty(&self) -> bool {
                    self.entries.is_empty()
                }

                /// Sum of all entry amounts
                pub fn total(&self) -> f64 {
                    self.entries.iter().map(|t| t.amount).sum()
                }
            }
        )*
    };
}

impl_report!(IncomeReport, CategoryReport, IntervalReport);

/// Date component of the report orderings: newest first, malformed last
type DateRank = (bool, Reverse<(i32, u32, u32)>);

fn date_rank(transaction: &Transaction) -> DateRank {
    match parse_date(&transaction.date) {
        Some(ymd) => (false, Reverse(ymd)),
        None => (true, Reverse(INVALID_DATE_KEY)),
    }
}

fn income_key(transaction: &Transaction) -> (DateRank, Reverse<f64>) {
    (date_rank(transaction), Reverse(transaction.amount))
}

fn category_key(transaction: &Transaction) -> (DateRank, &str, Reverse<f64>) {
    (date_rank(transaction), transaction.counterparty.as_str(), Reverse(transaction.amount))
}

fn interval_key(transaction: &Transaction) -> (Reverse<f64>, &str) {
    (Reverse(transaction.amount), transaction.counterparty.as_str())
}

/// Income for the last `days` days, counted back from the latest valid date
/// in `transactions`.
///
/// A record qualifies when its date is not before the start date; dates
/// compare as strings, which is chronological for `YYYY-MM-DD`.
pub fn income_last_n_days(transactions: &[Transaction], days: u32) -> CoreResult<IncomeReport> {
    let end_date = latest_valid_date(transactions).ok_or(CoreError::NoValidDates)?;
    let start_date = subtract_days(&end_date, days)
        .ok_or_else(|| CoreError::invalid_input(format!("cannot go back {} days from {}", days, end_date)))?;

    let mut entries: Vec<Transaction> = transactions
        .iter()
        .filter(|t| t.direction.is_income() && t.date.as_str() >= start_date.as_str())
        .cloned()
        .collect();
    heap_sort_by_key(&mut entries, income_key, SortOrder::Ascending);

    log::debug!("Income since {}: {} entries", start_date, entries.len());
    Ok(IncomeReport {
        days,
        start_date,
        end_date,
        entries,
    })
}

/// Expenses whose category matches `category` exactly (case-sensitive)
pub fn expenses_by_category(transactions: &[Transaction], category: &str) -> CategoryReport {
    let mut entries: Vec<Transaction> = transactions
        .iter()
        .filter(|t| t.direction.is_expense() && t.category == category)
        .cloned()
        .collect();
    heap_sort_by(
        &mut entries,
        |a, b| compare_keys(&category_key(a), &category_key(b)),
        SortOrder::Ascending,
    );

    CategoryReport {
        category: category.to_string(),
        entries,
    }
}

/// Expenses whose time of day lies within `[start, end]`, both `HH:MM`.
///
/// The range never wraps past midnight.
pub fn expenses_in_interval(transactions: &[Transaction], start: &str, end: &str) -> CoreResult<IntervalReport> {
    let (from, to) = match (parse_time(start), parse_time(end)) {
        (Some((h1, m1)), Some((h2, m2))) => (i64::from(h1 * 60 + m1), i64::from(h2 * 60 + m2)),
        (None, _) => return Err(CoreError::invalid_input(format!("'{}' is not a valid HH:MM time", start))),
        (_, None) => return Err(CoreError::invalid_input(format!("'{}' is not a valid HH:MM time", end))),
    };

    let inverted = from > to;
    if inverted {
        log::warn!("Interval start {} is after end {}; no wraparound is applied", start, end);
    }

    let mut entries: Vec<Transaction> = transactions
        .iter()
        .filter(|t| t.direction.is_expense())
        .filter(|t| clock_minutes(&t.time).map_or(false, |m| from <= m && m <= to))
        .cloned()
        .collect();
    heap_sort_by(
        &mut entries,
        |a, b| compare_keys(&interval_key(a), &interval_key(b)),
        SortOrder::Ascending,
    );

    Ok(IntervalReport {
        start: start.to_string(),
        end: end.to_string(),
        inverted,
        entries,
    })
}

// ==================== Tests ====================
