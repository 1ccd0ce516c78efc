//! Record types stored in the backing file

use serde::{Deserialize, Serialize};
use tallybook_config::LedgerConfig;

/// Whether money came in or went out
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Income,
    Expense,
    /// Token read from disk that matches neither configured token
    Other(String),
}

impl Direction {
    pub fn is_income(&self) -> bool {
        matches!(self, Direction::Income)
    }

    pub fn is_expense(&self) -> bool {
        matches!(self, Direction::Expense)
    }
}

impl std::str::FromStr for Direction {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "income" => Ok(Direction::Income),
            "expense" => Ok(Direction::Expense),
            _ => Err(format!("Invalid direction: {} (expected income or expense)", s)),
        }
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Direction::Income => write!(f, "income"),
            Direction::Expense => write!(f, "expense"),
            Direction::Other(token) => write!(f, "{}", token),
        }
    }
}

/// Literal tokens used for [`Direction`] on disk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectionTokens {
    pub income: String,
    pub expense: String,
}

impl Default for DirectionTokens {
    fn default() -> Self {
        Self::from(&LedgerConfig::default())
    }
}

impl From<&LedgerConfig> for DirectionTokens {
    fn from(config: &LedgerConfig) -> Self {
        Self {
            income: config.income_token.clone(),
            expense: config.expense_token.clone(),
        }
    }
}

impl DirectionTokens {
    /// Map a stored token to a direction. Matching is exact.
    pub fn decode(&self, token: &str) -> Direction {
        if token == self.income {
            Direction::Income
        } else if token == self.expense {
            Direction::Expense
        } else {
            Direction::Other(token.to_string())
        }
    }

    pub fn encode<'a>(&'a self, direction: &'a Direction) -> &'a str {
        match direction {
            Direction::Income => &self.income,
            Direction::Expense => &self.expense,
            Direction::Other(token) => token,
        }
    }
}

/// One ledger entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Transaction date (YYYY-MM-DD)
    pub date: String,
    /// Transaction time (HH:MM)
    pub time: String,
    pub direction: Direction,
    pub category: String,
    /// Non-negative amount
    pub amount: f64,
    pub counterparty: String,
}

impl Transaction {
    pub fn new(
        date: impl Into<String>,
        time: impl Into<String>,
        direction: Direction,
        category: impl Into<String>,
        amount: f64,
        counterparty: impl Into<String>,
    ) -> Self {
        Self {
            date: date.into(),
            time: time.into(),
            direction,
            category: category.into(),
            amount,
            counterparty: counterparty.into(),
        }
    }

    /// Get a summary string
    pub fn summary(&self) -> String {
        format!("{} {} {} {} ({})", self.date, self.time, self.direction, self.amount, self.counterparty)
    }
}
