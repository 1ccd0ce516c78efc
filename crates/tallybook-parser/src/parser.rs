//! Line-based codec for the tab-separated backing file

use crate::error::ParseError;
use crate::types::{DirectionTokens, Transaction};

const FIELD_COUNT: usize = 6;

/// Result of parsing a whole file: the records that survived plus one
/// diagnostic per skipped line
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedLedger {
    pub transactions: Vec<Transaction>,
    pub diagnostics: Vec<ParseError>,
}

/// Reads and writes `date\ttime\tdirection\tcategory\tamount\tcounterparty` lines
#[derive(Debug, Clone, Default)]
pub struct TsvCodec {
    tokens: DirectionTokens,
}

impl TsvCodec {
    pub fn new(tokens: DirectionTokens) -> Self {
        Self { tokens }
    }

    /// Parse file content. Never fails; bad lines become diagnostics.
    pub fn parse(&self, content: &str) -> ParsedLedger {
        let mut parsed = ParsedLedger::default();

        for (index, line) in content.lines().enumerate() {
            // Line number is 1-indexed
            match self.parse_line(line, index + 1) {
                Ok(transaction) => parsed.transactions.push(transaction),
                Err(diagnostic) => parsed.diagnostics.push(diagnostic),
            }
        }

        parsed
    }

    /// Parse a single line
    pub fn parse_line(&self, line: &str, line_number: usize) -> Result<Transaction, ParseError> {
        let parts: Vec<&str> = line.trim().split('\t').collect();
        if parts.len() != FIELD_COUNT {
            return Err(ParseError::FieldCount { line: line_number, found: parts.len() });
        }

        let amount = parts[4].trim().parse::<f64>().map_err(|_| ParseError::InvalidAmount {
            line: line_number,
            value: parts[4].to_string(),
        })?;

        Ok(Transaction {
            date: parts[0].to_string(),
            time: parts[1].to_string(),
            direction: self.tokens.decode(parts[2]),
            category: parts[3].to_string(),
            amount,
            counterparty: parts[5].to_string(),
        })
    }

    /// Render one record as a line, without the trailing newline
    pub fn render_line(&self, transaction: &Transaction) -> String {
        let amount = format_amount(transaction.amount);
        [
            transaction.date.as_str(),
            transaction.time.as_str(),
            self.tokens.encode(&transaction.direction),
            transaction.category.as_str(),
            amount.as_str(),
            transaction.counterparty.as_str(),
        ]
        .join("\t")
    }

    /// Render records as file content, one line each
    pub fn render(&self, transactions: &[Transaction]) -> String {
        let mut content = String::new();
        for transaction in transactions {
            content.push_str(&self.render_line(transaction));
            content.push('\n');
        }
        content
    }
}

/// Shortest round-trip decimal form, always with a fractional part
/// (`50000.0`, `0.1`)
pub fn format_amount(amount: f64) -> String {
    format!("{:?}", amount)
}

// ==================== Tests ====================
