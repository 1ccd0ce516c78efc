//! Transaction file codec
//!
//! The backing file holds one transaction per line as six tab-separated
//! fields: `date`, `time`, `direction`, `category`, `amount`, `counterparty`.

pub mod error;
pub mod types;
pub mod parser;

pub use error::ParseError;
pub use parser::{format_amount, ParsedLedger, TsvCodec};
pub use types::{Direction, DirectionTokens, Transaction};
