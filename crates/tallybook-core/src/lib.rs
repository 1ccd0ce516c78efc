//! Core ledger processing: storage, ordering, date arithmetic and reports

pub mod error;
pub mod reports;
pub mod seed;
pub mod sort;
pub mod store;
pub mod time;

pub use error::{CoreError, CoreResult, ErrorCode, ErrorDetails, ErrorSeverity};
pub use reports::{
    expenses_by_category, expenses_in_interval, income_last_n_days, CategoryReport, IncomeReport, IntervalReport,
};
pub use sort::{heap_sort_by, heap_sort_by_key, SortOrder};
pub use store::TransactionStore;

pub use tallybook_parser::{Direction, Transaction};
