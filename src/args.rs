use clap::{Args as ClapArgs, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Track income and expenses in a tab-separated text file.
#[derive(Parser, Debug)]
#[command(name = "tallybook")]
#[command(version = "0.1.0")]
#[command(about = "A single-user personal finance ledger", long_about = None)]
pub struct Args {
    /// Configuration file path (defaults apply when it doesn't exist)
    #[arg(short, long, default_value = "tallybook.yaml", global = true)]
    pub config: PathBuf,

    /// Backing file, overriding the configured one
    #[arg(short, long, global = true)]
    pub file: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text, global = true)]
    pub format: OutputFormat,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print all transactions, numbered in file order
    List,

    /// Add a transaction; date and time default to now
    Add(TransactionFields),

    /// Change fields of the transaction with the given number
    Update {
        /// Number as shown by `list`
        number: usize,
        #[command(flatten)]
        fields: TransactionFields,
    },

    /// Delete the transaction with the given number
    Delete {
        /// Number as shown by `list`
        number: usize,
    },

    /// Income over the last N days before the latest recorded date
    Income { days: u32 },

    /// Expenses in one category (case-sensitive)
    Category { name: String },

    /// Expenses made between two times of day (HH:MM, inclusive)
    Interval { start: String, end: String },

    /// Print the default configuration file
    InitConfig,
}

/// Transaction fields given on the command line; unset fields are `None`
#[derive(Debug, Clone, Default, ClapArgs)]
pub struct TransactionFields {
    /// Date as YYYY-MM-DD
    #[arg(long)]
    pub date: Option<String>,

    /// Time as HH:MM
    #[arg(long)]
    pub time: Option<String>,

    /// income or expense
    #[arg(long)]
    pub direction: Option<String>,

    #[arg(long)]
    pub category: Option<String>,

    /// Non-negative amount, e.g. 1250 or 99.90
    #[arg(long, allow_hyphen_values = true)]
    pub amount: Option<String>,

    /// Who paid or got paid
    #[arg(long)]
    pub counterparty: Option<String>,
}

pub fn parse() -> Args {
    Args::parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_update() {
        let args = Args::try_parse_from([
            "tallybook", "--format", "json", "update", "3", "--amount", "12.5", "--category", "food",
        ])
        .unwrap();

        assert_eq!(args.format, OutputFormat::Json);
        assert_eq!(args.config, PathBuf::from("tallybook.yaml"));
        match args.command {
            Command::Update { number, fields } => {
                assert_eq!(number, 3);
                assert_eq!(fields.amount.as_deref(), Some("12.5"));
                assert_eq!(fields.category.as_deref(), Some("food"));
                assert!(fields.date.is_none());
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_parse_interval_with_file() {
        let args = Args::try_parse_from(["tallybook", "interval", "12:00", "14:00", "--file", "ledger.txt"]).unwrap();

        assert_eq!(args.file, Some(PathBuf::from("ledger.txt")));
        assert!(matches!(args.command, Command::Interval { ref start, ref end } if start == "12:00" && end == "14:00"));
    }

    #[test]
    fn test_income_days_must_be_number() {
        assert!(Args::try_parse_from(["tallybook", "income", "-3"]).is_err());
        assert!(Args::try_parse_from(["tallybook", "income", "week"]).is_err());
    }

    #[test]
    fn test_cli_definition_is_consistent() {
        use clap::CommandFactory;
        Args::command().debug_assert();
    }
}
