use anyhow::{anyhow, Context as _, Result};
use serde::Serialize;
use std::path::Path;
use tallybook_config::{Config, ConfigError};
use tallybook_core::{
    expenses_by_category, expenses_in_interval, income_last_n_days, Transaction, TransactionStore,
};
use tallybook_utils::{format_money, format_number, pad_left, pad_right};

use crate::args::{Args, Command, OutputFormat, TransactionFields};
use crate::input;

pub fn main(args: Args) -> Result<()> {
    if let Command::InitConfig = args.command {
        print!("{}", Config::generate_default());
        return Ok(());
    }

    let mut config = load_config(&args.config)?;
    init_logging(&config.logging.level);

    if let Some(file) = &args.file {
        override_ledger_file(&mut config, file)?;
    }

    let cli = Cli::new(&config, args.format)?;
    match args.command {
        Command::List => cli.main_list(),
        Command::Add(fields) => cli.main_add(&fields),
        Command::Update { number, fields } => cli.main_update(number, &fields),
        Command::Delete { number } => cli.main_delete(number),
        Command::Income { days } => cli.main_income(days),
        Command::Category { name } => cli.main_category(&name),
        Command::Interval { start, end } => cli.main_interval(&start, &end),
        Command::InitConfig => Ok(()),
    }
}

/// A missing configuration file means "all defaults"
fn load_config(path: &Path) -> Result<Config> {
    match Config::load(path) {
        Ok(config) => Ok(config),
        Err(ConfigError::FileNotFound { .. }) => Ok(Config::default()),
        Err(e) => Err(e).with_context(|| format!("Failed to load configuration from {}", path.display())),
    }
}

/// `RUST_LOG` takes precedence over the configured level
fn init_logging(level: &str) {
    let env = env_logger::Env::default().default_filter_or(level.to_lowercase());
    let _ = env_logger::Builder::from_env(env).try_init();
}

fn override_ledger_file(config: &mut Config, file: &Path) -> Result<()> {
    let name = file
        .file_name()
        .ok_or_else(|| anyhow!("--file must name a file, got {}", file.display()))?;
    config.data.path = file.parent().map(Path::to_path_buf).unwrap_or_default();
    config.data.file = name.to_string_lossy().into_owned();
    Ok(())
}

#[derive(Serialize)]
struct NumberedTransaction<'a> {
    number: usize,
    #[serde(flatten)]
    transaction: &'a Transaction,
}

pub struct Cli {
    store: TransactionStore,
    format: OutputFormat,
}

impl Cli {
    pub fn new(config: &Config, format: OutputFormat) -> Result<Self> {
        let store = TransactionStore::new(config).context("Invalid configuration")?;
        if config.data.seed_sample_data {
            store
                .ensure_seeded()
                .with_context(|| format!("Failed to prepare {}", store.path().display()))?;
        }
        Ok(Self { store, format })
    }

    fn load(&self) -> Result<Vec<Transaction>> {
        self.store
            .load()
            .with_context(|| format!("Failed to load {}", self.store.path().display()))
    }

    pub fn main_list(&self) -> Result<()> {
        let transactions = self.load()?;
        match self.format {
            OutputFormat::Json => {
                let numbered: Vec<_> = transactions
                    .iter()
                    .enumerate()
                    .map(|(i, transaction)| NumberedTransaction { number: i + 1, transaction })
                    .collect();
                print_json(&numbered)
            }
            OutputFormat::Text => {
                println!("{}", style_header(&format!("Transactions ({}):", format_number(transactions.len() as i64))));
                print_table(&transactions, true);
                Ok(())
            }
        }
    }

    pub fn main_add(&self, fields: &TransactionFields) -> Result<()> {
        let transaction = input::new_transaction(fields, chrono::Local::now().naive_local())?;
        self.store
            .add(transaction.clone())
            .context("Failed to save the new transaction")?;
        self.print_change("added", &transaction)
    }

    pub fn main_update(&self, number: usize, fields: &TransactionFields) -> Result<()> {
        let index = input::index(number)?;
        let current = self
            .load()?
            .into_iter()
            .nth(index)
            .ok_or_else(|| anyhow!("There is no transaction number {}", number))?;
        let updated = input::updated_transaction(&current, fields)?;

        self.store
            .update_at(index, updated.clone())
            .with_context(|| format!("Failed to update transaction {}", number))?;
        self.print_change("updated", &updated)
    }

    pub fn main_delete(&self, number: usize) -> Result<()> {
        let index = input::index(number)?;
        let removed = self
            .store
            .delete_at(index)
            .with_context(|| format!("Failed to delete transaction {}", number))?;
        self.print_change("deleted", &removed)
    }

    pub fn main_income(&self, days: u32) -> Result<()> {
        let report = income_last_n_days(&self.load()?, days)?;
        match self.format {
            OutputFormat::Json => print_json(&report),
            OutputFormat::Text => {
                println!(
                    "{}",
                    style_header(&format!(
                        "Income for the last {} days ({} .. {}):",
                        report.days, report.start_date, report.end_date
                    ))
                );
                print_report(&report.entries, report.total());
                Ok(())
            }
        }
    }

    pub fn main_category(&self, name: &str) -> Result<()> {
        let report = expenses_by_category(&self.load()?, name);
        match self.format {
            OutputFormat::Json => print_json(&report),
            OutputFormat::Text => {
                println!("{}", style_header(&format!("Expenses in category '{}':", report.category)));
                print_report(&report.entries, report.total());
                Ok(())
            }
        }
    }

    pub fn main_interval(&self, start: &str, end: &str) -> Result<()> {
        let report = expenses_in_interval(&self.load()?, start, end)?;
        match self.format {
            OutputFormat::Json => print_json(&report),
            OutputFormat::Text => {
                println!(
                    "{}",
                    style_header(&format!("Expenses between {} and {}:", report.start, report.end))
                );
                if report.inverted {
                    println!("(start is after end; ranges do not wrap past midnight)");
                }
                print_report(&report.entries, report.total());
                Ok(())
            }
        }
    }

    fn print_change(&self, action: &str, transaction: &Transaction) -> Result<()> {
        match self.format {
            OutputFormat::Json => {
                let mut output = serde_json::Map::new();
                output.insert(action.to_string(), serde_json::to_value(transaction)?);
                print_json(&output)
            }
            OutputFormat::Text => {
                let mut label = action.to_string();
                label[..1].make_ascii_uppercase();
                println!("{}: {}", label, transaction.summary());
                Ok(())
            }
        }
    }
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
    println!("{}", json);
    Ok(())
}

fn style_header(text: &str) -> String {
    format!("{}\n{}", text, "=".repeat(text.chars().count()))
}

const DATE_WIDTH: usize = 10;
const TIME_WIDTH: usize = 5;
const DIRECTION_WIDTH: usize = 9;
const CATEGORY_WIDTH: usize = 16;
const AMOUNT_WIDTH: usize = 14;
const COUNTERPARTY_WIDTH: usize = 24;

fn print_report(entries: &[Transaction], total: f64) {
    if entries.is_empty() {
        println!("(no results)");
        return;
    }
    print_table(entries, false);
    println!("Total: {}", format_money(total));
}

fn print_table(transactions: &[Transaction], numbered: bool) {
    if transactions.is_empty() {
        println!("(none)");
        return;
    }

    let number_width = transactions.len().to_string().len();
    for (i, transaction) in transactions.iter().enumerate() {
        let mut row = String::new();
        if numbered {
            row.push_str(&pad_left(&(i + 1).to_string(), number_width));
            row.push_str(". ");
        }
        row.push_str(&format_row(transaction));
        println!("{}", row.trim_end());
    }
}

fn format_row(transaction: &Transaction) -> String {
    [
        pad_right(&transaction.date, DATE_WIDTH),
        pad_right(&transaction.time, TIME_WIDTH),
        pad_right(&transaction.direction.to_string(), DIRECTION_WIDTH),
        pad_right(&transaction.category, CATEGORY_WIDTH),
        pad_left(&format_money(transaction.amount), AMOUNT_WIDTH),
        pad_right(&transaction.counterparty, COUNTERPARTY_WIDTH),
    ]
    .join("  ")
}
