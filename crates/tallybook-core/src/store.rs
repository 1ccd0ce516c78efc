//! Flat-file transaction store
//!
//! Every public method is a full cycle against the backing file: read,
//! optionally mutate, write back. Nothing is cached between calls, so an
//! index is only meaningful for the snapshot returned by the latest
//! [`TransactionStore::load`].

use std::ffi::OsString;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tallybook_config::Config;
use tallybook_parser::{DirectionTokens, ParsedLedger, Transaction, TsvCodec};

use crate::error::{CoreError, CoreResult};
use crate::seed::sample_transactions;
use crate::sort::{heap_sort_by_key, SortOrder};
use crate::time::chronological_key;

/// Reads and rewrites the backing file
#[derive(Debug, Clone)]
pub struct TransactionStore {
    path: PathBuf,
    codec: TsvCodec,
    seed_sample_data: bool,
}

impl TransactionStore {
    /// Create a store from validated configuration
    pub fn new(config: &Config) -> CoreResult<Self> {
        config.validate()?;
        Ok(Self {
            path: config.ledger_path(),
            codec: TsvCodec::new(DirectionTokens::from(&config.ledger)),
            seed_sample_data: config.data.seed_sample_data,
        })
    }

    /// Create a store for `path` with default direction tokens and seeding on
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            codec: TsvCodec::default(),
            seed_sample_data: true,
        }
    }

    /// Enable or disable writing sample data on first run
    pub fn seed_sample_data(mut self, enabled: bool) -> Self {
        self.seed_sample_data = enabled;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load all transactions in file order, skipping malformed lines
    pub fn load(&self) -> CoreResult<Vec<Transaction>> {
        Ok(self.load_with_diagnostics()?.transactions)
    }

    /// Load all transactions together with a diagnostic per skipped line.
    ///
    /// A missing file is a first run: it is seeded (when enabled) and read
    /// once more. Any other read failure is returned as [`CoreError::Io`].
    pub fn load_with_diagnostics(&self) -> CoreResult<ParsedLedger> {
        let content = match self.read_content()? {
            Some(content) => content,
            None if self.seed_sample_data => {
                log::info!("Backing file {} not found, creating sample data", self.path.display());
                self.write_samples()?;
                self.read_content()?.unwrap_or_default()
            }
            None => {
                log::info!("Backing file {} not found, starting empty", self.path.display());
                String::new()
            }
        };

        let parsed = self.codec.parse(&content);
        for diagnostic in &parsed.diagnostics {
            log::warn!(target: "tallybook::store", "Skipped {}: {}", self.path.display(), diagnostic);
        }
        log::debug!(
            "Loaded {} transactions from {} ({} lines skipped)",
            parsed.transactions.len(),
            self.path.display(),
            parsed.diagnostics.len()
        );

        Ok(parsed)
    }

    /// Sort `transactions` chronologically in place and rewrite the file.
    ///
    /// The new content goes to a sibling `.tmp` file that is then renamed
    /// over the backing file, so an interrupted write leaves the old file.
    pub fn save(&self, transactions: &mut [Transaction]) -> CoreResult<()> {
        heap_sort_by_key(transactions, chronological_key, SortOrder::Ascending);
        let content = self.codec.render(transactions);
        self.write_content(&content)?;

        log::info!("Saved {} transactions to {}", transactions.len(), self.path.display());
        Ok(())
    }

    /// Append a transaction and save
    pub fn add(&self, transaction: Transaction) -> CoreResult<()> {
        let mut transactions = self.load()?;
        transactions.push(transaction);
        self.save(&mut transactions)
    }

    /// Remove the transaction at `index` of a fresh load and save.
    /// Returns the removed record.
    pub fn delete_at(&self, index: usize) -> CoreResult<Transaction> {
        let mut transactions = self.load()?;
        check_index(index, transactions.len())?;

        let removed = transactions.remove(index);
        self.save(&mut transactions)?;
        Ok(removed)
    }

    /// Replace the transaction at `index` of a fresh load and save.
    /// Returns the previous record.
    pub fn update_at(&self, index: usize, transaction: Transaction) -> CoreResult<Transaction> {
        let mut transactions = self.load()?;
        check_index(index, transactions.len())?;

        let previous = std::mem::replace(&mut transactions[index], transaction);
        self.save(&mut transactions)?;
        Ok(previous)
    }

    /// Write the sample data if the file is missing or blank.
    /// Returns `true` when samples were written.
    pub fn ensure_seeded(&self) -> CoreResult<bool> {
        match self.read_content()? {
            Some(content) if !content.trim().is_empty() => Ok(false),
            Some(_) => {
                log::info!("Backing file {} is empty, creating sample data", self.path.display());
                self.write_samples()?;
                Ok(true)
            }
            None => {
                log::info!("Backing file {} not found, creating sample data", self.path.display());
                self.write_samples()?;
                Ok(true)
            }
        }
    }

    fn write_samples(&self) -> CoreResult<()> {
        let mut samples = sample_transactions();
        self.save(&mut samples)
    }

    /// `Ok(None)` if the file doesn't exist yet
    fn read_content(&self) -> CoreResult<Option<String>> {
        match fs::read_to_string(&self.path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(CoreError::io(&self.path, e)),
        }
    }

    fn write_content(&self, content: &str) -> CoreResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| CoreError::io(parent, e))?;
            }
        }

        let tmp_path = self.tmp_path();
        fs::write(&tmp_path, content).map_err(|e| CoreError::io(&tmp_path, e))?;

        if let Err(e) = fs::rename(&tmp_path, &self.path) {
            // Best effort; the rename error is what matters
            let _ = fs::remove_file(&tmp_path);
            return Err(CoreError::io(&self.path, e));
        }
        Ok(())
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(OsString::from)
            .unwrap_or_else(|| OsString::from("ledger"));
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

fn check_index(index: usize, len: usize) -> CoreResult<()> {
    if index >= len {
        return Err(CoreError::IndexOutOfRange { index, len });
    }
    Ok(())
}

// ==================== Tests ====================

#[cfg(test)]
mod tests {
    use super::*;
    use tallybook_parser::Direction;

    fn store_in(dir: &tempfile::TempDir) -> TransactionStore {
        TransactionStore::with_path(dir.path().join("budget_data.txt"))
    }

    fn txn(date: &str, time: &str, amount: f64) -> Transaction {
        Transaction::new(date, time, Direction::Expense, "food", amount, "Cafe")
    }

    fn write(store: &TransactionStore, content: &str) {
        fs::write(store.path(), content).unwrap();
    }

    #[test]
    fn test_missing_file_is_seeded() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        let transactions = store.load().unwrap();
        assert!(store.path().exists());
        assert_eq!(transactions.len(), 30);

        // Equal (date, time) keys may come back in either order
        let mut expected = sample_transactions();
        expected.retain(|t| !transactions.contains(t));
        assert!(expected.is_empty());

        let keys: Vec<_> = transactions.iter().map(chronological_key).collect();
        assert!(keys.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn test_missing_file_without_seeding_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir).seed_sample_data(false);

        assert!(store.load().unwrap().is_empty());
        assert!(!store.path().exists());
    }

    #[test]
    fn test_seeding_creates_data_directory() {
        let dir = tempfile::tempdir().unwrap();
        let store = TransactionStore::with_path(dir.path().join("nested/data/budget.txt"));

        assert_eq!(store.load().unwrap().len(), 30);
    }

    #[test]
    fn test_empty_file_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        write(&store, "");

        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn test_ensure_seeded() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        assert!(store.ensure_seeded().unwrap());
        assert!(!store.ensure_seeded().unwrap());

        write(&store, "  \n");
        assert!(store.ensure_seeded().unwrap());
        assert_eq!(store.load().unwrap().len(), 30);
    }

    #[test]
    fn test_malformed_line_is_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        write(
            &store,
            "2026-01-01\t09:30\tincome\tsalary\t100.0\tBoss\n2026-01-02\t10:00\texpense\tfood\t5.0\n",
        );

        let parsed = store.load_with_diagnostics().unwrap();
        assert_eq!(parsed.transactions.len(), 1);
        assert_eq!(parsed.diagnostics.len(), 1);
        assert_eq!(parsed.diagnostics[0].line(), 2);
        assert_eq!(store.load().unwrap().len(), 1);
    }

    #[test]
    fn test_load_keeps_file_order() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        write(
            &store,
            "2026-01-09\t10:00\texpense\tfood\t1.0\tB\n2026-01-01\t10:00\texpense\tfood\t2.0\tA\n",
        );

        let dates: Vec<_> = store.load().unwrap().into_iter().map(|t| t.date).collect();
        assert_eq!(dates, vec!["2026-01-09", "2026-01-01"]);
    }

    #[test]
    fn test_save_then_load_is_chronological() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        let mut transactions = vec![
            txn("2026-01-10", "18:30", 3.0),
            txn("2025-12-31", "23:59", 1.0),
            txn("2026-01-10", "09:05", 2.0),
            txn("2026-01-01", "00:00", 4.5),
        ];
        let mut expected = transactions.clone();

        store.save(&mut transactions).unwrap();
        let loaded = store.load().unwrap();

        let order: Vec<_> = loaded.iter().map(|t| t.amount).collect();
        assert_eq!(order, vec![1.0, 4.5, 2.0, 3.0]);
        assert_eq!(loaded, transactions);

        // Same multiset of records
        expected.retain(|t| !loaded.contains(t));
        assert!(expected.is_empty());
    }

    #[test]
    fn test_malformed_dates_sort_last() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        let mut transactions = vec![
            txn("someday", "10:00", 1.0),
            txn("2026-01-02", "25:00", 2.0),
            txn("2026-01-02", "10:00", 3.0),
            txn("2026-01-01", "10:00", 4.0),
        ];

        store.save(&mut transactions).unwrap();
        let order: Vec<_> = store.load().unwrap().iter().map(|t| t.amount).collect();
        assert_eq!(order, vec![4.0, 3.0, 2.0, 1.0]);
    }

    #[test]
    fn test_amount_written_as_decimal() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        store.save(&mut [txn("2026-01-01", "10:00", 50000.0)]).unwrap();

        let content = fs::read_to_string(store.path()).unwrap();
        assert_eq!(content, "2026-01-01\t10:00\texpense\tfood\t50000.0\tCafe\n");
        assert!(!store.tmp_path().exists());
    }

    #[test]
    fn test_add_keeps_file_sorted() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        write(&store, "2026-01-05\t12:00\texpense\tfood\t280.0\tCafe\n");

        store.add(txn("2026-01-01", "08:00", 10.0)).unwrap();

        let loaded = store.load().unwrap();
        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded[0].date, "2026-01-01");
        assert_eq!(loaded[1].date, "2026-01-05");
    }

    #[test]
    fn test_delete_first_removes_earliest() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        store
            .save(&mut [txn("2026-01-03", "10:00", 3.0), txn("2026-01-01", "10:00", 1.0), txn("2026-01-02", "10:00", 2.0)])
            .unwrap();

        let removed = store.delete_at(0).unwrap();
        assert_eq!(removed.amount, 1.0);

        let remaining: Vec<_> = store.load().unwrap().iter().map(|t| t.amount).collect();
        assert_eq!(remaining, vec![2.0, 3.0]);
    }

    #[test]
    fn test_delete_out_of_range_leaves_file_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        // Unsorted on purpose: a save would reorder it
        write(&store, "2026-01-09\t10:00\texpense\tfood\t1.0\tB\n2026-01-01\t10:00\texpense\tfood\t2.0\tA\n");
        let before = fs::read(store.path()).unwrap();

        let err = store.delete_at(2).unwrap_err();
        assert!(matches!(err, CoreError::IndexOutOfRange { index: 2, len: 2 }));
        assert_eq!(fs::read(store.path()).unwrap(), before);
    }

    #[test]
    fn test_update_replaces_record() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        store.save(&mut [txn("2026-01-01", "10:00", 1.0), txn("2026-01-02", "10:00", 2.0)]).unwrap();

        let replacement = Transaction::new("2026-01-03", "11:00", Direction::Income, "gift", 99.0, "Mom");
        let previous = store.update_at(0, replacement.clone()).unwrap();
        assert_eq!(previous.amount, 1.0);

        let loaded = store.load().unwrap();
        assert_eq!(loaded.len(), 2);
        // Re-sorted: the updated record moved to the end
        assert_eq!(loaded[1], replacement);
    }

    #[test]
    fn test_update_out_of_range() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        write(&store, "");

        let err = store.update_at(0, txn("2026-01-01", "10:00", 1.0)).unwrap_err();
        assert!(matches!(err, CoreError::IndexOutOfRange { index: 0, len: 0 }));
    }

    #[test]
    fn test_unreadable_path_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        // A directory cannot be read as a file
        let store = TransactionStore::with_path(dir.path());

        let err = store.load().unwrap_err();
        assert!(matches!(err, CoreError::Io { .. }));
        assert!(store.add(txn("2026-01-01", "10:00", 1.0)).is_err());
    }

    #[test]
    fn test_store_from_config_uses_tokens() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::default();
        config.data.path = dir.path().to_path_buf();
        config.data.seed_sample_data = false;
        config.ledger.income_token = "приход".to_string();
        config.ledger.expense_token = "расход".to_string();

        let store = TransactionStore::new(&config).unwrap();
        store.add(txn("2026-01-01", "10:00", 5.0)).unwrap();

        let content = fs::read_to_string(dir.path().join("budget_data.txt")).unwrap();
        assert!(content.contains("\tрасход\t"));
        assert_eq!(store.load().unwrap()[0].direction, Direction::Expense);
    }

    #[test]
    fn test_store_rejects_invalid_config() {
        let mut config = Config::default();
        config.ledger.expense_token = config.ledger.income_token.clone();

        let err = TransactionStore::new(&config).unwrap_err();
        assert!(matches!(err, CoreError::Config(_)));
        assert!(err.to_details().suggestions.iter().any(|s| s.contains("must differ")));
    }
}
