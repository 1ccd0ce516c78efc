//! Sample transactions written on first run

use tallybook_parser::Direction::{self, Expense, Income};
use tallybook_parser::Transaction;

const SAMPLE_RECORDS: [(&str, &str, Direction, &str, f64, &str); 30] = [
    ("2026-01-01", "09:30", Income, "salary", 50000.00, "Employer Inc"),
    ("2026-01-01", "10:45", Income, "stipend", 3124.00, "State University"),
    ("2026-01-02", "13:00", Income, "advance", 20000.00, "Employer Inc"),
    ("2026-01-03", "12:00", Expense, "food", 450.00, "Restaurant"),
    ("2026-01-04", "14:00", Income, "gift", 3000.00, "Grandpa"),
    ("2026-01-05", "12:00", Expense, "food", 280.00, "Canteen"),
    ("2026-01-05", "12:00", Expense, "food", 280.00, "Cafe"),
    ("2026-01-05", "14:00", Expense, "food", 350.00, "Restaurant"),
    ("2026-01-06", "12:00", Expense, "transport", 100.00, "Metro"),
    ("2026-01-06", "14:00", Expense, "transport", 100.00, "Bus"),
    ("2026-01-06", "16:00", Expense, "transport", 150.00, "Taxi"),
    ("2026-01-06", "16:00", Income, "gift", 5000.00, "Mom"),
    ("2026-01-07", "10:00", Expense, "entertainment", 500.00, "Game Club"),
    ("2026-01-07", "12:00", Expense, "entertainment", 500.00, "Cinema"),
    ("2026-01-07", "13:00", Income, "advance", 15000.00, "Employer Inc"),
    ("2026-01-07", "14:00", Expense, "entertainment", 900.00, "Billiards"),
    ("2026-01-08", "10:00", Expense, "gift", 750.00, "Friend"),
    ("2026-01-08", "12:00", Expense, "gift", 750.00, "Colleague"),
    ("2026-01-08", "14:00", Expense, "gift", 1000.00, "Mom"),
    ("2026-01-09", "09:00", Income, "salary", 50000.00, "Employer Inc"),
    ("2026-01-10", "11:00", Income, "freelance", 12000.00, "Client LLC"),
    ("2026-01-10", "18:30", Expense, "entertainment", 1200.00, "Concert"),
    ("2026-01-10", "19:00", Expense, "entertainment", 1200.00, "Theater"),
    ("2026-01-12", "15:30", Income, "dividends", 8500.00, "Broker Ltd"),
    ("2026-01-15", "10:00", Income, "refund", 1200.00, "Tech Store"),
    ("2026-01-15", "20:15", Expense, "clothing", 4500.00, "Boutique"),
    ("2026-01-18", "14:20", Income, "bonus", 25000.00, "Employer Inc"),
    ("2026-01-20", "09:15", Income, "rent", 35000.00, "Tenant"),
    ("2026-01-20", "13:40", Expense, "pharmacy", 890.00, "Health Pharmacy"),
    ("2026-01-25", "16:45", Income, "side job", 7500.00, "Colleague"),
];

/// The fixed sample set, already in chronological order
pub fn sample_transactions() -> Vec<Transaction> {
    SAMPLE_RECORDS
        .iter()
        .map(|(date, time, direction, category, amount, counterparty)| {
            Transaction::new(*date, *time, direction.clone(), *category, *amount, *counterparty)
        })
        .collect()
}
