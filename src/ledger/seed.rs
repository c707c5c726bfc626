use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::currency::CurrencyCode;
use crate::domain::{CategoryName, Transaction, TransactionKind};

use crate::domain::TransactionKind::{Expense, Income};

/// (kind, category, amount, year, month, day), ids follow array order from 1.
const SEED: &[(TransactionKind, &str, i64, i32, u32, u32)] = &[
    (Income, "Salary", 5000, 2024, 7, 1),
    (Expense, "Rent", 1500, 2024, 7, 3),
    (Expense, "Food", 500, 2024, 7, 5),
    (Income, "Freelance", 1000, 2024, 7, 8),
    (Expense, "Transportation", 200, 2024, 7, 10),
    (Expense, "Entertainment", 150, 2024, 7, 12),
    (Income, "Investment", 2000, 2024, 7, 15),
    (Expense, "Shopping", 300, 2024, 7, 18),
    (Expense, "Healthcare", 100, 2024, 7, 20),
    (Income, "Gift", 500, 2024, 7, 22),
    (Expense, "Education", 400, 2024, 7, 25),
    (Expense, "Loan", 700, 2024, 7, 28),
    (Income, "Salary", 5200, 2024, 8, 1),
    (Expense, "Rent", 1550, 2024, 8, 3),
    (Expense, "Food", 550, 2024, 8, 5),
    (Income, "Freelance", 1100, 2024, 8, 8),
    (Expense, "Transportation", 220, 2024, 8, 10),
    (Expense, "Entertainment", 170, 2024, 8, 12),
    (Income, "Investment", 2200, 2024, 8, 15),
    (Expense, "Shopping", 330, 2024, 8, 18),
    (Expense, "Healthcare", 110, 2024, 8, 20),
    (Income, "Gift", 550, 2024, 8, 22),
    (Expense, "Education", 440, 2024, 8, 25),
    (Expense, "Loan", 770, 2024, 8, 28),
];

/// The 24 demo transactions spanning July and August 2024, all in USD.
pub fn seed_transactions() -> Vec<Transaction> {
    SEED.iter()
        .zip(1u64..)
        .filter_map(|(&(kind, category, amount, year, month, day), id)| {
            let date = NaiveDate::from_ymd_opt(year, month, day)?;
            Transaction::new(
                id,
                kind,
                CategoryName::from_static(category),
                Decimal::from(amount),
                date,
                CurrencyCode::default(),
            )
            .ok()
        })
        .collect()
}
