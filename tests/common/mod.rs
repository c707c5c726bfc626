#![allow(dead_code)]

use std::{path::PathBuf, sync::Mutex};

use chrono::NaiveDate;
use expense_core::ledger::Ledger;
use once_cell::sync::Lazy;
use tempfile::TempDir;

/// Holds TempDir guards so temporary folders live for the duration of the test run.
static TEST_DIRS: Lazy<Mutex<Vec<TempDir>>> = Lazy::new(|| Mutex::new(Vec::new()));

/// A fresh, isolated `EXPENSE_CORE_HOME`.
pub fn temp_home() -> PathBuf {
    let temp = TempDir::new().expect("create temp dir");
    let base = temp.path().to_path_buf();
    TEST_DIRS.lock().expect("lock temp dir registry").push(temp);
    base
}

pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid test date")
}

pub fn mid_july() -> NaiveDate {
    date(2024, 7, 15)
}

pub fn seeded_ledger() -> Ledger {
    expense_core::init();
    Ledger::with_seed_data()
}
