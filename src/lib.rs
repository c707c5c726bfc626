#![doc(test(attr(deny(warnings))))]

//! Expense Core keeps an append-only ledger of income and expense
//! transactions and derives the monthly analytics (daily series, category
//! totals, budget usage) that charting and reporting front-ends consume.

pub mod cli;
pub mod config;
pub mod core;
pub mod currency;
pub mod domain;
pub mod ledger;
pub mod utils;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Expense Core tracing initialized.");
    });
}
