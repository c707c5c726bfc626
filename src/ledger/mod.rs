//! The owned, append-only transaction ledger and its demo dataset.

#[allow(clippy::module_inception)]
pub mod ledger;
pub mod seed;

pub use ledger::Ledger;
pub use seed::seed_transactions;
