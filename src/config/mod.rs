//! Persisted user preferences.

mod manager;
mod model;

pub use manager::ConfigManager;
pub use model::Config;
