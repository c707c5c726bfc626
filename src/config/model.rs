use serde::{Deserialize, Serialize};

use crate::core::errors::ExpenseError;
use crate::core::services::CsvQuoting;
use crate::currency::CurrencyCode;

/// User preferences for the shell and the services it drives.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Currency given to new transactions that do not name one.
    pub currency: String,
    #[serde(default = "Config::default_page_size")]
    pub page_size: usize,
    #[serde(default = "Config::default_top_categories")]
    pub top_categories: usize,
    #[serde(default)]
    pub csv_quoting: CsvQuoting,
    /// Start each session with the July/August 2024 demo transactions.
    #[serde(default = "Config::default_true")]
    pub seed_demo_data: bool,
    #[serde(default = "Config::default_true")]
    pub ui_color_enabled: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            currency: "USD".into(),
            page_size: Self::default_page_size(),
            top_categories: Self::default_top_categories(),
            csv_quoting: CsvQuoting::default(),
            seed_demo_data: true,
            ui_color_enabled: true,
        }
    }
}

impl Config {
    pub fn default_page_size() -> usize {
        5
    }

    pub fn default_top_categories() -> usize {
        10
    }

    fn default_true() -> bool {
        true
    }

    pub fn currency_code(&self) -> Result<CurrencyCode, ExpenseError> {
        CurrencyCode::new(&self.currency).map_err(ExpenseError::from)
    }

    /// Rejects values the shell cannot work with.
    pub fn validate(&self) -> Result<(), ExpenseError> {
        self.currency_code()?;
        if self.page_size == 0 {
            return Err(ExpenseError::ConfigError(
                "page_size must be greater than zero".into(),
            ));
        }
        Ok(())
    }
}
