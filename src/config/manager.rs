use std::{
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use tracing::{debug, info};

use crate::config::Config;
use crate::core::errors::{ExpenseError, Result};
use crate::utils::paths::{config_file_in, ensure_dir};

const TMP_SUFFIX: &str = "tmp";

/// Loads and saves [`Config`] as pretty-printed JSON.
#[derive(Debug, Clone)]
pub struct ConfigManager {
    config_path: PathBuf,
}

impl ConfigManager {
    pub fn new(config_path: PathBuf) -> Self {
        Self { config_path }
    }

    /// Manager for `<base>/config/config.json`, creating the directory.
    pub fn with_base_dir(base: &Path) -> Result<Self> {
        let config_path = config_file_in(base);
        if let Some(dir) = config_path.parent() {
            ensure_dir(dir)?;
        }
        Ok(Self::new(config_path))
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    /// Reads the stored config, or defaults when no file exists yet.
    pub fn load(&self) -> Result<Config> {
        if !self.config_path.exists() {
            debug!(path = %self.config_path.display(), "No config file, using defaults");
            return Ok(Config::default());
        }
        let data = fs::read_to_string(&self.config_path)?;
        let config: Config = serde_json::from_str(&data)?;
        config.validate()?;
        Ok(config)
    }

    /// Writes to a sibling temp file, then renames it over the config file.
    pub fn save(&self, config: &Config) -> Result<()> {
        config.validate()?;
        let json = serde_json::to_string_pretty(config)?;
        let tmp = tmp_path(&self.config_path);
        write_file(&tmp, &json)?;
        fs::rename(&tmp, &self.config_path)?;
        info!(path = %self.config_path.display(), "Saved config");
        Ok(())
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|existing| format!("{existing}.{TMP_SUFFIX}"))
        .unwrap_or_else(|| TMP_SUFFIX.to_string());
    tmp.set_extension(ext);
    tmp
}

fn write_file(path: &Path, data: &str) -> std::result::Result<(), ExpenseError> {
    if let Some(parent) = path.parent() {
        ensure_dir(parent)?;
    }
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.sync_all()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::services::CsvQuoting;
    use tempfile::tempdir;

    #[test]
    fn load_without_file_returns_defaults() {
        let dir = tempdir().unwrap();
        let manager = ConfigManager::with_base_dir(dir.path()).unwrap();
        assert_eq!(manager.load().unwrap(), Config::default());
        assert!(manager.config_path().parent().unwrap().is_dir());
    }

    #[test]
    fn save_then_load_round_trips_and_leaves_no_temp_file() {
        let dir = tempdir().unwrap();
        let manager = ConfigManager::with_base_dir(dir.path()).unwrap();
        let config = Config {
            currency: "GBP".into(),
            page_size: 8,
            csv_quoting: CsvQuoting::Legacy,
            ..Config::default()
        };
        manager.save(&config).unwrap();
        assert_eq!(manager.load().unwrap(), config);
        assert!(!tmp_path(manager.config_path()).exists());
    }

    #[test]
    fn corrupt_file_is_a_config_error() {
        let dir = tempdir().unwrap();
        let manager = ConfigManager::with_base_dir(dir.path()).unwrap();
        fs::write(manager.config_path(), "{ not json").unwrap();
        assert!(matches!(manager.load(), Err(ExpenseError::ConfigError(_))));
    }

    #[test]
    fn invalid_config_is_not_saved() {
        let dir = tempdir().unwrap();
        let manager = ConfigManager::with_base_dir(dir.path()).unwrap();
        let config = Config {
            page_size: 0,
            ..Config::default()
        };
        assert!(manager.save(&config).is_err());
        assert!(!manager.config_path().exists());
    }
}
