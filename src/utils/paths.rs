use dirs::home_dir;
use std::{env, fs, io, path::Path, path::PathBuf};

const DEFAULT_DIR_NAME: &str = ".expense_core";
const HOME_ENV: &str = "EXPENSE_CORE_HOME";
const CONFIG_DIR: &str = "config";
const CONFIG_FILE: &str = "config.json";
const EXPORT_DIR: &str = "exports";

/// Returns the application data directory, defaulting to `~/.expense_core`.
pub fn app_data_dir() -> PathBuf {
    if let Some(custom) = env::var_os(HOME_ENV) {
        return PathBuf::from(custom);
    }
    home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(DEFAULT_DIR_NAME)
}

pub fn config_dir_in(base: &Path) -> PathBuf {
    base.join(CONFIG_DIR)
}

pub fn config_file_in(base: &Path) -> PathBuf {
    config_dir_in(base).join(CONFIG_FILE)
}

/// Default destination for CSV exports when no explicit path is given.
pub fn exports_dir_in(base: &Path) -> PathBuf {
    base.join(EXPORT_DIR)
}

pub fn ensure_dir(path: &Path) -> io::Result<()> {
    if !path.exists() {
        fs::create_dir_all(path)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_file_lives_under_config_dir() {
        let base = PathBuf::from("/tmp/expense-home");
        assert_eq!(
            config_file_in(&base),
            PathBuf::from("/tmp/expense-home/config/config.json")
        );
        assert_eq!(
            exports_dir_in(&base),
            PathBuf::from("/tmp/expense-home/exports")
        );
    }

    #[test]
    fn ensure_dir_creates_nested_directories() {
        let temp = tempfile::tempdir().expect("tempdir");
        let nested = temp.path().join("a").join("b");
        ensure_dir(&nested).expect("create");
        assert!(nested.is_dir());
        ensure_dir(&nested).expect("idempotent");
    }
}
