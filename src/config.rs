use crate::core::{Result, TrackerError};
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Points at an explicit configuration file.
pub const CONFIG_ENV: &str = "EMPLOYEE_TRACKER_CONFIG";
/// Overrides `database.path`.
pub const DATABASE_ENV: &str = "EMPLOYEE_TRACKER_DB";

/// Top-level configuration structure parsed from a TOML file.
#[derive(Debug, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub database: DatabaseConfig,
    pub ui: UiConfig,
    pub logging: LoggingConfig,
}

/// Database connection settings.
#[derive(Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct DatabaseConfig {
    /// SQLite database file, or `:memory:`
    pub path: PathBuf,
    pub foreign_keys: bool,
    pub busy_timeout_ms: Option<u64>,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        DatabaseConfig {
            path: PathBuf::from("employee_tracker.db"),
            foreign_keys: true,
            busy_timeout_ms: Some(5000),
        }
    }
}

impl DatabaseConfig {
    /// Name shown to the user: the file stem, e.g. `employee_tracker`.
    pub fn display_name(&self) -> String {
        self.path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string())
    }
}

/// UI-related configuration.
#[derive(Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct UiConfig {
    pub show_banner: bool,
}

impl Default for UiConfig {
    fn default() -> Self {
        UiConfig { show_banner: true }
    }
}

/// Logging configuration; `RUST_LOG` takes precedence when set.
#[derive(Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            level: "warn".to_string(),
        }
    }
}

impl Config {
    /// Loads the configuration from the environment and the user config dir.
    ///
    /// `$EMPLOYEE_TRACKER_CONFIG` names a file that must exist. Otherwise
    /// `<config dir>/employee-tracker/config.toml` is read when present, and
    /// built-in defaults are used when it is not.
    pub fn load() -> Result<Config> {
        let mut config = match config_path() {
            Some(path) => load_config(path)?,
            None => Config::default(),
        };

        if let Some(db) = env::var_os(DATABASE_ENV) {
            config.database.path = PathBuf::from(db);
        }

        Ok(config)
    }
}

fn config_path() -> Option<PathBuf> {
    if let Some(path) = env::var_os(CONFIG_ENV) {
        return Some(PathBuf::from(path));
    }
    let path = dirs::config_dir()?.join("employee-tracker").join("config.toml");
    path.exists().then_some(path)
}

/// Loads configuration from a TOML file at the given path.
///
/// # Arguments
///
/// * `path` - The file path to the TOML configuration file.
///
/// # Example
///
/// ```no_run
/// use employee_tracker::config::load_config;
///
/// let config = load_config("config.toml").expect("Failed to load config");
/// println!("{:?}", config);
/// ```
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)
        .map_err(|e| TrackerError::Config(format!("{}: {}", path.display(), e)))?;
    toml::from_str(&content).map_err(|e| TrackerError::Config(format!("{}: {}", path.display(), e)))
}
