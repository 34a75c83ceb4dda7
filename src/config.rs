//! Configuration management for the library store

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::env;
use std::path::PathBuf;

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct StorageConfig {
    pub members_file: PathBuf,
    pub items_file: PathBuf,
}

/// Lending policy shared by every member and item of a running catalogue.
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct LendingConfig {
    /// Maximum concurrent loans for a student
    pub student_borrow_ceiling: usize,
    /// Flat cost applied to every item
    pub base_cost: f64,
    pub book_surcharge: f64,
    pub dvd_surcharge: f64,
    /// Days until an on-loan item is expected back
    pub loan_days: i64,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub lending: LendingConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let config = Config::builder()
            // Optional base file, every key also has a built-in default
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // e.g. LIBRARY_LENDING__STUDENT_BORROW_CEILING=5
            .add_source(
                Environment::with_prefix("LIBRARY")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            members_file: PathBuf::from("members.txt"),
            items_file: PathBuf::from("items.txt"),
        }
    }
}

impl Default for LendingConfig {
    fn default() -> Self {
        Self {
            student_borrow_ceiling: 3,
            base_cost: 10.0,
            book_surcharge: 8.0,
            dvd_surcharge: 5.0,
            loan_days: 90,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}
