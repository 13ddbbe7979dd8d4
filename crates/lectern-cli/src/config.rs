//! Configuration file management.

use std::path::{Path, PathBuf};

use lectern_forum::credentials::PasswordCost;
use lectern_forum::seed::SeedPlan;
use serde::{Deserialize, Serialize};

/// Complete CLI configuration, read from `config.toml` in the data directory.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LecternConfig {
    /// Database settings.
    #[serde(default)]
    pub database: DatabaseConfig,
    /// Password hashing cost for new accounts.
    #[serde(default)]
    pub auth: AuthConfig,
    /// Search settings.
    #[serde(default)]
    pub search: SearchConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Defaults for `lectern seed`.
    #[serde(default)]
    pub seed: SeedPlan,
}

/// Database configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Database file. Empty = $data_dir/lectern.db.
    #[serde(default)]
    pub path: String,
}

/// Argon2id parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    #[serde(default = "default_memory_kib")]
    pub memory_kib: u32,
    #[serde(default = "default_iterations")]
    pub iterations: u32,
    #[serde(default = "default_parallelism")]
    pub parallelism: u32,
}

/// Search configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Longer keywords are rejected before querying.
    #[serde(default = "default_max_keyword_len")]
    pub max_keyword_len: usize,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level: "debug" | "info" | "warn" | "error".
    #[serde(default = "default_log_level")]
    pub level: String,
}

// Default value functions

fn default_memory_kib() -> u32 {
    PasswordCost::default().memory_kib
}

fn default_iterations() -> u32 {
    PasswordCost::default().iterations
}

fn default_parallelism() -> u32 {
    PasswordCost::default().parallelism
}

fn default_max_keyword_len() -> usize {
    200
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            memory_kib: default_memory_kib(),
            iterations: default_iterations(),
            parallelism: default_parallelism(),
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_keyword_len: default_max_keyword_len(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl LecternConfig {
    /// Load configuration from the default config file location.
    ///
    /// Falls back to defaults if file does not exist.
    pub fn load() -> anyhow::Result<Self> {
        Self::load_from(&Self::default_data_dir().join("config.toml"))
    }

    /// Load configuration from an explicit file, defaults if it is missing.
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: LecternConfig = toml::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    /// Resolved database file.
    pub fn database_path(&self) -> PathBuf {
        if self.database.path.is_empty() {
            Self::default_data_dir().join("lectern.db")
        } else {
            PathBuf::from(&self.database.path)
        }
    }

    pub fn password_cost(&self) -> PasswordCost {
        PasswordCost {
            memory_kib: self.auth.memory_kib,
            iterations: self.auth.iterations,
            parallelism: self.auth.parallelism,
        }
    }

    /// `$LECTERN_DATA_DIR`, or a per-user directory.
    fn default_data_dir() -> PathBuf {
        if let Ok(dir) = std::env::var("LECTERN_DATA_DIR") {
            return PathBuf::from(dir);
        }
        #[cfg(target_os = "macos")]
        {
            dirs_fallback("Library/Application Support/Lectern")
        }
        #[cfg(target_os = "windows")]
        {
            dirs_fallback("Lectern")
        }
        #[cfg(not(any(target_os = "macos", target_os = "windows")))]
        {
            dirs_fallback(".lectern")
        }
    }
}

/// Fallback home directory resolution.
fn dirs_fallback(subpath: &str) -> PathBuf {
    std::env::var("HOME")
        .map(|h| PathBuf::from(h).join(subpath))
        .unwrap_or_else(|_| std::env::temp_dir().join("lectern"))
}
