//! # Console Configuration
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Command-line flags (highest priority)                              │
//! │     --db, --export-dir, --width                                        │
//! │                                                                         │
//! │  2. Environment Variables                                              │
//! │     QUICKBILL_DB_PATH=/srv/quickbill.db                                │
//! │     QUICKBILL_RECEIPT_WIDTH=48                                         │
//! │                                                                         │
//! │  3. TOML Config File (--config, or)                                    │
//! │     ~/.config/quickbill/config.toml (Linux)                            │
//! │     ~/Library/Application Support/com.quickbill.pos/config.toml (macOS)│
//! │                                                                         │
//! │  4. Default Values (lowest priority)                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! [storage]
//! database_path = "/srv/quickbill/quickbill.db"
//! export_dir = "/srv/quickbill/bills"
//!
//! [receipt]
//! width = 42
//! bill_number = "1024"
//! terminal_id = "TERM-01"
//!
//! [clock]
//! refresh_secs = 60
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use quickbill_core::receipt::{DEFAULT_WIDTH, MIN_WIDTH};
use quickbill_core::{ReceiptMeta, DEFAULT_BILL_NUMBER, DEFAULT_TERMINAL_ID};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::cli::LaunchArgs;
use crate::error::{AppError, AppResult};

const DB_FILE_NAME: &str = "quickbill.db";

// =============================================================================
// Sections
// =============================================================================

/// Where documents and exported bills live.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageSettings {
    /// SQLite file. Unset means the platform data directory.
    pub database_path: Option<PathBuf>,

    /// Directory exported PDFs are written to.
    pub export_dir: PathBuf,
}

impl Default for StorageSettings {
    fn default() -> Self {
        StorageSettings {
            database_path: None,
            export_dir: PathBuf::from("."),
        }
    }
}

/// Receipt layout and header identifiers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReceiptSettings {
    /// Characters per receipt line.
    pub width: usize,
    pub bill_number: String,
    pub terminal_id: String,
}

impl Default for ReceiptSettings {
    fn default() -> Self {
        ReceiptSettings {
            width: DEFAULT_WIDTH,
            bill_number: DEFAULT_BILL_NUMBER.to_string(),
            terminal_id: DEFAULT_TERMINAL_ID.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClockSettings {
    /// Seconds between clock refreshes.
    pub refresh_secs: u64,
}

impl Default for ClockSettings {
    fn default() -> Self {
        ClockSettings {
            refresh_secs: quickbill_core::clock::REFRESH_INTERVAL.as_secs(),
        }
    }
}

// =============================================================================
// AppConfig
// =============================================================================

/// Full console configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub storage: StorageSettings,

    #[serde(default)]
    pub receipt: ReceiptSettings,

    #[serde(default)]
    pub clock: ClockSettings,
}

impl AppConfig {
    /// Loads configuration from file, environment, flags and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (config.toml)
    /// 3. Environment variables
    /// 4. Command-line flags
    pub fn load(args: &LaunchArgs) -> AppResult<Self> {
        let mut config = Self::default();

        if let Some(path) = args.config.clone().or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading config from file");
                config = Self::from_file(&path)?;
            } else if args.config.is_some() {
                return Err(AppError::config(format!(
                    "Config file not found: {}",
                    path.display()
                )));
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_env_overrides();
        config.apply_args(args);
        config.validate()?;

        Ok(config)
    }

    /// Parses a TOML config file.
    pub fn from_file(path: &Path) -> AppResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        toml::from_str(&contents)
            .map_err(|e| AppError::config(format!("Invalid config {}: {}", path.display(), e)))
    }

    /// Validates the configuration.
    pub fn validate(&self) -> AppResult<()> {
        if self.receipt.width < MIN_WIDTH {
            return Err(AppError::config(format!(
                "receipt.width must be at least {}, got {}",
                MIN_WIDTH, self.receipt.width
            )));
        }

        if self.clock.refresh_secs == 0 {
            return Err(AppError::config("clock.refresh_secs must be greater than 0"));
        }

        if self.receipt.bill_number.trim().is_empty() {
            return Err(AppError::config("receipt.bill_number must not be empty"));
        }

        if self.receipt.terminal_id.trim().is_empty() {
            return Err(AppError::config("receipt.terminal_id must not be empty"));
        }

        Ok(())
    }

    /// Applies environment variable overrides.
    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|name| std::env::var(name).ok());
    }

    /// Applies overrides from `lookup`, keyed by environment variable name.
    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(path) = lookup("QUICKBILL_DB_PATH") {
            debug!(path = %path, "Overriding database path from environment");
            self.storage.database_path = Some(PathBuf::from(path));
        }

        if let Some(dir) = lookup("QUICKBILL_EXPORT_DIR") {
            self.storage.export_dir = PathBuf::from(dir);
        }

        if let Some(width) = lookup("QUICKBILL_RECEIPT_WIDTH") {
            match width.parse::<usize>() {
                Ok(w) => self.receipt.width = w,
                Err(_) => warn!(width = %width, "Ignoring non-numeric receipt width"),
            }
        }

        if let Some(bill) = lookup("QUICKBILL_BILL_NUMBER") {
            self.receipt.bill_number = bill;
        }

        if let Some(terminal) = lookup("QUICKBILL_TERMINAL_ID") {
            self.receipt.terminal_id = terminal;
        }

        if let Some(secs) = lookup("QUICKBILL_CLOCK_REFRESH_SECS") {
            match secs.parse::<u64>() {
                Ok(s) => self.clock.refresh_secs = s,
                Err(_) => warn!(secs = %secs, "Ignoring non-numeric clock refresh"),
            }
        }
    }

    fn apply_args(&mut self, args: &LaunchArgs) {
        if let Some(db) = &args.db {
            self.storage.database_path = Some(db.clone());
        }
        if let Some(dir) = &args.export_dir {
            self.storage.export_dir = dir.clone();
        }
        if let Some(width) = args.width {
            self.receipt.width = width;
        }
    }

    /// Returns the default config file path.
    fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "quickbill", "pos")
            .map(|dirs| dirs.config_dir().join("config.toml"))
    }

    // =========================================================================
    // Convenience Methods
    // =========================================================================

    /// SQLite file to open: configured, platform data dir, or the working
    /// directory as a last resort.
    pub fn database_path(&self) -> PathBuf {
        if let Some(path) = &self.storage.database_path {
            return path.clone();
        }
        directories::ProjectDirs::from("com", "quickbill", "pos")
            .map(|dirs| dirs.data_dir().join(DB_FILE_NAME))
            .unwrap_or_else(|| PathBuf::from(DB_FILE_NAME))
    }

    pub fn receipt_meta(&self) -> ReceiptMeta {
        ReceiptMeta {
            bill_number: self.receipt.bill_number.clone(),
            terminal_id: self.receipt.terminal_id.clone(),
        }
    }

    pub fn refresh_interval(&self) -> Duration {
        Duration::from_secs(self.clock.refresh_secs)
    }
}
