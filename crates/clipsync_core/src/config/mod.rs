//! Configuration management.
//!
//! Settings live in a TOML file with one table per concern. A missing file
//! means defaults; loading never creates or rewrites it. `save()` writes
//! atomically (temp file, then rename).
//!
//! # Example
//!
//! ```no_run
//! use clipsync_core::config::ConfigManager;
//!
//! let mut config = ConfigManager::new(".config/clipsync.toml");
//! config.load_or_default().unwrap();
//! println!("Output dir: {}", config.settings().output.dir_name);
//! ```

mod manager;
mod settings;

pub use manager::{validate, ConfigError, ConfigManager, ConfigResult};
pub use settings::{AnalysisSettings, LoggingSettings, OutputSettings, Settings, ToolSettings};
