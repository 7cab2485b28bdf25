//! Config manager for loading, validating and saving settings.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use thiserror::Error;

use super::settings::Settings;

/// Errors that can occur during config operations.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] io::Error),

    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Failed to serialize config: {0}")]
    SerializeError(#[from] toml::ser::Error),

    #[error("Config file not found: {0}")]
    NotFound(PathBuf),

    #[error("Invalid value for {key}: {reason}")]
    Invalid { key: &'static str, reason: String },
}

/// Result type for config operations.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Manages application configuration.
pub struct ConfigManager {
    /// Path to the config file.
    config_path: PathBuf,
    /// Current settings loaded in memory.
    settings: Settings,
}

impl ConfigManager {
    /// Create a new config manager with the given config file path.
    ///
    /// Does not load the config - call `load()` or `load_or_default()` after.
    pub fn new(config_path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: config_path.into(),
            settings: Settings::default(),
        }
    }

    /// Get the config file path.
    pub fn path(&self) -> &Path {
        &self.config_path
    }

    /// Get a reference to the current settings.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Get a mutable reference to the current settings.
    pub fn settings_mut(&mut self) -> &mut Settings {
        &mut self.settings
    }

    /// Consume the manager, keeping the settings.
    pub fn into_settings(self) -> Settings {
        self.settings
    }

    /// Load config from file.
    ///
    /// Returns error if file doesn't exist.
    pub fn load(&mut self) -> ConfigResult<()> {
        if !self.config_path.exists() {
            return Err(ConfigError::NotFound(self.config_path.clone()));
        }

        let content = fs::read_to_string(&self.config_path)?;
        self.settings = parse_and_validate(&content)?;
        tracing::debug!("Loaded config from {}", self.config_path.display());
        Ok(())
    }

    /// Load config from file, falling back to defaults if it doesn't exist.
    ///
    /// Never writes to disk.
    pub fn load_or_default(&mut self) -> ConfigResult<()> {
        if self.config_path.exists() {
            self.load()
        } else {
            tracing::debug!(
                "No config at {}, using defaults",
                self.config_path.display()
            );
            self.settings = Settings::default();
            Ok(())
        }
    }

    /// Save the entire config atomically.
    pub fn save(&self) -> ConfigResult<()> {
        validate(&self.settings)?;
        let content = self.generate_config_with_comments()?;
        self.atomic_write(&content)?;
        Ok(())
    }

    /// Generate config content with a comment above each section.
    fn generate_config_with_comments(&self) -> ConfigResult<String> {
        let mut output = String::new();
        output.push_str("# clipsync configuration\n\n");

        push_section(
            &mut output,
            "Audio decoding for offset analysis",
            "analysis",
            &toml::to_string_pretty(&self.settings.analysis)?,
        );
        push_section(
            &mut output,
            "External tool executables",
            "tools",
            &toml::to_string_pretty(&self.settings.tools)?,
        );
        push_section(
            &mut output,
            "Edited files go to <video dir>/<dir_name>/",
            "output",
            &toml::to_string_pretty(&self.settings.output)?,
        );
        push_section(
            &mut output,
            "Logging (RUST_LOG overrides level)",
            "logging",
            &toml::to_string_pretty(&self.settings.logging)?,
        );

        Ok(output.trim_end().to_string() + "\n")
    }

    /// Write content to config file atomically.
    ///
    /// Writes to a temp file first, then renames.
    fn atomic_write(&self, content: &str) -> io::Result<()> {
        if let Some(parent) = self.config_path.parent() {
            fs::create_dir_all(parent)?;
        }

        // Same directory as the target so the rename stays on one filesystem
        let temp_path = self.config_path.with_extension("toml.tmp");

        {
            let mut file = fs::File::create(&temp_path)?;
            file.write_all(content.as_bytes())?;
            file.sync_all()?;
        }

        fs::rename(&temp_path, &self.config_path)?;

        Ok(())
    }
}

fn push_section(output: &mut String, comment: &str, name: &str, body: &str) {
    output.push_str(&format!("# {}\n[{}]\n", comment, name));
    for line in body.lines() {
        output.push_str(line);
        output.push('\n');
    }
    output.push('\n');
}

/// Parse and validate config content.
fn parse_and_validate(content: &str) -> ConfigResult<Settings> {
    let settings: Settings = toml::from_str(content)?;
    validate(&settings)?;
    Ok(settings)
}

/// Check value ranges serde cannot express.
pub fn validate(settings: &Settings) -> ConfigResult<()> {
    if settings.analysis.sample_rate == 0 {
        return Err(ConfigError::Invalid {
            key: "analysis.sample_rate",
            reason: "must be greater than zero".to_string(),
        });
    }

    let dir_name = &settings.output.dir_name;
    if dir_name.trim().is_empty() {
        return Err(ConfigError::Invalid {
            key: "output.dir_name",
            reason: "must not be empty".to_string(),
        });
    }
    if dir_name.contains('/') || dir_name.contains('\\') || dir_name == ".." {
        return Err(ConfigError::Invalid {
            key: "output.dir_name",
            reason: format!("'{}' must be a single directory name", dir_name),
        });
    }

    for (key, value) in [
        ("tools.ffmpeg", &settings.tools.ffmpeg),
        ("tools.ffprobe", &settings.tools.ffprobe),
    ] {
        if value.trim().is_empty() {
            return Err(ConfigError::Invalid {
                key,
                reason: "must not be empty".to_string(),
            });
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::LogLevel;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn load_or_default_without_file_writes_nothing() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join(".config").join("clipsync.toml");

        let mut manager = ConfigManager::new(&config_path);
        manager.load_or_default().unwrap();

        assert_eq!(manager.settings(), &Settings::default());
        assert!(!config_path.exists());
        assert!(!dir.path().join(".config").exists());
    }

    #[test]
    fn load_reads_existing_values() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("clipsync.toml");
        fs::write(
            &config_path,
            "[output]\ndir_name = \"synced\"\n\n[logging]\nlevel = \"warn\"\n",
        )
        .unwrap();

        let mut manager = ConfigManager::new(&config_path);
        manager.load_or_default().unwrap();

        assert_eq!(manager.settings().output.dir_name, "synced");
        assert_eq!(manager.settings().logging.level, LogLevel::Warn);
        assert_eq!(manager.settings().analysis.sample_rate, 44100);
    }

    #[test]
    fn load_missing_file_is_not_found() {
        let dir = tempdir().unwrap();
        let mut manager = ConfigManager::new(dir.path().join("absent.toml"));
        assert!(matches!(manager.load(), Err(ConfigError::NotFound(_))));
    }

    #[test]
    fn malformed_toml_is_parse_error() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("clipsync.toml");
        fs::write(&config_path, "[analysis\nsample_rate = ").unwrap();

        let mut manager = ConfigManager::new(&config_path);
        assert!(matches!(
            manager.load_or_default(),
            Err(ConfigError::ParseError(_))
        ));
    }

    #[test]
    fn zero_sample_rate_is_rejected() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("clipsync.toml");
        fs::write(&config_path, "[analysis]\nsample_rate = 0\n").unwrap();

        let mut manager = ConfigManager::new(&config_path);
        let err = manager.load().unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid { key: "analysis.sample_rate", .. }
        ));
    }

    #[test]
    fn dir_name_must_be_single_component() {
        let mut settings = Settings::default();
        settings.output.dir_name = "out/cut".to_string();
        assert!(validate(&settings).is_err());

        settings.output.dir_name = "".to_string();
        assert!(validate(&settings).is_err());

        settings.output.dir_name = "synced".to_string();
        assert!(validate(&settings).is_ok());
    }

    #[test]
    fn save_then_load_round_trips() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join(".config").join("clipsync.toml");

        let mut manager = ConfigManager::new(&config_path);
        manager.settings_mut().analysis.use_soxr = true;
        manager.settings_mut().tools.ffmpeg = "/opt/bin/ffmpeg".to_string();
        manager.save().unwrap();

        let content = fs::read_to_string(&config_path).unwrap();
        assert!(content.starts_with("# clipsync configuration"));
        assert!(content.contains("[analysis]"));
        assert!(content.contains("[tools]"));
        assert!(content.contains("[output]"));
        assert!(content.contains("[logging]"));

        let mut reloaded = ConfigManager::new(&config_path);
        reloaded.load().unwrap();
        assert_eq!(reloaded.settings(), manager.settings());
    }

    #[test]
    fn atomic_write_creates_no_temp_on_success() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("clipsync.toml");

        ConfigManager::new(&config_path).save().unwrap();

        assert!(config_path.exists());
        assert!(!config_path.with_extension("toml.tmp").exists());
    }
}
