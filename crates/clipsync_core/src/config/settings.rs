//! Settings struct with TOML-based sections.
//!
//! Every field has a default, so a partial (or empty) file is valid.

use serde::{Deserialize, Serialize};

use crate::analysis::DEFAULT_ANALYSIS_SAMPLE_RATE;
use crate::logging::LogLevel;

/// Root settings structure containing all configuration sections.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Audio decoding for analysis.
    #[serde(default)]
    pub analysis: AnalysisSettings,

    /// External executables.
    #[serde(default)]
    pub tools: ToolSettings,

    /// Where edited files are written.
    #[serde(default)]
    pub output: OutputSettings,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingSettings,
}

/// Audio decoding parameters for offset analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisSettings {
    /// Rate both inputs are resampled to, in Hz.
    #[serde(default = "default_sample_rate")]
    pub sample_rate: u32,

    /// Use the SOXR resampler.
    #[serde(default)]
    pub use_soxr: bool,
}

fn default_sample_rate() -> u32 {
    DEFAULT_ANALYSIS_SAMPLE_RATE
}

impl Default for AnalysisSettings {
    fn default() -> Self {
        Self {
            sample_rate: default_sample_rate(),
            use_soxr: false,
        }
    }
}

/// External tool executables, by name or path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolSettings {
    #[serde(default = "default_ffmpeg")]
    pub ffmpeg: String,

    #[serde(default = "default_ffprobe")]
    pub ffprobe: String,
}

fn default_ffmpeg() -> String {
    "ffmpeg".to_string()
}

fn default_ffprobe() -> String {
    "ffprobe".to_string()
}

impl Default for ToolSettings {
    fn default() -> Self {
        Self {
            ffmpeg: default_ffmpeg(),
            ffprobe: default_ffprobe(),
        }
    }
}

/// Output placement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputSettings {
    /// Subdirectory of the video's directory that receives edited files.
    #[serde(default = "default_dir_name")]
    pub dir_name: String,
}

fn default_dir_name() -> String {
    "cut".to_string()
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            dir_name: default_dir_name(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LoggingSettings {
    /// Level used when `RUST_LOG` is not set.
    #[serde(default)]
    pub level: LogLevel,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_gives_defaults() {
        let settings: Settings = toml::from_str("").unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.analysis.sample_rate, 44100);
        assert_eq!(settings.tools.ffmpeg, "ffmpeg");
        assert_eq!(settings.output.dir_name, "cut");
        assert_eq!(settings.logging.level, LogLevel::Info);
    }

    #[test]
    fn partial_section_keeps_other_defaults() {
        let settings: Settings = toml::from_str(
            "[analysis]\nuse_soxr = true\n\n[tools]\nffprobe = \"/opt/ffprobe\"\n",
        )
        .unwrap();

        assert!(settings.analysis.use_soxr);
        assert_eq!(settings.analysis.sample_rate, 44100);
        assert_eq!(settings.tools.ffprobe, "/opt/ffprobe");
        assert_eq!(settings.tools.ffmpeg, "ffmpeg");
    }

    #[test]
    fn serializes_round_trip() {
        let mut settings = Settings::default();
        settings.output.dir_name = "synced".to_string();
        settings.logging.level = LogLevel::Debug;

        let text = toml::to_string_pretty(&settings).unwrap();
        assert!(text.contains("level = \"debug\""));
        let back: Settings = toml::from_str(&text).unwrap();
        assert_eq!(back, settings);
    }
}
