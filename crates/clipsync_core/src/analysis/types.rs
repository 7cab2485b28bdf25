//! Core types for offset analysis.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::models::Timecode;

/// Mono audio samples at a fixed sample rate.
#[derive(Debug, Clone, PartialEq)]
pub struct Waveform {
    /// Audio samples as f64 (mono).
    pub samples: Vec<f64>,
    /// Sample rate in Hz.
    pub sample_rate: u32,
}

impl Waveform {
    pub fn new(samples: Vec<f64>, sample_rate: u32) -> Self {
        Self {
            samples,
            sample_rate,
        }
    }

    /// Get the number of samples.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Check if the waveform is empty.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Duration in seconds.
    pub fn duration_secs(&self) -> f64 {
        self.samples.len() as f64 / self.sample_rate as f64
    }

    /// Length as a timecode.
    pub fn timecode(&self) -> Timecode {
        Timecode::from_samples(self.samples.len() as i64, self.sample_rate)
    }
}

/// Signed offset, in samples, at which two waveforms correlate best.
///
/// Positive: the reference's content appears later than the probe's, so the
/// reference has to be trimmed by `|lag|` at its head. Negative: the probe
/// starts before the reference and the reference needs leading padding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Lag(pub i64);

impl Lag {
    pub fn samples(self) -> i64 {
        self.0
    }

    /// True when the reference needs leading padding.
    pub fn is_backward(self) -> bool {
        self.0 < 0
    }

    /// `|lag|` as a timecode.
    pub fn timecode(self, sample_rate: u32) -> Timecode {
        Timecode::from_samples(self.0, sample_rate)
    }
}

impl fmt::Display for Lag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Error types for decoding audio into a waveform.
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    /// Source file not found.
    #[error("Source file not found: {0}")]
    SourceNotFound(String),

    /// FFmpeg execution failed.
    #[error("FFmpeg error: {0}")]
    FfmpegError(String),

    /// The file decoded to zero samples (no audio stream).
    #[error("No audio samples decoded from {0}")]
    NoSamples(String),
}

/// Type alias for decode results.
pub type DecodeResult<T> = Result<T, DecodeError>;
