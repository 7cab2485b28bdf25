//! Audio offset analysis.
//!
//! The analysis path is a chain of small pure steps:
//!
//! 1. **Loading** (`loader`): decode each file's audio to a mono waveform at
//!    a common sample rate (FFmpeg pipe, f64 samples).
//! 2. **Padding** (`padding`): zero-pad the shorter waveform at its tail so
//!    both have the same length.
//! 3. **Correlation** (`correlation`): full FFT cross-correlation, then the
//!    index of the maximum value minus `N - 1` is the lag.
//!
//! # Usage
//!
//! ```ignore
//! use clipsync_core::analysis::{equalize_lengths, find_offset, FfmpegLoader, SignalLoader};
//!
//! let loader = FfmpegLoader::default();
//! let video = loader.load(video_path, 44100)?;
//! let audio = loader.load(audio_path, 44100)?;
//! let (video, audio) = equalize_lengths(video, audio);
//! let lag = find_offset(&video, &audio);
//! ```

mod correlation;
mod loader;
mod padding;
mod types;

pub use correlation::{cross_correlate, find_offset};
pub use loader::{FfmpegLoader, SignalLoader, DEFAULT_ANALYSIS_SAMPLE_RATE};
pub use padding::equalize_lengths;
pub use types::{DecodeError, DecodeResult, Lag, Waveform};
