//! clipsync core - audio-driven video alignment.
//!
//! Finds the offset between a video's own audio and a separately recorded
//! track by FFT cross-correlation, then trims or pads the video so it lines
//! up with the external audio. The crate has no CLI dependencies.

pub mod analysis;
pub mod config;
pub mod logging;
pub mod media;
pub mod models;
pub mod orchestrator;
pub mod planning;

#[cfg(test)]
mod testing;

/// Returns the crate version.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
