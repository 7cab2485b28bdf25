//! External media tools.
//!
//! Probing and every file-producing edit go through the [`MediaTool`]
//! trait. [`FfmpegTool`] is the production implementation; command lines
//! are assembled by the pure builders in [`commands`] so their exact text
//! can be tested without ffmpeg installed.

pub mod commands;
mod ffmpeg;
mod probe;
mod runner;
mod types;

use std::path::Path;

use crate::models::{MediaInfo, Timecode};

pub use ffmpeg::FfmpegTool;
pub use probe::{parse_probe_json, probe_file};
pub use types::{
    CommandError, CommandResult, PaddingSpec, ProbeError, ProbeResult, ToolCommand,
};

/// Probe and edit operations on media files.
///
/// Calls are blocking and each one finishes before it returns.
pub trait MediaTool {
    /// Stream metadata for `path`.
    fn probe(&self, path: &Path) -> ProbeResult<MediaInfo>;

    /// Encode a leading segment matching `source`'s video encoding into
    /// `output`.
    fn synthesize_padding(
        &self,
        source: &Path,
        output: &Path,
        spec: &PaddingSpec,
    ) -> CommandResult<()>;

    /// Join `segments` in order by stream copy and keep the first
    /// `duration` of the result.
    fn concat_and_trim(
        &self,
        segments: &[&Path],
        duration: &Timecode,
        output: &Path,
    ) -> CommandResult<()>;

    /// Copy `duration` of `input` starting at `start`.
    fn trim_copy(
        &self,
        input: &Path,
        start: &Timecode,
        duration: &Timecode,
        output: &Path,
    ) -> CommandResult<()>;
}
