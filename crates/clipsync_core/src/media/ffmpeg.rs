//! [`MediaTool`] backed by the ffmpeg and ffprobe executables.

use std::io::Write;
use std::path::{Path, PathBuf};

use super::commands;
use super::probe::probe_file;
use super::runner::run_checked;
use super::types::{CommandError, CommandResult, PaddingSpec, ProbeResult, ToolCommand};
use super::MediaTool;
use crate::logging::LineCallback;
use crate::models::{MediaInfo, Timecode};

/// Runs ffmpeg/ffprobe as child processes.
///
/// Every edit command is passed to the command callback (if set) right
/// before it runs, rendered as a space-joined line.
pub struct FfmpegTool {
    ffmpeg: String,
    ffprobe: String,
    on_command: Option<LineCallback>,
}

impl FfmpegTool {
    pub fn new(ffmpeg: impl Into<String>, ffprobe: impl Into<String>) -> Self {
        Self {
            ffmpeg: ffmpeg.into(),
            ffprobe: ffprobe.into(),
            on_command: None,
        }
    }

    /// Echo each edit command line through `callback`.
    pub fn with_command_callback(mut self, callback: LineCallback) -> Self {
        self.on_command = Some(callback);
        self
    }

    fn run(&self, cmd: &ToolCommand) -> CommandResult<()> {
        if let Some(ref cb) = self.on_command {
            cb(&cmd.to_string());
        }
        run_checked(cmd)
    }
}

impl Default for FfmpegTool {
    fn default() -> Self {
        Self::new("ffmpeg", "ffprobe")
    }
}

impl std::fmt::Debug for FfmpegTool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FfmpegTool")
            .field("ffmpeg", &self.ffmpeg)
            .field("ffprobe", &self.ffprobe)
            .field("on_command", &self.on_command.is_some())
            .finish()
    }
}

impl MediaTool for FfmpegTool {
    fn probe(&self, path: &Path) -> ProbeResult<MediaInfo> {
        probe_file(&self.ffprobe, path)
    }

    fn synthesize_padding(
        &self,
        source: &Path,
        output: &Path,
        spec: &PaddingSpec,
    ) -> CommandResult<()> {
        tracing::debug!(
            "Synthesizing {} of padding ({} {} level {} {})",
            spec.duration,
            spec.codec_name,
            spec.profile,
            spec.level,
            spec.pix_fmt
        );
        let cmd = commands::synthesize_padding(&self.ffmpeg, source, output, spec);
        self.run(&cmd)
    }

    fn concat_and_trim(
        &self,
        segments: &[&Path],
        duration: &Timecode,
        output: &Path,
    ) -> CommandResult<()> {
        let absolute: Vec<PathBuf> = segments
            .iter()
            .map(std::path::absolute)
            .collect::<Result<_, _>>()
            .map_err(|e| CommandError::io("resolving concat segment path", e))?;

        // Removed when dropped at the end of this call
        let mut list = tempfile::Builder::new()
            .prefix("clipsync_concat_")
            .suffix(".txt")
            .tempfile()
            .map_err(|e| CommandError::io("creating concat list", e))?;

        list.write_all(commands::concat_list(&absolute).as_bytes())
            .and_then(|_| list.flush())
            .map_err(|e| CommandError::io("writing concat list", e))?;

        tracing::debug!(
            "Concat list {} with {} segment(s)",
            list.path().display(),
            absolute.len()
        );

        let cmd = commands::concat(&self.ffmpeg, list.path(), duration, output);
        self.run(&cmd)
    }

    fn trim_copy(
        &self,
        input: &Path,
        start: &Timecode,
        duration: &Timecode,
        output: &Path,
    ) -> CommandResult<()> {
        let cmd = commands::trim_copy(&self.ffmpeg, input, start, duration, output);
        self.run(&cmd)
    }
}
