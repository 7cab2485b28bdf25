//! Types shared by the media tool layer.

use std::ffi::OsString;
use std::fmt;
use std::io;
use std::path::PathBuf;

use crate::models::{StreamNotFound, Timecode};

/// Encoding parameters for a synthetic leading segment.
///
/// The segment is concatenated with the source by stream copy, so its
/// codec, profile, level and pixel format must match the source video.
#[derive(Debug, Clone, PartialEq)]
pub struct PaddingSpec {
    /// Length of the segment.
    pub duration: Timecode,
    /// Index of the source video stream to pad from.
    pub video_stream_index: usize,
    /// Video codec name (e.g., "h264").
    pub codec_name: String,
    /// Codec profile (e.g., "High").
    pub profile: String,
    /// Codec level as ffprobe reports it (e.g., 40).
    pub level: i64,
    /// Pixel format (e.g., "yuv420p").
    pub pix_fmt: String,
}

/// A fully-built external command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolCommand {
    pub program: OsString,
    pub args: Vec<OsString>,
}

impl ToolCommand {
    pub fn new(program: impl Into<OsString>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    pub fn arg(mut self, arg: impl Into<OsString>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Program file name, for error messages.
    pub fn tool_name(&self) -> String {
        PathBuf::from(&self.program)
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.program.to_string_lossy().into_owned())
    }
}

/// Space-joined program and arguments, as echoed to the user.
impl fmt::Display for ToolCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program.to_string_lossy())?;
        for arg in &self.args {
            write!(f, " {}", arg.to_string_lossy())?;
        }
        Ok(())
    }
}

/// Errors from probing a media file.
#[derive(Debug, thiserror::Error)]
pub enum ProbeError {
    /// File not found.
    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),

    /// The probe tool could not be started.
    #[error("Failed to run {tool}: {source}")]
    Spawn {
        tool: String,
        #[source]
        source: io::Error,
    },

    /// The probe tool exited with an error.
    #[error("{tool} encountered an error (exit code {exit_code}): {message}")]
    ToolFailed {
        tool: String,
        exit_code: i32,
        message: String,
    },

    /// Output could not be parsed.
    #[error("Failed to parse probe output: {0}")]
    Parse(#[from] serde_json::Error),

    /// The file has no streams at all.
    #[error("No streams found in {}", .0.display())]
    NoStreams(PathBuf),

    /// A required stream kind is missing.
    #[error(transparent)]
    StreamNotFound(#[from] StreamNotFound),
}

/// Type alias for probe results.
pub type ProbeResult<T> = Result<T, ProbeError>;

/// Errors from running a transcode/concat/trim command.
#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    /// The tool could not be started.
    #[error("Failed to run {tool}: {source}")]
    Spawn {
        tool: String,
        #[source]
        source: io::Error,
    },

    /// The tool exited with a non-zero status.
    #[error("{tool} failed with exit code {exit_code}: {message}")]
    Failed {
        tool: String,
        exit_code: i32,
        message: String,
    },

    /// Supporting file I/O failed.
    #[error("I/O error in {operation}: {source}")]
    Io {
        operation: String,
        #[source]
        source: io::Error,
    },
}

impl CommandError {
    pub fn io(operation: impl Into<String>, source: io::Error) -> Self {
        Self::Io {
            operation: operation.into(),
            source,
        }
    }
}

/// Type alias for command results.
pub type CommandResult<T> = Result<T, CommandError>;
