//! Error types for a sync run.
//!
//! Each layer keeps its own error enum; [`SyncError`] wraps them so the
//! binary has one type to report.

use std::io;

use thiserror::Error;

use crate::analysis::DecodeError;
use crate::media::{CommandError, ProbeError};
use crate::models::{CodecType, StreamNotFound};

/// Any failure between probing the inputs and writing the output.
#[derive(Error, Debug)]
pub enum SyncError {
    /// Probing the video failed.
    #[error(transparent)]
    Probe(#[from] ProbeError),

    /// Decoding audio for analysis failed.
    #[error(transparent)]
    Decode(#[from] DecodeError),

    /// An edit command failed.
    #[error(transparent)]
    Command(#[from] CommandError),

    /// A required stream is missing.
    #[error(transparent)]
    StreamNotFound(#[from] StreamNotFound),

    /// The stream uses a codec the edit path cannot stream-copy.
    #[error("Unsupported {kind} codec '{found}' (expected {expected})")]
    UnsupportedCodec {
        kind: CodecType,
        expected: &'static str,
        found: String,
    },

    /// The probe did not report a field the padding encoder needs.
    #[error("Video stream info is missing '{field}'")]
    IncompleteStreamInfo { field: &'static str },

    /// File I/O error.
    #[error("I/O error in {operation}: {source}")]
    Io {
        operation: String,
        #[source]
        source: io::Error,
    },
}

impl SyncError {
    /// Create an unsupported codec error.
    pub fn unsupported_codec(
        kind: CodecType,
        expected: &'static str,
        found: impl Into<String>,
    ) -> Self {
        Self::UnsupportedCodec {
            kind,
            expected,
            found: found.into(),
        }
    }

    /// Create an I/O error with context.
    pub fn io(operation: impl Into<String>, source: io::Error) -> Self {
        Self::Io {
            operation: operation.into(),
            source,
        }
    }
}

/// Result type for sync operations.
pub type SyncResult<T> = Result<T, SyncError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unsupported_codec_message() {
        let err = SyncError::unsupported_codec(CodecType::Video, "h264", "hevc");
        assert_eq!(
            err.to_string(),
            "Unsupported video codec 'hevc' (expected h264)"
        );
    }

    #[test]
    fn wrapped_errors_keep_their_message() {
        let inner = CommandError::Failed {
            tool: "ffmpeg".into(),
            exit_code: 1,
            message: "boom".into(),
        };
        let err: SyncError = inner.into();
        assert_eq!(err.to_string(), "ffmpeg failed with exit code 1: boom");
    }

    #[test]
    fn io_error_has_context() {
        let err = SyncError::io(
            "creating output directory",
            io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        );
        assert!(err.to_string().starts_with("I/O error in creating output directory"));
    }
}
