//! Stream metadata snapshots returned by a media probe.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Kind of elementary stream inside a container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CodecType {
    Video,
    Audio,
    #[default]
    Other,
}

impl CodecType {
    /// Map an ffprobe `codec_type` string. Anything that is not video or
    /// audio (subtitles, data, attachments) is `Other`.
    pub fn from_probe_str(s: &str) -> Self {
        match s {
            "video" => CodecType::Video,
            "audio" => CodecType::Audio,
            _ => CodecType::Other,
        }
    }
}

impl std::fmt::Display for CodecType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CodecType::Video => write!(f, "video"),
            CodecType::Audio => write!(f, "audio"),
            CodecType::Other => write!(f, "other"),
        }
    }
}

/// Metadata for a single stream.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct StreamInfo {
    /// Stream index (ffprobe ordering).
    pub index: usize,
    /// Stream kind.
    pub codec_type: CodecType,
    /// Codec name (e.g., "h264", "aac").
    pub codec_name: String,
    /// Codec profile (e.g., "High", "LC").
    pub profile: Option<String>,
    /// Codec level as reported by ffprobe (e.g., 40 for 4.0).
    pub level: Option<i64>,
    /// Pixel format (video only).
    pub pix_fmt: Option<String>,
}

impl StreamInfo {
    pub fn is(&self, kind: CodecType) -> bool {
        self.codec_type == kind
    }
}

/// No stream of the requested kind exists in the file.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("No {kind} stream found in {}", path.display())]
pub struct StreamNotFound {
    pub kind: CodecType,
    pub path: PathBuf,
}

/// All streams of one media file, in input order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MediaInfo {
    /// File that was probed.
    pub path: PathBuf,
    /// Streams in the order the container lists them.
    pub streams: Vec<StreamInfo>,
}

impl MediaInfo {
    pub fn new(path: impl Into<PathBuf>, streams: Vec<StreamInfo>) -> Self {
        Self {
            path: path.into(),
            streams,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// First stream of the given kind, by input order.
    pub fn first_stream(&self, kind: CodecType) -> Option<&StreamInfo> {
        self.streams.iter().find(|s| s.is(kind))
    }

    /// Like [`first_stream`](Self::first_stream), but absence is an error.
    pub fn require_stream(&self, kind: CodecType) -> Result<&StreamInfo, StreamNotFound> {
        self.first_stream(kind).ok_or_else(|| StreamNotFound {
            kind,
            path: self.path.clone(),
        })
    }

    /// First video stream, if any.
    pub fn first_video(&self) -> Option<&StreamInfo> {
        self.first_stream(CodecType::Video)
    }

    /// First audio stream, if any.
    pub fn first_audio(&self) -> Option<&StreamInfo> {
        self.first_stream(CodecType::Audio)
    }
}
