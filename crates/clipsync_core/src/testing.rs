//! Recording fakes for the loader and media tool traits.

use std::cell::RefCell;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::analysis::{DecodeError, DecodeResult, SignalLoader, Waveform};
use crate::logging::LineCallback;
use crate::media::commands;
use crate::media::{
    CommandError, CommandResult, MediaTool, PaddingSpec, ProbeError, ProbeResult, ToolCommand,
};
use crate::models::{CodecType, MediaInfo, StreamInfo, Timecode};

/// One call made against [`RecordingTool`].
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum ToolCall {
    Probe(PathBuf),
    SynthesizePadding {
        source: PathBuf,
        output: PathBuf,
        spec: PaddingSpec,
    },
    ConcatAndTrim {
        segments: Vec<PathBuf>,
        duration: String,
        output: PathBuf,
        /// Whether the first segment existed on disk when concat ran.
        first_segment_existed: bool,
    },
    TrimCopy {
        input: PathBuf,
        start: String,
        duration: String,
        output: PathBuf,
    },
}

/// Concat list path shown in echoed concat commands.
pub(crate) const ECHO_CONCAT_LIST: &str = "concat.txt";

/// Media tool that records calls and writes placeholder files.
///
/// With a command callback, each edit call echoes the ffmpeg line the real
/// tool would run, built by [`commands`].
pub(crate) struct RecordingTool {
    media: Option<MediaInfo>,
    fail_synthesize: bool,
    fail_concat: bool,
    on_command: Option<LineCallback>,
    calls: RefCell<Vec<ToolCall>>,
}

impl RecordingTool {
    pub fn new(media: MediaInfo) -> Self {
        Self {
            media: Some(media),
            fail_synthesize: false,
            fail_concat: false,
            on_command: None,
            calls: RefCell::new(Vec::new()),
        }
    }

    /// Probing always fails.
    pub fn without_media() -> Self {
        Self {
            media: None,
            fail_synthesize: false,
            fail_concat: false,
            on_command: None,
            calls: RefCell::new(Vec::new()),
        }
    }

    pub fn failing_synthesize(mut self) -> Self {
        self.fail_synthesize = true;
        self
    }

    pub fn failing_concat(mut self) -> Self {
        self.fail_concat = true;
        self
    }

    pub fn with_command_callback(mut self, callback: LineCallback) -> Self {
        self.on_command = Some(callback);
        self
    }

    pub fn calls(&self) -> Vec<ToolCall> {
        self.calls.borrow().clone()
    }

    fn echo(&self, cmd: ToolCommand) {
        if let Some(ref cb) = self.on_command {
            cb(&cmd.to_string());
        }
    }

    fn failure() -> CommandError {
        CommandError::Failed {
            tool: "ffmpeg".to_string(),
            exit_code: 1,
            message: "simulated failure".to_string(),
        }
    }
}

impl MediaTool for RecordingTool {
    fn probe(&self, path: &Path) -> ProbeResult<MediaInfo> {
        self.calls.borrow_mut().push(ToolCall::Probe(path.to_path_buf()));
        match &self.media {
            Some(media) => Ok(MediaInfo::new(path, media.streams.clone())),
            None => Err(ProbeError::ToolFailed {
                tool: "ffprobe".to_string(),
                exit_code: 1,
                message: "Invalid data found when processing input".to_string(),
            }),
        }
    }

    fn synthesize_padding(
        &self,
        source: &Path,
        output: &Path,
        spec: &PaddingSpec,
    ) -> CommandResult<()> {
        self.calls.borrow_mut().push(ToolCall::SynthesizePadding {
            source: source.to_path_buf(),
            output: output.to_path_buf(),
            spec: spec.clone(),
        });
        self.echo(commands::synthesize_padding("ffmpeg", source, output, spec));
        fs::write(output, b"padding").map_err(|e| CommandError::io("writing padding", e))?;
        if self.fail_synthesize {
            return Err(Self::failure());
        }
        Ok(())
    }

    fn concat_and_trim(
        &self,
        segments: &[&Path],
        duration: &Timecode,
        output: &Path,
    ) -> CommandResult<()> {
        self.calls.borrow_mut().push(ToolCall::ConcatAndTrim {
            segments: segments.iter().map(|p| p.to_path_buf()).collect(),
            duration: duration.to_string(),
            output: output.to_path_buf(),
            first_segment_existed: segments.first().is_some_and(|p| p.exists()),
        });
        self.echo(commands::concat(
            "ffmpeg",
            Path::new(ECHO_CONCAT_LIST),
            duration,
            output,
        ));
        if self.fail_concat {
            return Err(Self::failure());
        }
        fs::write(output, b"joined").map_err(|e| CommandError::io("writing output", e))
    }

    fn trim_copy(
        &self,
        input: &Path,
        start: &Timecode,
        duration: &Timecode,
        output: &Path,
    ) -> CommandResult<()> {
        self.calls.borrow_mut().push(ToolCall::TrimCopy {
            input: input.to_path_buf(),
            start: start.to_string(),
            duration: duration.to_string(),
            output: output.to_path_buf(),
        });
        self.echo(commands::trim_copy("ffmpeg", input, start, duration, output));
        fs::write(output, b"trimmed").map_err(|e| CommandError::io("writing output", e))
    }
}

/// Loader serving canned waveforms by path.
#[derive(Default)]
pub(crate) struct FakeLoader {
    waveforms: HashMap<PathBuf, Waveform>,
    loads: RefCell<Vec<(PathBuf, u32)>>,
}

impl FakeLoader {
    pub fn with(mut self, path: impl Into<PathBuf>, waveform: Waveform) -> Self {
        self.waveforms.insert(path.into(), waveform);
        self
    }

    pub fn loads(&self) -> Vec<(PathBuf, u32)> {
        self.loads.borrow().clone()
    }
}

impl SignalLoader for FakeLoader {
    fn load(&self, path: &Path, sample_rate: u32) -> DecodeResult<Waveform> {
        self.loads
            .borrow_mut()
            .push((path.to_path_buf(), sample_rate));
        self.waveforms
            .get(path)
            .cloned()
            .ok_or_else(|| DecodeError::SourceNotFound(path.display().to_string()))
    }
}

/// Probe result for a typical phone recording.
pub(crate) fn h264_aac_media(path: impl Into<PathBuf>) -> MediaInfo {
    media_with_codecs(path, "h264", "aac")
}

pub(crate) fn media_with_codecs(path: impl Into<PathBuf>, video: &str, audio: &str) -> MediaInfo {
    MediaInfo::new(
        path,
        vec![
            StreamInfo {
                index: 0,
                codec_type: CodecType::Video,
                codec_name: video.to_string(),
                profile: Some("High".to_string()),
                level: Some(40),
                pix_fmt: Some("yuv420p".to_string()),
                ..Default::default()
            },
            StreamInfo {
                index: 1,
                codec_type: CodecType::Audio,
                codec_name: audio.to_string(),
                profile: Some("LC".to_string()),
                ..Default::default()
            },
        ],
    )
}
