//! Lag to edit plan.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use super::types::{CheckReport, EditAction, EditPlan, PlanOutcome, PlanRequest};
use crate::media::PaddingSpec;
use crate::models::{CodecType, MediaInfo, StreamInfo, Timecode};
use crate::orchestrator::{SyncError, SyncResult};

/// Video codec the edit path accepts.
pub const SUPPORTED_VIDEO_CODEC: &str = "h264";
/// Audio codec the edit path accepts.
pub const SUPPORTED_AUDIO_CODEC: &str = "aac";

/// Turn an estimated lag into a check report or an edit plan.
///
/// In check mode nothing but the timecodes is computed. Otherwise the codec
/// gate runs before any output path is derived.
pub fn plan(request: &PlanRequest<'_>) -> SyncResult<PlanOutcome> {
    let start = request.lag.timecode(request.sample_rate);
    let duration =
        Timecode::from_samples(request.probe_duration_samples as i64, request.sample_rate);

    if request.check_only {
        return Ok(PlanOutcome::Check(CheckReport {
            lag: request.lag,
            sample_rate: request.sample_rate,
            start,
            duration,
        }));
    }

    let video_stream = ensure_supported_codecs(request.video)?;

    let action = if request.lag.is_backward() {
        EditAction::PadAndConcat(padding_spec(video_stream, start)?)
    } else {
        EditAction::TrimForward
    };

    let source = request.video.path().to_path_buf();
    let output_dir = output_dir_for(&source, request.output_dir_name);
    let output_path = output_dir.join(output_file_name(&source, &start));

    tracing::debug!(
        "Planned {} for lag {}: {}",
        if action.is_padding() { "pad+concat" } else { "trim" },
        request.lag,
        output_path.display()
    );

    Ok(PlanOutcome::Edit(EditPlan {
        lag: request.lag,
        sample_rate: request.sample_rate,
        start,
        duration,
        source,
        output_dir,
        output_path,
        action,
    }))
}

/// Require an h264 first video stream and an aac first audio stream.
///
/// Returns the video stream on success.
pub fn ensure_supported_codecs(video: &MediaInfo) -> SyncResult<&StreamInfo> {
    let video_stream = video.require_stream(CodecType::Video)?;
    if video_stream.codec_name != SUPPORTED_VIDEO_CODEC {
        return Err(SyncError::unsupported_codec(
            CodecType::Video,
            SUPPORTED_VIDEO_CODEC,
            &video_stream.codec_name,
        ));
    }

    let audio_stream = video.require_stream(CodecType::Audio)?;
    if audio_stream.codec_name != SUPPORTED_AUDIO_CODEC {
        return Err(SyncError::unsupported_codec(
            CodecType::Audio,
            SUPPORTED_AUDIO_CODEC,
            &audio_stream.codec_name,
        ));
    }

    Ok(video_stream)
}

fn padding_spec(stream: &StreamInfo, duration: Timecode) -> SyncResult<PaddingSpec> {
    let profile = stream
        .profile
        .clone()
        .ok_or(SyncError::IncompleteStreamInfo { field: "profile" })?;
    let level = stream
        .level
        .ok_or(SyncError::IncompleteStreamInfo { field: "level" })?;
    let pix_fmt = stream
        .pix_fmt
        .clone()
        .ok_or(SyncError::IncompleteStreamInfo { field: "pix_fmt" })?;

    Ok(PaddingSpec {
        duration,
        video_stream_index: stream.index,
        codec_name: stream.codec_name.clone(),
        profile,
        level,
        pix_fmt,
    })
}

/// `<video dir>/<dir_name>`
pub fn output_dir_for(video: &Path, dir_name: &str) -> PathBuf {
    video
        .parent()
        .unwrap_or_else(|| Path::new(""))
        .join(dir_name)
}

/// `<stem>_<HH-MM-SS.mmm><ext>`
pub fn output_file_name(video: &Path, start: &Timecode) -> String {
    let stem = video
        .file_stem()
        .unwrap_or_else(|| OsStr::new(""))
        .to_string_lossy();
    let ext = video
        .extension()
        .map(|e| format!(".{}", e.to_string_lossy()))
        .unwrap_or_default();
    format!("{}_{}{}", stem, start.file_safe(), ext)
}
