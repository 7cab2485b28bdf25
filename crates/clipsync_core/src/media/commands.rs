//! Argument lists for every external tool invocation.
//!
//! Builders are pure: they only assemble a [`ToolCommand`], so the exact
//! command lines can be checked without ffmpeg installed.

use std::path::{Path, PathBuf};

use super::types::{PaddingSpec, ToolCommand};
use crate::models::Timecode;

/// Silent stereo source used for the audio track of a padding segment.
pub const SILENT_AUDIO_SOURCE: &str = "aevalsrc=0|0:c=stereo";

/// Black frames `tpad` adds ahead of the source, in seconds. Output is cut
/// by `-t`.
const PAD_LEAD_SECS: f64 = 10000.0;

/// `ffprobe -v error -show_streams -of json <path>`
pub fn probe(ffprobe: &str, path: &Path) -> ToolCommand {
    ToolCommand::new(ffprobe)
        .args(["-v", "error", "-show_streams", "-of", "json"])
        .arg(path)
}

/// Encode a leading segment of `spec.duration` of black video (added by
/// `tpad`) and silent stereo audio, matching the source encoding.
pub fn synthesize_padding(
    ffmpeg: &str,
    source: &Path,
    output: &Path,
    spec: &PaddingSpec,
) -> ToolCommand {
    let lead_secs = PAD_LEAD_SECS.max(spec.duration.as_secs().ceil() + 1.0);

    ToolCommand::new(ffmpeg)
        .arg("-i")
        .arg(source)
        .args(["-f", "lavfi", "-i", SILENT_AUDIO_SOURCE])
        .arg("-map")
        .arg(format!("0:{}", spec.video_stream_index))
        .args(["-map", "1:0"])
        .arg("-filter_complex")
        .arg(format!("tpad=start_duration={}", lead_secs))
        .arg("-t")
        .arg(spec.duration.to_string())
        .arg("-c:v")
        .arg(&spec.codec_name)
        .arg("-profile:v")
        .arg(&spec.profile)
        .arg("-level:v")
        .arg(spec.level.to_string())
        .arg("-pix_fmt")
        .arg(&spec.pix_fmt)
        .arg(output)
        .arg("-y")
}

/// Stream-copy the files named in `list` back to back, keeping `duration`.
pub fn concat(ffmpeg: &str, list: &Path, duration: &Timecode, output: &Path) -> ToolCommand {
    ToolCommand::new(ffmpeg)
        .args(["-safe", "0", "-f", "concat", "-i"])
        .arg(list)
        .arg("-t")
        .arg(duration.to_string())
        .args(["-c", "copy", "-movflags", "faststart"])
        .arg(output)
        .arg("-y")
}

/// Stream-copy `duration` of `input` starting at `start`.
pub fn trim_copy(
    ffmpeg: &str,
    input: &Path,
    start: &Timecode,
    duration: &Timecode,
    output: &Path,
) -> ToolCommand {
    ToolCommand::new(ffmpeg)
        .arg("-ss")
        .arg(start.to_string())
        .arg("-i")
        .arg(input)
        .arg("-t")
        .arg(duration.to_string())
        .args(["-c", "copy", "-movflags", "faststart"])
        .arg(output)
        .arg("-y")
}

/// Body of a concat-demuxer list file, one `file '<path>'` line per segment.
///
/// Single quotes inside a path are closed, escaped and reopened.
pub fn concat_list(segments: &[PathBuf]) -> String {
    segments
        .iter()
        .map(|p| {
            let escaped = p.to_string_lossy().replace('\'', r"'\''");
            format!("file '{}'\n", escaped)
        })
        .collect()
}
