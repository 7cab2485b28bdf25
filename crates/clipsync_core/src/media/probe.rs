//! Stream probing using `ffprobe -show_streams -of json`.

use std::path::Path;

use serde_json::Value;

use super::commands;
use super::runner::run_captured;
use super::types::{ProbeError, ProbeResult};
use crate::models::{CodecType, MediaInfo, StreamInfo};

/// Probe a media file with the given ffprobe executable.
pub fn probe_file(ffprobe: &str, path: &Path) -> ProbeResult<MediaInfo> {
    if !path.exists() {
        return Err(ProbeError::FileNotFound(path.to_path_buf()));
    }

    tracing::debug!("Probing file: {}", path.display());

    let cmd = commands::probe(ffprobe, path);
    let output = run_captured(&cmd).map_err(|e| ProbeError::Spawn {
        tool: cmd.tool_name(),
        source: e,
    })?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(ProbeError::ToolFailed {
            tool: cmd.tool_name(),
            exit_code: output.status.code().unwrap_or(-1),
            message: stderr.trim().to_string(),
        });
    }

    let json: Value = serde_json::from_slice(&output.stdout)?;
    parse_probe_json(&json, path)
}

/// Parse ffprobe's JSON document into a [`MediaInfo`].
///
/// Streams keep the order ffprobe reports. Fields ffprobe leaves out
/// stay `None`; planning decides which of them it needs.
pub fn parse_probe_json(json: &Value, path: &Path) -> ProbeResult<MediaInfo> {
    let streams: Vec<StreamInfo> = json
        .get("streams")
        .and_then(|s| s.as_array())
        .map(|arr| arr.iter().filter_map(parse_stream_info).collect())
        .unwrap_or_default();

    if streams.is_empty() {
        return Err(ProbeError::NoStreams(path.to_path_buf()));
    }

    tracing::debug!(
        "Found {} stream(s) in {}",
        streams.len(),
        path.display()
    );

    Ok(MediaInfo::new(path, streams))
}

fn parse_stream_info(stream: &Value) -> Option<StreamInfo> {
    let index = stream.get("index")?.as_u64()? as usize;

    let codec_type = stream
        .get("codec_type")
        .and_then(|t| t.as_str())
        .map(CodecType::from_probe_str)
        .unwrap_or_default();

    let codec_name = stream
        .get("codec_name")
        .and_then(|c| c.as_str())
        .unwrap_or("")
        .to_string();

    let profile = string_field(stream, "profile");
    let pix_fmt = string_field(stream, "pix_fmt");

    // ffprobe reports -99 when the level is unknown
    let level = stream
        .get("level")
        .and_then(|l| l.as_i64())
        .filter(|&l| l >= 0);

    Some(StreamInfo {
        index,
        codec_type,
        codec_name,
        profile,
        level,
        pix_fmt,
    })
}

fn string_field(stream: &Value, key: &str) -> Option<String> {
    stream
        .get(key)
        .and_then(|v| v.as_str())
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string())
}
