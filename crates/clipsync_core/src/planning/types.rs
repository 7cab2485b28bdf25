//! Plan types produced from an estimated lag.

use std::path::PathBuf;

use crate::analysis::Lag;
use crate::media::PaddingSpec;
use crate::models::{MediaInfo, Timecode};

/// Inputs to [`plan`](super::plan).
#[derive(Debug, Clone)]
pub struct PlanRequest<'a> {
    /// Estimated offset of the video's audio against the external audio.
    pub lag: Lag,
    /// Rate the lag is expressed in.
    pub sample_rate: u32,
    /// Length of the external audio before equalization, in samples.
    pub probe_duration_samples: usize,
    /// Probe of the video file.
    pub video: &'a MediaInfo,
    /// Stop after computing the timecodes.
    pub check_only: bool,
    /// Name of the output subdirectory next to the video.
    pub output_dir_name: &'a str,
}

/// What the executor does to the video.
#[derive(Debug, Clone, PartialEq)]
pub enum EditAction {
    /// Seek past `start`, keep `duration`, stream copy.
    TrimForward,
    /// Prepend a synthetic segment of `start`, then keep `duration`.
    PadAndConcat(PaddingSpec),
}

impl EditAction {
    pub fn is_padding(&self) -> bool {
        matches!(self, EditAction::PadAndConcat(_))
    }
}

/// A fully-resolved edit of one video file.
#[derive(Debug, Clone, PartialEq)]
pub struct EditPlan {
    pub lag: Lag,
    pub sample_rate: u32,
    /// `|lag|` as a timecode (the `-ss` or padding length).
    pub start: Timecode,
    /// Length of the external audio (the `-t` value).
    pub duration: Timecode,
    /// Video being edited.
    pub source: PathBuf,
    /// Directory the output goes into; may not exist yet.
    pub output_dir: PathBuf,
    /// Final output file.
    pub output_path: PathBuf,
    pub action: EditAction,
}

impl EditPlan {
    /// File name of the output, for reporting.
    pub fn output_file_name(&self) -> String {
        self.output_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}

/// Estimation results without any edit.
#[derive(Debug, Clone, PartialEq)]
pub struct CheckReport {
    pub lag: Lag,
    pub sample_rate: u32,
    pub start: Timecode,
    pub duration: Timecode,
}

/// Result of planning.
#[derive(Debug, Clone, PartialEq)]
pub enum PlanOutcome {
    Check(CheckReport),
    Edit(EditPlan),
}
