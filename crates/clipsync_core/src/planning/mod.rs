//! Alignment planning.
//!
//! A non-negative lag means the video's audio runs late, so the head of the
//! video is cut off (`TrimForward`). A negative lag means the external audio
//! starts first, so a synthetic segment is put in front of the video
//! (`PadAndConcat`). Either way the result is cut to the external audio's
//! length.

mod planner;
mod types;

pub use planner::{
    ensure_supported_codecs, output_dir_for, output_file_name, plan, SUPPORTED_AUDIO_CODEC,
    SUPPORTED_VIDEO_CODEC,
};
pub use types::{CheckReport, EditAction, EditPlan, PlanOutcome, PlanRequest};
