//! Applies an [`EditPlan`] through a [`MediaTool`].

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempPath;

use super::errors::{SyncError, SyncResult};
use crate::media::{MediaTool, PaddingSpec};
use crate::planning::{EditAction, EditPlan};

/// Produce `plan.output_path`.
///
/// For the padding branch the synthetic segment lives in a uniquely named
/// temporary file inside the output directory and is removed before this
/// returns, whether the edit succeeded or not.
pub fn execute<T: MediaTool + ?Sized>(plan: &EditPlan, tool: &T) -> SyncResult<PathBuf> {
    fs::create_dir_all(&plan.output_dir)
        .map_err(|e| SyncError::io("creating output directory", e))?;

    match &plan.action {
        EditAction::TrimForward => {
            tool.trim_copy(&plan.source, &plan.start, &plan.duration, &plan.output_path)?;
        }
        EditAction::PadAndConcat(spec) => pad_and_concat(plan, spec, tool)?,
    }

    tracing::info!("Wrote {}", plan.output_path.display());
    Ok(plan.output_path.clone())
}

fn pad_and_concat<T: MediaTool + ?Sized>(
    plan: &EditPlan,
    spec: &PaddingSpec,
    tool: &T,
) -> SyncResult<()> {
    let padding = padding_path(plan)?;
    tracing::debug!("Padding segment at {}", padding.display());

    let segments: [&Path; 2] = [&padding, &plan.source];
    let result = tool
        .synthesize_padding(&plan.source, &padding, spec)
        .and_then(|_| tool.concat_and_trim(&segments, &plan.duration, &plan.output_path));

    if let Err(e) = padding.close() {
        tracing::warn!("Failed to remove padding segment: {}", e);
    }

    result.map_err(SyncError::from)
}

/// Reserve `<output dir>/<stem>_empty_XXXXXX<ext>`; deleted on drop.
fn padding_path(plan: &EditPlan) -> SyncResult<TempPath> {
    let stem = plan
        .source
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let ext = plan
        .source
        .extension()
        .map(|e| format!(".{}", e.to_string_lossy()))
        .unwrap_or_default();

    tempfile::Builder::new()
        .prefix(&format!("{}_empty_", stem))
        .suffix(&ext)
        .tempfile_in(&plan.output_dir)
        .map(|file| file.into_temp_path())
        .map_err(|e| SyncError::io("creating padding segment", e))
}
