//! One sync run from input paths to output file.

use std::path::{Path, PathBuf};

use super::errors::SyncResult;
use super::executor::execute;
use crate::analysis::{equalize_lengths, find_offset, SignalLoader, Waveform};
use crate::config::Settings;
use crate::logging::LineCallback;
use crate::media::MediaTool;
use crate::models::Timecode;
use crate::planning::{
    ensure_supported_codecs, plan, CheckReport, EditAction, PlanOutcome, PlanRequest,
};

/// Input files for a run.
#[derive(Debug, Clone)]
pub struct SyncRequest {
    /// Video whose own audio is the correlation reference.
    pub video: PathBuf,
    /// Separately recorded audio.
    pub audio: PathBuf,
    /// Estimate and report only.
    pub check_only: bool,
}

impl SyncRequest {
    pub fn new(video: impl Into<PathBuf>, audio: impl Into<PathBuf>) -> Self {
        Self {
            video: video.into(),
            audio: audio.into(),
            check_only: false,
        }
    }

    pub fn check_only(mut self, check_only: bool) -> Self {
        self.check_only = check_only;
        self
    }
}

/// How a run ended.
#[derive(Debug, Clone, PartialEq)]
pub enum RunOutcome {
    Checked(CheckReport),
    Written(PathBuf),
}

/// Probe, estimate, plan and edit.
///
/// User-facing lines (offset, timecodes, output name) go to the reporter.
pub struct SyncPipeline<L, T> {
    sample_rate: u32,
    output_dir_name: String,
    loader: L,
    tool: T,
    reporter: Option<LineCallback>,
}

impl<L: SignalLoader, T: MediaTool> SyncPipeline<L, T> {
    pub fn new(settings: &Settings, loader: L, tool: T) -> Self {
        Self {
            sample_rate: settings.analysis.sample_rate,
            output_dir_name: settings.output.dir_name.clone(),
            loader,
            tool,
            reporter: None,
        }
    }

    pub fn with_reporter(mut self, reporter: LineCallback) -> Self {
        self.reporter = Some(reporter);
        self
    }

    pub fn tool(&self) -> &T {
        &self.tool
    }

    pub fn loader(&self) -> &L {
        &self.loader
    }

    fn report(&self, line: &str) {
        if let Some(ref cb) = self.reporter {
            cb(line);
        }
    }

    pub fn run(&self, request: &SyncRequest) -> SyncResult<RunOutcome> {
        tracing::info!(
            "Syncing {} to {}",
            request.video.display(),
            request.audio.display()
        );

        let video_info = self.tool.probe(&request.video)?;
        if !request.check_only {
            ensure_supported_codecs(&video_info)?;
        }

        let reference = self.load(&request.video)?;
        let probe = self.load(&request.audio)?;
        let probe_len = probe.len();
        let (reference, probe) = equalize_lengths(reference, probe);

        let lag = find_offset(&reference, &probe);
        drop((reference, probe));

        self.report(&format!("Offset: {} {}", lag, self.sample_rate));
        self.report(&lag.timecode(self.sample_rate).to_string());
        self.report(&Timecode::from_samples(probe_len as i64, self.sample_rate).to_string());

        let outcome = plan(&PlanRequest {
            lag,
            sample_rate: self.sample_rate,
            probe_duration_samples: probe_len,
            video: &video_info,
            check_only: request.check_only,
            output_dir_name: &self.output_dir_name,
        })?;

        let edit = match outcome {
            PlanOutcome::Check(report) => {
                tracing::info!("Check only, nothing written");
                return Ok(RunOutcome::Checked(report));
            }
            PlanOutcome::Edit(edit) => edit,
        };

        self.report(&edit.output_file_name());
        if let EditAction::PadAndConcat(_) = edit.action {
            self.report("backward offset mode");
        }

        let written = execute(&edit, &self.tool)?;
        Ok(RunOutcome::Written(written))
    }

    fn load(&self, path: &Path) -> SyncResult<Waveform> {
        let waveform = self.loader.load(path, self.sample_rate)?;
        tracing::debug!(
            "Loaded {} ({} samples, {:.3}s)",
            path.display(),
            waveform.len(),
            waveform.duration_secs()
        );
        Ok(waveform)
    }
}
