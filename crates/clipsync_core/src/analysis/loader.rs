//! Audio decoding into waveforms.
//!
//! The FFmpeg loader converts any container's first audio stream to mono,
//! resamples it to the analysis sample rate, and reads raw f64 samples
//! from a pipe.

use std::io::Read;
use std::path::Path;
use std::process::{Command, Stdio};

use crate::analysis::types::{DecodeError, DecodeResult, Waveform};

/// Default sample rate for analysis.
pub const DEFAULT_ANALYSIS_SAMPLE_RATE: u32 = 44100;

/// Something that can turn a media file into a mono waveform.
pub trait SignalLoader {
    /// Decode `path` at `sample_rate`.
    fn load(&self, path: &Path, sample_rate: u32) -> DecodeResult<Waveform>;
}

/// Decodes audio by piping it through FFmpeg.
#[derive(Debug, Clone)]
pub struct FfmpegLoader {
    ffmpeg: String,
    use_soxr: bool,
}

impl FfmpegLoader {
    pub fn new(ffmpeg: impl Into<String>) -> Self {
        Self {
            ffmpeg: ffmpeg.into(),
            use_soxr: false,
        }
    }

    /// Use the SOXR high-quality resampler.
    pub fn with_soxr(mut self, use_soxr: bool) -> Self {
        self.use_soxr = use_soxr;
        self
    }

    fn build_command(&self, input_path: &Path, sample_rate: u32) -> Command {
        let mut cmd = Command::new(&self.ffmpeg);
        cmd.arg("-nostdin")
            .arg("-i")
            .arg(input_path)
            .arg("-vn")
            .arg("-ac")
            .arg("1")
            .arg("-ar")
            .arg(sample_rate.to_string());

        if self.use_soxr {
            cmd.arg("-resampler").arg("soxr");
        }

        cmd.arg("-f")
            .arg("f64le")
            .arg("-acodec")
            .arg("pcm_f64le")
            .arg("pipe:1");

        cmd.stdin(Stdio::null())
            .stderr(Stdio::piped())
            .stdout(Stdio::piped());
        cmd
    }
}

impl Default for FfmpegLoader {
    fn default() -> Self {
        Self::new("ffmpeg")
    }
}

impl SignalLoader for FfmpegLoader {
    fn load(&self, input_path: &Path, sample_rate: u32) -> DecodeResult<Waveform> {
        if !input_path.exists() {
            return Err(DecodeError::SourceNotFound(
                input_path.display().to_string(),
            ));
        }

        let mut cmd = self.build_command(input_path, sample_rate);
        tracing::debug!("Running FFmpeg: {:?}", cmd);

        let mut child = cmd
            .spawn()
            .map_err(|e| DecodeError::FfmpegError(format!("Failed to spawn FFmpeg: {}", e)))?;

        let mut stdout = child
            .stdout
            .take()
            .ok_or_else(|| DecodeError::FfmpegError("Failed to capture FFmpeg stdout".to_string()))?;

        // stderr must be drained while stdout is read
        let stderr_reader = child.stderr.take().map(|mut stderr| {
            std::thread::spawn(move || {
                let mut text = String::new();
                let _ = stderr.read_to_string(&mut text);
                text
            })
        });

        let mut buffer = Vec::new();
        stdout.read_to_end(&mut buffer).map_err(|e| {
            DecodeError::FfmpegError(format!("Failed to read FFmpeg output: {}", e))
        })?;

        let status = child
            .wait()
            .map_err(|e| DecodeError::FfmpegError(format!("FFmpeg process error: {}", e)))?;

        let stderr_text = stderr_reader
            .and_then(|h| h.join().ok())
            .unwrap_or_default();

        if !status.success() {
            return Err(DecodeError::FfmpegError(format!(
                "FFmpeg exited with code {:?}: {}",
                status.code(),
                stderr_text.trim()
            )));
        }

        let samples = bytes_to_f64_samples(&buffer);

        if samples.is_empty() {
            return Err(DecodeError::NoSamples(input_path.display().to_string()));
        }

        tracing::debug!(
            "Decoded {} samples ({:.2}s) from {}",
            samples.len(),
            samples.len() as f64 / sample_rate as f64,
            input_path.display()
        );

        Ok(Waveform::new(samples, sample_rate))
    }
}

/// Convert raw bytes to f64 samples (little-endian).
fn bytes_to_f64_samples(bytes: &[u8]) -> Vec<f64> {
    bytes
        .chunks_exact(8)
        .map(|chunk| {
            let mut arr = [0u8; 8];
            arr.copy_from_slice(chunk);
            f64::from_le_bytes(arr)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bytes_to_samples_converts_correctly() {
        let mut bytes = Vec::new();
        bytes.extend_from_slice(&0.5f64.to_le_bytes());
        bytes.extend_from_slice(&(-0.25f64).to_le_bytes());

        let samples = bytes_to_f64_samples(&bytes);

        assert_eq!(samples, vec![0.5, -0.25]);
    }

    #[test]
    fn bytes_to_samples_handles_partial() {
        // 10 bytes: one full sample, remainder ignored
        let bytes = vec![0u8; 10];
        assert_eq!(bytes_to_f64_samples(&bytes).len(), 1);
    }

    #[test]
    fn load_rejects_missing_file() {
        let loader = FfmpegLoader::default();
        let result = loader.load(Path::new("/nonexistent/file.mp4"), 44100);
        assert!(matches!(result, Err(DecodeError::SourceNotFound(_))));
    }

    #[test]
    fn command_requests_mono_f64_at_rate() {
        let loader = FfmpegLoader::new("/opt/ffmpeg").with_soxr(true);
        let cmd = loader.build_command(Path::new("in.mp4"), 44100);

        assert_eq!(cmd.get_program(), "/opt/ffmpeg");
        let args: Vec<_> = cmd
            .get_args()
            .map(|a| a.to_string_lossy().into_owned())
            .collect();
        assert_eq!(
            args,
            [
                "-nostdin", "-i", "in.mp4", "-vn", "-ac", "1", "-ar", "44100", "-resampler",
                "soxr", "-f", "f64le", "-acodec", "pcm_f64le", "pipe:1"
            ]
        );
    }

    #[test]
    fn command_detaches_from_terminal_input() {
        let cmd = FfmpegLoader::default().build_command(Path::new("in.mp4"), 8000);
        assert_eq!(cmd.get_args().next(), Some(std::ffi::OsStr::new("-nostdin")));
        assert!(!cmd.get_args().any(|a| a == "soxr"));
    }
}
