//! `HH:MM:SS.mmm` timecodes derived from sample counts.

use std::fmt;

/// An absolute duration rendered as `HH:MM:SS.mmm`.
///
/// Built from a sample count and a sample rate. The sign of the sample
/// count is discarded, so a lag of `-44100` at 44.1 kHz and a lag of
/// `44100` both render as `00:00:01.000`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Timecode {
    seconds: f64,
}

impl Timecode {
    /// Create a timecode from a (possibly negative) sample count.
    pub fn from_samples(samples: i64, sample_rate: u32) -> Self {
        let seconds = samples.unsigned_abs() as f64 / sample_rate as f64;
        Self { seconds }
    }

    /// Duration in seconds (always non-negative).
    pub fn as_secs(&self) -> f64 {
        self.seconds
    }

    /// Split into whole hours, whole minutes and fractional seconds.
    fn parts(&self) -> (u64, u64, f64) {
        let minutes = (self.seconds / 60.0).floor();
        let secs = self.seconds - minutes * 60.0;
        let hours = (minutes / 60.0).floor();
        let minutes = minutes - hours * 60.0;
        (hours as u64, minutes as u64, secs)
    }

    /// Rendering safe for filenames: colons become hyphens.
    ///
    /// `00:01:02.500` becomes `00-01-02.500`.
    pub fn file_safe(&self) -> String {
        self.to_string().replace(':', "-")
    }
}

impl fmt::Display for Timecode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (h, m, s) = self.parts();
        write!(f, "{:02}:{:02}:{:06.3}", h, m, s)
    }
}

/// Format a sample count as `HH:MM:SS.mmm`, ignoring its sign.
pub fn format_time(samples: i64, sample_rate: u32) -> String {
    Timecode::from_samples(samples, sample_rate).to_string()
}
