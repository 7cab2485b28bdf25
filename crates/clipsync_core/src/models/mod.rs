//! Data models shared across the crate.
//!
//! - Stream metadata from probing (`MediaInfo`, `StreamInfo`, `CodecType`)
//! - `HH:MM:SS.mmm` timecodes derived from sample counts

mod media;
mod timecode;

pub use media::{CodecType, MediaInfo, StreamInfo, StreamNotFound};
pub use timecode::{format_time, Timecode};
