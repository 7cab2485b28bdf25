//! Run orchestration.
//!
//! [`SyncPipeline`] drives one run: probe the video, gate codecs (edit mode
//! only), decode both inputs, estimate the lag, report, plan and hand the
//! plan to [`execute`].

mod errors;
mod executor;
mod pipeline;

pub use errors::{SyncError, SyncResult};
pub use executor::execute;
pub use pipeline::{RunOutcome, SyncPipeline, SyncRequest};
