//! # Decryption Job
//!
//! A job decrypts one container into one output file on a dedicated worker,
//! reporting over a one-directional channel:
//!
//! ```text
//! Progress(0..=100)*  then exactly one of  Completed(path) | Failed(error) | Cancelled
//! ```
//!
//! The only state shared with the caller is the [`CancelToken`](crate::CancelToken)
//! and that channel.

pub(crate) mod event;
pub(crate) mod handle;
pub(crate) mod progress;
pub(crate) mod state;
pub(crate) mod worker;

pub use event::JobEvent;
pub use handle::JobHandle;
pub use progress::ProgressTracker;
pub use state::JobState;
pub use worker::DecryptionJob;
