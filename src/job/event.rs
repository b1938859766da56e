//! Notifications sent from a worker to the caller.

use std::path::PathBuf;

use crate::error::MediacryptError;

/// One message on the job's notification channel.
///
/// The channel carries zero or more `Progress` values followed by exactly one
/// terminal event.
#[derive(Debug)]
pub enum JobEvent {
    /// Integer percentage in `0..=100`, strictly increasing.
    Progress(u8),
    /// Decryption finished; the plaintext lives at this path.
    Completed(PathBuf),
    /// Decryption failed; the error's `Display` is the user-facing message.
    Failed(MediacryptError),
    /// Stopped on request. Whatever was written stays on disk.
    Cancelled,
}

impl JobEvent {
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        !matches!(self, JobEvent::Progress(_))
    }
}
