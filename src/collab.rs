//! # Collaborator Interfaces
//!
//! The session talks to the outside world through three small traits: a
//! password prompt, a playback sink and a status display. UI toolkits implement
//! them; closures work for the first two.
//!
//! [`LogStatus`] is a [`StatusDisplay`] that renders the player's status line
//! through `tracing`.

use std::path::Path;

use tracing::{info, warn};

use crate::aliases::PasswordString;

/// Supplies the password for a container, or `None` when the user cancels.
pub trait PasswordPrompt {
    fn request_password(&mut self, container: &Path) -> Option<PasswordString>;
}

impl<F> PasswordPrompt for F
where
    F: FnMut(&Path) -> Option<PasswordString>,
{
    fn request_password(&mut self, container: &Path) -> Option<PasswordString> {
        self(container)
    }
}

/// Consumes a playable file: a completed job's output or a plain media file.
pub trait PlaybackSink {
    fn play(&mut self, media: &Path);
}

impl<F> PlaybackSink for F
where
    F: FnMut(&Path),
{
    fn play(&mut self, media: &Path) {
        self(media)
    }
}

/// Receives the job's progress and its single terminal outcome.
pub trait StatusDisplay {
    /// Integer percentage in `0..=100`.
    fn progress(&mut self, percent: u8);
    fn completed(&mut self, output: &Path);
    fn failed(&mut self, message: &str);
    fn cancelled(&mut self);

    /// The job completed but its output is unusable (missing or empty).
    fn rejected(&mut self, reason: &str) {
        self.failed(reason);
    }
}

/// [`StatusDisplay`] that logs each status line and remembers the last one.
#[derive(Debug, Default, Clone)]
pub struct LogStatus {
    last: Option<String>,
}

impl LogStatus {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The most recent status line, if any.
    #[must_use]
    pub fn last_message(&self) -> Option<&str> {
        self.last.as_deref()
    }
}

impl StatusDisplay for LogStatus {
    fn progress(&mut self, percent: u8) {
        let line = format!("Decrypting... {percent}%");
        info!("{line}");
        self.last = Some(line);
    }

    fn completed(&mut self, output: &Path) {
        let name = output
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| output.display().to_string());
        let line = format!("Loaded: {name}");
        info!("{line}");
        self.last = Some(line);
    }

    fn failed(&mut self, message: &str) {
        let line = format!("Decryption error: {message}");
        warn!("{line}");
        self.last = Some(line);
    }

    fn cancelled(&mut self) {
        let line = "Decryption canceled.".to_string();
        info!("{line}");
        self.last = Some(line);
    }

    fn rejected(&mut self, reason: &str) {
        let line = format!("Decryption failed: {reason}");
        warn!("{line}");
        self.last = Some(line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_status_wording() {
        let mut status = LogStatus::new();
        assert_eq!(status.last_message(), None);

        status.progress(42);
        assert_eq!(status.last_message(), Some("Decrypting... 42%"));

        status.completed(Path::new("/tmp/mediacrypt-x/movie.mp4"));
        assert_eq!(status.last_message(), Some("Loaded: movie.mp4"));

        status.failed("Format error: truncated header");
        assert_eq!(
            status.last_message(),
            Some("Decryption error: Format error: truncated header")
        );

        status.cancelled();
        assert_eq!(status.last_message(), Some("Decryption canceled."));

        status.rejected("Empty file");
        assert_eq!(status.last_message(), Some("Decryption failed: Empty file"));
    }

    #[test]
    fn closures_are_collaborators() {
        let mut prompt = |_: &Path| Some(PasswordString::new("pw".into()));
        let password = prompt.request_password(Path::new("a.enc")).unwrap();
        assert_eq!(password.as_str(), "pw");

        let mut played = Vec::new();
        let mut sink = |p: &Path| played.push(p.to_path_buf());
        sink.play(Path::new("a.mp4"));
        assert_eq!(played, vec![Path::new("a.mp4").to_path_buf()]);
    }
}
