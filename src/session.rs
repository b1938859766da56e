//! # Player Session
//!
//! Ties one open request to the rest of the system:
//!
//! ```text
//! path ─► open() ─┬─ plain media ──────────────────────────────► OpenOutcome::Direct
//!                 ├─ prompt cancelled / empty password ────────► OpenOutcome::PromptCancelled
//!                 └─ container ─► DecryptionJob::spawn ────────► OpenOutcome::Started(handle)
//!
//! drive(handle) ─► StatusDisplay ─► (Completed) validate ─► registry.register ─► PlaybackSink
//! ```
//!
//! The session owns the [`TempOutputRegistry`], so the output directory lives
//! exactly as long as the session. It also tracks which output paths are being
//! written, so two jobs never write the same file at once.

use std::collections::HashMap;
use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::builders::DecryptJobBuilder;
use crate::collab::{PasswordPrompt, PlaybackSink, StatusDisplay};
use crate::consts::{CONTAINER_SUFFIX, DEFAULT_CHUNK_SIZE};
use crate::error::MediacryptError;
use crate::header::read_header;
use crate::job::{JobEvent, JobHandle, JobState};
use crate::naming::{is_container, is_supported_media, output_file_name};
use crate::registry::{TeardownReport, TempOutputRegistry};

/// Result of [`Session::open`].
#[derive(Debug)]
pub enum OpenOutcome {
    /// Not a container; play this path as-is.
    Direct(PathBuf),
    /// The prompt was dismissed or returned an empty password. No job exists.
    PromptCancelled,
    /// A decryption job is running; pass the handle to [`Session::drive`].
    Started(JobHandle),
}

#[derive(Debug)]
pub struct Session {
    registry: TempOutputRegistry,
    chunk_size: usize,
    container_suffix: String,
    /// Container path to the output path its job is writing.
    in_flight: HashMap<PathBuf, PathBuf>,
}

impl Session {
    /// Start a session with a fresh temporary output directory.
    pub fn start() -> Result<Self, MediacryptError> {
        Ok(Self::with_registry(TempOutputRegistry::new()?))
    }

    /// Start a session whose output directory lives under `parent`.
    pub fn start_in(parent: impl AsRef<Path>) -> Result<Self, MediacryptError> {
        Ok(Self::with_registry(TempOutputRegistry::new_in(parent)?))
    }

    fn with_registry(registry: TempOutputRegistry) -> Self {
        info!(dir = ?registry.dir(), "session started");
        Self {
            registry,
            chunk_size: DEFAULT_CHUNK_SIZE,
            container_suffix: CONTAINER_SUFFIX.to_string(),
            in_flight: HashMap::new(),
        }
    }

    /// Chunk size for jobs started by this session (minimum 1).
    #[must_use]
    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size.max(1);
        self
    }

    #[must_use]
    pub fn with_container_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.container_suffix = suffix.into();
        self
    }

    #[must_use]
    pub fn registry(&self) -> &TempOutputRegistry {
        &self.registry
    }

    /// `true` while a job started for `input` has not been driven to its end.
    #[must_use]
    pub fn is_decrypting(&self, input: &Path) -> bool {
        self.in_flight.contains_key(input)
    }

    /// Where decrypted files are written, `None` after shutdown.
    #[must_use]
    pub fn output_dir(&self) -> Option<&Path> {
        self.registry.dir()
    }

    /// Handle one open request.
    ///
    /// Containers are recognised by the container suffix. The prompt is only
    /// consulted for containers.
    ///
    /// The output path of a started job stays reserved until [`drive`](Self::drive)
    /// has seen the job end. A handle that is dropped without being driven keeps
    /// its reservation for the rest of the session.
    ///
    /// # Errors
    ///
    /// - [`MediacryptError::UnsupportedContent`] for files that are neither
    ///   containers nor supported media
    /// - [`MediacryptError::Io`] if the session is shut down, another job is
    ///   still writing the same output path (`AlreadyExists`), or the worker
    ///   thread cannot be created
    ///
    /// Errors raised while decrypting arrive later as [`JobEvent::Failed`].
    pub fn open<P>(&mut self, path: &Path, prompt: &mut P) -> Result<OpenOutcome, MediacryptError>
    where
        P: PasswordPrompt + ?Sized,
    {
        if !is_container(path, &self.container_suffix) {
            if is_supported_media(path) {
                debug!(path = %path.display(), "plain media, no decryption");
                return Ok(OpenOutcome::Direct(path.to_path_buf()));
            }
            return Err(MediacryptError::UnsupportedContent(format!(
                "Unsupported file type: {}",
                path.display()
            )));
        }

        let output_dir = self
            .registry
            .dir()
            .ok_or_else(|| io::Error::other("session already shut down"))?
            .to_path_buf();

        let planned = self.planned_output(path, &output_dir);
        if let Some(output) = &planned {
            if self.in_flight.values().any(|busy| busy == output) {
                warn!(output = %output.display(), "output path already being written");
                return Err(io::Error::new(
                    io::ErrorKind::AlreadyExists,
                    format!("already decrypting into {}", output.display()),
                )
                .into());
            }
        }

        let password = match prompt.request_password(path) {
            Some(password) if !password.is_empty() => password,
            _ => {
                debug!(path = %path.display(), "password prompt cancelled");
                return Ok(OpenOutcome::PromptCancelled);
            }
        };

        let handle = DecryptJobBuilder::new(path, output_dir)
            .with_chunk_size(self.chunk_size)
            .with_container_suffix(self.container_suffix.clone())
            .build(password)
            .spawn()?;

        // Unreadable headers fail inside the job before any output is opened.
        if let Some(output) = planned {
            self.in_flight.insert(path.to_path_buf(), output);
        }
        Ok(OpenOutcome::Started(handle))
    }

    /// Output path the job for `input` will write, if its header is readable.
    fn planned_output(&self, input: &Path, output_dir: &Path) -> Option<PathBuf> {
        let header = File::open(input)
            .map_err(MediacryptError::from)
            .and_then(read_header)
            .ok()?;
        let name = output_file_name(input, &header.extension, &self.container_suffix).ok()?;
        Some(output_dir.join(name))
    }

    /// Consume a job's events until its terminal one, then join the worker.
    ///
    /// A completed output is registered and handed to `sink` only if it exists
    /// and is non-empty; otherwise the display gets a rejection and the
    /// returned state is [`JobState::Failed`]. The job's output path is
    /// released once the worker has been joined.
    pub fn drive<D, S>(&mut self, mut handle: JobHandle, display: &mut D, sink: &mut S) -> JobState
    where
        D: StatusDisplay + ?Sized,
        S: PlaybackSink + ?Sized,
    {
        let input = handle.input().to_path_buf();
        let mut rejected = false;
        while let Some(event) = handle.recv() {
            match event {
                JobEvent::Progress(percent) => display.progress(percent),
                JobEvent::Completed(path) => match validate_output(&path) {
                    Ok(()) => {
                        self.registry.register(&path);
                        display.completed(&path);
                        sink.play(&path);
                    }
                    Err(reason) => {
                        warn!(output = %path.display(), reason, "completed output rejected");
                        rejected = true;
                        display.rejected(reason);
                    }
                },
                JobEvent::Failed(e) => display.failed(&e.to_string()),
                JobEvent::Cancelled => display.cancelled(),
            }
        }

        let state = handle.join();
        self.in_flight.remove(&input);
        if rejected {
            JobState::Failed
        } else {
            state
        }
    }

    /// [`open`](Self::open) followed by playback or [`drive`](Self::drive).
    ///
    /// Returns `None` when no job was needed (plain media or cancelled prompt).
    /// A cancelled prompt is shown on `display` as a cancellation.
    pub fn play<P, D, S>(
        &mut self,
        path: &Path,
        prompt: &mut P,
        display: &mut D,
        sink: &mut S,
    ) -> Result<Option<JobState>, MediacryptError>
    where
        P: PasswordPrompt + ?Sized,
        D: StatusDisplay + ?Sized,
        S: PlaybackSink + ?Sized,
    {
        match self.open(path, prompt)? {
            OpenOutcome::Direct(media) => {
                sink.play(&media);
                Ok(None)
            }
            OpenOutcome::PromptCancelled => {
                display.cancelled();
                Ok(None)
            }
            OpenOutcome::Started(handle) => Ok(Some(self.drive(handle, display, sink))),
        }
    }

    /// Tear the registry down and end the session.
    pub fn shutdown(mut self) -> TeardownReport {
        let report = self.registry.teardown();
        info!(removed = report.removed, failures = report.failures.len(), "session ended");
        report
    }
}

fn validate_output(path: &Path) -> Result<(), &'static str> {
    match std::fs::metadata(path) {
        Err(_) => Err("No output file created"),
        Ok(meta) if meta.len() == 0 => Err("Empty file"),
        Ok(_) => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aliases::PasswordString;
    use crate::collab::LogStatus;
    use crate::error::ErrorKind;

    fn never_prompt(_: &Path) -> Option<PasswordString> {
        panic!("prompt must not be consulted");
    }

    #[test]
    fn plain_media_is_direct() {
        let mut session = Session::start().unwrap();
        let outcome = session
            .open(Path::new("/videos/a.mkv"), &mut never_prompt)
            .unwrap();
        assert!(matches!(outcome, OpenOutcome::Direct(p) if p == Path::new("/videos/a.mkv")));
    }

    #[test]
    fn unknown_file_type_is_rejected() {
        let mut session = Session::start().unwrap();
        let err = session
            .open(Path::new("notes.txt"), &mut never_prompt)
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnsupportedContent);
    }

    #[test]
    fn empty_or_missing_password_cancels_open() {
        let mut session = Session::start().unwrap();
        let mut empty = |_: &Path| Some(PasswordString::new(String::new()));
        let mut dismissed = |_: &Path| -> Option<PasswordString> { None };
        assert!(matches!(
            session.open(Path::new("a.mp4.enc"), &mut empty).unwrap(),
            OpenOutcome::PromptCancelled
        ));
        assert!(matches!(
            session.open(Path::new("a.mp4.enc"), &mut dismissed).unwrap(),
            OpenOutcome::PromptCancelled
        ));
    }

    #[test]
    fn missing_container_fails_through_display() {
        let mut session = Session::start().unwrap();
        let mut prompt = |_: &Path| Some(PasswordString::new("pw".into()));
        let mut status = LogStatus::new();
        let mut sink = |_: &Path| panic!("nothing to play");

        let state = session
            .play(Path::new("/definitely/missing.enc"), &mut prompt, &mut status, &mut sink)
            .unwrap();
        assert_eq!(state, Some(JobState::Failed));
        assert!(status
            .last_message()
            .unwrap()
            .starts_with("Decryption error: I/O error"));
        assert!(session.registry().entries().is_empty());
    }

    #[test]
    fn open_after_shutdown_is_refused() {
        let mut session = Session::start().unwrap();
        session.registry.teardown();
        let mut prompt = |_: &Path| Some(PasswordString::new("pw".into()));
        let err = session.open(Path::new("a.enc"), &mut prompt).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Io);
    }
}
