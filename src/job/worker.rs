//! The decryption job: one container, one output file, one worker.

use std::fmt;
use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};
use std::thread;

use crossbeam::channel::{unbounded, Sender};
use tracing::{debug, info, trace, warn};

use crate::aliases::PasswordString;
use crate::cancel::CancelToken;
use crate::consts::WORKER_THREAD_NAME;
use crate::crypto::kdf::derive_key;
use crate::decryptor::{decrypt_ciphertext_stream, StreamDecryptor, StreamOutcome};
use crate::error::MediacryptError;
use crate::header::{body_len, read_header};
use crate::job::event::JobEvent;
use crate::job::handle::JobHandle;
use crate::job::progress::ProgressTracker;
use crate::job::state::JobState;
use crate::naming::prepare_output_path;

/// A single cancellable, progress-reporting decryption.
///
/// Built with [`DecryptJobBuilder`](crate::DecryptJobBuilder) or [`DecryptionJob::new`],
/// then either [`run`](Self::run) on the current thread or [`spawn`](Self::spawn)ed
/// onto a dedicated worker. A job is single-use.
///
/// The password is held only until the key has been derived and is zeroized
/// when dropped.
pub struct DecryptionJob {
    input: PathBuf,
    output_dir: PathBuf,
    password: Option<PasswordString>,
    chunk_size: usize,
    container_suffix: String,
    cancel: CancelToken,
    state: JobState,
}

impl fmt::Debug for DecryptionJob {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DecryptionJob")
            .field("input", &self.input)
            .field("output_dir", &self.output_dir)
            .field("password", &"<redacted>")
            .field("chunk_size", &self.chunk_size)
            .field("container_suffix", &self.container_suffix)
            .field("state", &self.state)
            .finish()
    }
}

impl DecryptionJob {
    /// Job with default chunk size and container suffix.
    pub fn new(
        input: impl Into<PathBuf>,
        password: PasswordString,
        output_dir: impl Into<PathBuf>,
    ) -> Self {
        crate::builders::DecryptJobBuilder::new(input, output_dir).build(password)
    }

    pub(crate) fn from_parts(
        input: PathBuf,
        output_dir: PathBuf,
        password: PasswordString,
        chunk_size: usize,
        container_suffix: String,
    ) -> Self {
        Self {
            input,
            output_dir,
            password: Some(password),
            chunk_size,
            container_suffix,
            cancel: CancelToken::new(),
            state: JobState::Pending,
        }
    }

    /// Token that cancels this job at the next chunk boundary.
    #[must_use]
    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    #[must_use]
    pub fn state(&self) -> JobState {
        self.state
    }

    #[must_use]
    pub fn input(&self) -> &Path {
        &self.input
    }

    #[must_use]
    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    /// Run the job to completion on the calling thread.
    ///
    /// Sends progress and exactly one terminal event on `events` and returns the
    /// terminal state. Never panics on I/O or crypto errors; those become a
    /// single [`JobEvent::Failed`]. A dropped receiver does not stop the job.
    pub fn run(mut self, events: &Sender<JobEvent>) -> JobState {
        self.transition(JobState::Running);
        info!(input = %self.input.display(), chunk_size = self.chunk_size, "decryption started");

        let terminal = match self.execute(events) {
            Ok(Finished::Completed(path)) => {
                info!(output = %path.display(), "decryption completed");
                notify(events, JobEvent::Completed(path));
                JobState::Completed
            }
            Ok(Finished::Cancelled { processed }) => {
                info!(processed, "decryption cancelled");
                notify(events, JobEvent::Cancelled);
                JobState::Cancelled
            }
            Err(e) => {
                warn!(input = %self.input.display(), error = %e, "decryption failed");
                notify(events, JobEvent::Failed(e));
                JobState::Failed
            }
        };

        self.transition(terminal);
        terminal
    }

    /// Move the job onto a dedicated worker thread.
    ///
    /// # Errors
    ///
    /// [`MediacryptError::Io`] if the OS refuses to create the thread.
    pub fn spawn(self) -> Result<JobHandle, MediacryptError> {
        let (tx, rx) = unbounded();
        let cancel = self.cancel.clone();
        let input = self.input.clone();
        let worker = thread::Builder::new()
            .name(WORKER_THREAD_NAME.into())
            .spawn(move || self.run(&tx))?;
        Ok(JobHandle::new(input, rx, cancel, worker))
    }

    fn transition(&mut self, next: JobState) {
        debug_assert!(
            self.state.can_transition_to(next),
            "illegal job transition {} -> {}",
            self.state,
            next
        );
        trace!(from = %self.state, to = %next, "job state");
        self.state = next;
    }

    fn execute(&mut self, events: &Sender<JobEvent>) -> Result<Finished, MediacryptError> {
        let mut input = File::open(&self.input)?;
        let header = read_header(&mut input)?;
        header.ensure_file()?;
        let total = body_len(input.metadata()?.len())?;

        let output_path = prepare_output_path(
            &self.output_dir,
            &self.input,
            &header.extension,
            &self.container_suffix,
        )?;

        let decryptor = {
            let password = self.password.take().ok_or_else(|| {
                MediacryptError::Crypto("password already consumed by an earlier run".into())
            })?;
            let key = derive_key(&password, &header.salt)?;
            StreamDecryptor::new(&key, &header.nonce)
        };

        let output = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&output_path)?;
        debug!(output = %output_path.display(), total, extension = %header.extension, "output opened");

        let mut progress = ProgressTracker::new(total);
        let outcome = decrypt_ciphertext_stream(
            input,
            output,
            decryptor,
            self.chunk_size,
            &self.cancel,
            |processed| {
                if let Some(percent) = progress.advance(processed) {
                    notify(events, JobEvent::Progress(percent));
                }
            },
        )?;

        Ok(match outcome {
            StreamOutcome::Completed { .. } => Finished::Completed(output_path),
            StreamOutcome::Cancelled { processed } => Finished::Cancelled { processed },
        })
    }
}

enum Finished {
    Completed(PathBuf),
    Cancelled { processed: u64 },
}

fn notify(events: &Sender<JobEvent>, event: JobEvent) {
    if events.send(event).is_err() {
        debug!("job event receiver dropped");
    }
}
