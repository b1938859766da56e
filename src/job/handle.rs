//! Caller-side view of a spawned job.

use std::path::{Path, PathBuf};
use std::thread::JoinHandle;
use std::time::Duration;

use crossbeam::channel::{Receiver, RecvTimeoutError, TryRecvError};
use tracing::warn;

use crate::cancel::CancelToken;
use crate::error::MediacryptError;
use crate::job::event::JobEvent;
use crate::job::state::JobState;

/// Owned by whoever spawned the job.
///
/// Reads the ordered notification channel and can request cancellation. The
/// worker owns every file handle; the handle never touches them.
#[derive(Debug)]
pub struct JobHandle {
    input: PathBuf,
    events: Receiver<JobEvent>,
    cancel: CancelToken,
    worker: Option<JoinHandle<JobState>>,
    state: JobState,
}

impl JobHandle {
    pub(crate) fn new(
        input: PathBuf,
        events: Receiver<JobEvent>,
        cancel: CancelToken,
        worker: JoinHandle<JobState>,
    ) -> Self {
        Self {
            input,
            events,
            cancel,
            worker: Some(worker),
            state: JobState::Running,
        }
    }

    /// Container this job decrypts.
    #[must_use]
    pub fn input(&self) -> &Path {
        &self.input
    }

    /// Ask the worker to stop at the next chunk boundary.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    #[must_use]
    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    /// State as observed through the events received so far.
    #[must_use]
    pub fn state(&self) -> JobState {
        self.state
    }

    /// Block for the next event. Returns `None` once the terminal event has been
    /// delivered.
    ///
    /// If the worker disappears without a terminal event (it panicked), a single
    /// synthetic [`JobEvent::Failed`] is returned instead.
    pub fn recv(&mut self) -> Option<JobEvent> {
        if self.state.is_terminal() {
            return None;
        }
        let event = self.events.recv().unwrap_or_else(|_| worker_lost());
        self.observe(&event);
        Some(event)
    }

    /// Like [`recv`](Self::recv) but gives up after `timeout`.
    pub fn recv_timeout(&mut self, timeout: Duration) -> Option<JobEvent> {
        if self.state.is_terminal() {
            return None;
        }
        let event = match self.events.recv_timeout(timeout) {
            Ok(event) => event,
            Err(RecvTimeoutError::Timeout) => return None,
            Err(RecvTimeoutError::Disconnected) => worker_lost(),
        };
        self.observe(&event);
        Some(event)
    }

    /// Non-blocking poll.
    pub fn try_recv(&mut self) -> Option<JobEvent> {
        if self.state.is_terminal() {
            return None;
        }
        let event = match self.events.try_recv() {
            Ok(event) => event,
            Err(TryRecvError::Empty) => return None,
            Err(TryRecvError::Disconnected) => worker_lost(),
        };
        self.observe(&event);
        Some(event)
    }

    /// Drain every remaining event, join the worker and return all events seen.
    pub fn wait(mut self) -> Vec<JobEvent> {
        let mut seen = Vec::new();
        while let Some(event) = self.recv() {
            seen.push(event);
        }
        self.join_worker();
        seen
    }

    /// Join the worker thread and return its terminal state.
    ///
    /// Events not yet received are discarded.
    pub fn join(mut self) -> JobState {
        self.join_worker()
    }

    fn join_worker(&mut self) -> JobState {
        match self.worker.take().map(JoinHandle::join) {
            Some(Ok(state)) => {
                self.state = state;
                state
            }
            Some(Err(_)) => {
                warn!("decryption worker panicked");
                self.state = JobState::Failed;
                JobState::Failed
            }
            None => self.state,
        }
    }

    fn observe(&mut self, event: &JobEvent) {
        self.state = match event {
            JobEvent::Progress(_) => return,
            JobEvent::Completed(_) => JobState::Completed,
            JobEvent::Failed(_) => JobState::Failed,
            JobEvent::Cancelled => JobState::Cancelled,
        };
    }
}

fn worker_lost() -> JobEvent {
    JobEvent::Failed(MediacryptError::Io(std::io::Error::other(
        "decryption worker exited without reporting a result",
    )))
}
