//! Caller-side polling worker for remote tasks.
//!
//! The core stays synchronous; this module supplies the thread-per-watch
//! runner that repeatedly re-reflects a task until it reaches a terminal
//! status. Cooperative cancellation via an `Arc<AtomicBool>`; each
//! snapshot streams back over a channel.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, mpsc};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use tracing::debug;

use crate::error::{Result, ToxigraphError};
use crate::graph::Iri;
use crate::ontology::ClassKeeper;
use crate::resource::Task;
use crate::spider::retrieve_task;
use crate::transport::{Credential, Fetch};

/// Cancellation token shared with the worker thread.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

pub struct WatchOptions {
    pub interval: Duration,
    /// Stop after this many polls even without a terminal status.
    pub max_polls: Option<usize>,
}

impl Default for WatchOptions {
    fn default() -> Self {
        Self {
            interval: Duration::from_millis(500),
            max_polls: None,
        }
    }
}

/// Handle to a running or completed watch.
pub struct WatchHandle {
    cancel: CancelToken,
    started: Instant,
    join: Option<JoinHandle<Result<Task>>>,
    /// One task snapshot per successful poll.
    pub snapshots: mpsc::Receiver<Task>,
}

impl WatchHandle {
    /// Request cancellation (cooperative). The worker may take up to one
    /// interval to observe it.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    /// Blocks until the worker finishes and yields its last task.
    pub fn wait(mut self) -> Result<Task> {
        match self.join.take() {
            Some(join) => join
                .join()
                .map_err(|_| ToxigraphError::Interrupted("watch worker lost".into()))?,
            None => Err(ToxigraphError::Interrupted("already waited".into())),
        }
    }
}

pub struct TaskWatcher<F: Fetch + Send + Sync + 'static> {
    service: Arc<F>,
    classes: Arc<ClassKeeper>,
}

impl<F: Fetch + Send + Sync + 'static> TaskWatcher<F> {
    pub fn new(service: Arc<F>, classes: Arc<ClassKeeper>) -> Self {
        Self { service, classes }
    }

    /// Polls the locator on a background thread until the task turns
    /// terminal, the poll budget runs out, or the watch is cancelled.
    /// A failing fetch or reflection ends the watch with that error —
    /// retrying is the caller's decision, not this worker's.
    pub fn watch(
        &self,
        locator: Iri,
        credential: Option<Credential>,
        options: WatchOptions,
    ) -> WatchHandle {
        let (tx, rx) = mpsc::channel();
        let cancel = CancelToken::new();
        let cancel_for_thread = cancel.clone();
        let service = Arc::clone(&self.service);
        let classes = Arc::clone(&self.classes);
        let join = thread::spawn(move || {
            let mut polls = 0usize;
            loop {
                if cancel_for_thread.is_cancelled() {
                    return Err(ToxigraphError::Interrupted("cancelled".into()));
                }
                let task =
                    retrieve_task(service.as_ref(), &locator, credential.as_ref(), &classes)?;
                polls += 1;
                debug!(%locator, polls, status = ?task.status(), "task polled");
                let _ = tx.send(task.clone());
                if task.status().map(|s| s.is_terminal()).unwrap_or(false) {
                    return Ok(task);
                }
                if let Some(max) = options.max_polls {
                    if polls >= max {
                        return Ok(task);
                    }
                }
                thread::sleep(options.interval);
            }
        });
        WatchHandle {
            cancel,
            started: Instant::now(),
            join: Some(join),
            snapshots: rx,
        }
    }
}
