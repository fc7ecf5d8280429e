//! Job dispatch for loader tasks.
//!
//! A [`TaskScheduler`] either runs jobs inline on the calling thread (no workers) or hands them to
//! a dedicated rayon pool. Every job yields a single-slot [`TaskHandle`] the caller blocks on.

use std::any::Any;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::{Arc, mpsc};

use crate::foundation::error::{LoaderError, LoaderResult};

/// Scheduler configuration.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SchedulerOpts {
    /// Worker threads. `0` runs every job inline on the caller.
    pub threads: usize,
}

impl Default for SchedulerOpts {
    fn default() -> Self {
        Self { threads: 1 }
    }
}

/// Cheaply cloneable handle to an inline runner or a shared worker pool.
#[derive(Clone)]
pub struct TaskScheduler {
    pool: Option<Arc<rayon::ThreadPool>>,
}

impl std::fmt::Debug for TaskScheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TaskScheduler")
            .field("threads", &self.threads())
            .finish()
    }
}

impl Default for TaskScheduler {
    fn default() -> Self {
        Self::inline()
    }
}

impl TaskScheduler {
    /// Build a scheduler, spawning the worker pool when `opts.threads > 0`.
    pub fn new(opts: SchedulerOpts) -> LoaderResult<Self> {
        if opts.threads == 0 {
            return Ok(Self::inline());
        }
        let pool = build_thread_pool(opts.threads)?;
        tracing::debug!(threads = opts.threads, "task scheduler started");
        Ok(Self {
            pool: Some(Arc::new(pool)),
        })
    }

    /// Scheduler without workers.
    pub fn inline() -> Self {
        Self { pool: None }
    }

    /// Number of worker threads; `0` when jobs run inline.
    pub fn threads(&self) -> usize {
        self.pool
            .as_ref()
            .map_or(0, |p| p.current_num_threads())
    }

    /// Submit `job`. Inline schedulers run it before returning.
    pub fn spawn<T, F>(&self, job: F) -> TaskHandle<T>
    where
        F: FnOnce() -> T + Send + 'static,
        T: Send + 'static,
    {
        match &self.pool {
            None => match catch_unwind(AssertUnwindSafe(job)) {
                Ok(v) => TaskHandle::ready(v),
                Err(payload) => {
                    tracing::error!(panic = %panic_message(payload.as_ref()), "inline task panicked");
                    TaskHandle::lost()
                }
            },
            Some(pool) => {
                let (tx, rx) = mpsc::sync_channel(1);
                pool.spawn(move || {
                    // The receiver may already be gone when the loader was dropped mid-flight.
                    let _ = tx.send(job());
                });
                TaskHandle {
                    state: HandleState::Pending(rx),
                }
            }
        }
    }
}

fn build_thread_pool(threads: usize) -> LoaderResult<rayon::ThreadPool> {
    rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .thread_name(|i| format!("lottie-worker-{i}"))
        .panic_handler(|payload| {
            tracing::error!(panic = %panic_message(payload.as_ref()), "worker task panicked");
        })
        .build()
        .map_err(|e| LoaderError::Other(anyhow::anyhow!("failed to build rayon thread pool: {e}")))
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_owned()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "non-string panic payload".to_owned()
    }
}

/// Result slot of one submitted job.
pub struct TaskHandle<T> {
    state: HandleState<T>,
}

enum HandleState<T> {
    Ready(T),
    Pending(mpsc::Receiver<T>),
    Lost,
}

impl<T> TaskHandle<T> {
    fn ready(value: T) -> Self {
        Self {
            state: HandleState::Ready(value),
        }
    }

    fn lost() -> Self {
        Self {
            state: HandleState::Lost,
        }
    }

    /// Non-blocking check whether the job is known to have panicked.
    ///
    /// A finished result is kept in the handle for [`TaskHandle::wait`].
    pub fn is_lost(&mut self) -> bool {
        if let HandleState::Pending(rx) = &self.state {
            match rx.try_recv() {
                Ok(v) => self.state = HandleState::Ready(v),
                Err(mpsc::TryRecvError::Disconnected) => self.state = HandleState::Lost,
                Err(mpsc::TryRecvError::Empty) => {}
            }
        }
        matches!(self.state, HandleState::Lost)
    }

    /// Block until the job finished. `None` when it panicked.
    pub fn wait(self) -> Option<T> {
        match self.state {
            HandleState::Ready(v) => Some(v),
            HandleState::Pending(rx) => rx.recv().ok(),
            HandleState::Lost => None,
        }
    }
}

impl<T> std::fmt::Debug for TaskHandle<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = match self.state {
            HandleState::Ready(_) => "ready",
            HandleState::Pending(_) => "pending",
            HandleState::Lost => "lost",
        };
        f.debug_struct("TaskHandle").field("state", &state).finish()
    }
}

#[cfg(test)]
#[path = "../tests/unit/scheduler.rs"]
mod tests;
