//! A pipeline stage: a transform, its input queue, its worker thread, and a
//! forwarding hook to the downstream stage.
//!
//! Each stage owns a single worker thread that drains its queue to
//! end-of-stream, applies the transform to every item, forwards emitted
//! output downstream, and finally propagates the sentinel downstream
//! (if a downstream exists) before exiting.

use crate::error::StageError;
use crate::queue::BoundedStringQueue;
use crate::transform::{StageTransform, TransformOutput};
use std::sync::{Arc, Mutex, OnceLock};
use std::thread::{self, JoinHandle};
use tracing::{debug, error, info, warn};

/// The literal token that signals end-of-input. Consumed by
/// [`Stage::place_work`], never enqueued as data.
pub const SENTINEL: &str = "<END>";

/// A downstream hook: typically another stage's [`Stage::place_work`].
pub type Downstream = Box<dyn Fn(&str) -> Result<(), StageError> + Send + Sync>;

/// A transform, its bounded input queue, and the worker thread that drains
/// it.
///
/// `Stage` is built to be shared via `Arc` so that one stage's `downstream`
/// hook can close over the next stage without either owning the other.
pub struct Stage {
    name: String,
    queue: Arc<BoundedStringQueue>,
    downstream: OnceLock<Downstream>,
    worker: Mutex<Option<JoinHandle<()>>>,
}

impl Stage {
    /// Creates the stage's input queue and starts its single worker thread.
    ///
    /// Fails with [`StageError::InvalidParameter`] if `queue_capacity == 0`,
    /// or [`StageError::ResourceExhausted`] if the OS refuses to spawn the
    /// worker thread.
    pub fn init(
        name: impl Into<String>,
        queue_capacity: usize,
        mut transform: Box<dyn StageTransform>,
    ) -> Result<Arc<Self>, StageError> {
        let name = name.into();
        let queue = Arc::new(BoundedStringQueue::new(queue_capacity)?);
        let downstream: OnceLock<Downstream> = OnceLock::new();

        let stage = Arc::new(Self {
            name,
            queue,
            downstream,
            worker: Mutex::new(None),
        });

        let worker_stage = Arc::clone(&stage);
        let thread_name = worker_stage.name.clone();
        let handle = thread::Builder::new()
            .name(thread_name.clone())
            .spawn(move || worker_stage.run(transform.as_mut()))
            .map_err(|e| StageError::ResourceExhausted {
                message: format!("failed to spawn worker thread '{thread_name}': {e}"),
            })?;

        *stage.worker.lock().unwrap_or_else(|e| e.into_inner()) = Some(handle);
        Ok(stage)
    }

    /// Worker algorithm: drain the queue to end-of-stream, applying the
    /// transform and forwarding to `downstream`, then propagate the
    /// sentinel downstream (if any downstream exists) and exit.
    fn run(&self, transform: &mut dyn StageTransform) {
        info!(stage = %self.name, "worker started");
        loop {
            let item = match self.queue.get() {
                Ok(item) => item,
                Err(_end_of_stream) => break,
            };
            match transform.apply(item) {
                TransformOutput::Emit(out) => {
                    if let Some(downstream) = self.downstream.get() {
                        if let Err(e) = downstream(&out) {
                            error!(stage = %self.name, error = %e, "downstream place_work failed");
                        }
                    }
                }
                TransformOutput::Drop => {
                    debug!(stage = %self.name, "transform dropped an item");
                }
            }
        }
        if let Some(downstream) = self.downstream.get() {
            if let Err(e) = downstream(SENTINEL) {
                error!(stage = %self.name, error = %e, "failed to propagate sentinel downstream");
            }
        }
        info!(stage = %self.name, "worker drained and exited");
    }

    /// Records the downstream hook, or marks this stage terminal when
    /// `next` is `None`. May be called once; must be called before the
    /// first `place_work` completes.
    pub fn attach(&self, next: Option<Downstream>) -> Result<(), StageError> {
        match next {
            None => Ok(()),
            Some(f) => self
                .downstream
                .set(f)
                .map_err(|_| StageError::AlreadyInitialized),
        }
    }

    /// External entry point. The sentinel closes the queue without being
    /// enqueued; anything else is forwarded to the queue.
    pub fn place_work(&self, s: &str) -> Result<(), StageError> {
        if s == SENTINEL {
            self.queue.signal_finished();
            return Ok(());
        }
        self.queue.put(s).map_err(StageError::from)
    }

    /// A downstream hook pointing at this stage's `place_work`, suitable for
    /// attaching to an upstream stage.
    pub fn downstream_handle(self: &Arc<Self>) -> Downstream {
        let this = Arc::clone(self);
        Box::new(move |s: &str| this.place_work(s))
    }

    /// Blocks until this stage's worker has finished processing and
    /// exited. Idempotent: only the first caller (across `wait_finished`
    /// and `fini`) actually joins.
    pub fn wait_finished(&self) -> Result<(), StageError> {
        self.join_worker()
    }

    /// Joins the worker if not already joined. Idempotent after the first
    /// successful call. The queue and name are reclaimed by ordinary Rust
    /// ownership once this `Stage` is dropped; no separate destroy step is
    /// required.
    pub fn fini(&self) -> Result<(), StageError> {
        self.join_worker()
    }

    fn join_worker(&self) -> Result<(), StageError> {
        let handle = self
            .worker
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .take();
        if let Some(handle) = handle {
            if handle.join().is_err() {
                warn!(stage = %self.name, "worker thread panicked");
            }
        }
        Ok(())
    }

    /// The stage's human-readable name.
    pub fn name(&self) -> &str {
        &self.name
    }
}
