//! An ordered, immutable-after-setup list of stages: wiring, external feed,
//! and orderly shutdown.
//!
//! Construction resolves each stage name, initializes its worker thread,
//! and wires each stage's output to the next stage's input in order. If
//! any stage fails to initialize, every stage initialized so far is
//! unwound (sentinel fed, worker joined) in reverse order before the error
//! is returned.

use crate::error::{PipelineError, StageError};
use crate::registry;
use crate::stage::{Stage, SENTINEL};
use std::sync::Arc;
use tracing::{error, info, warn};

/// A built, running chain of stages. The first stage is the external entry
/// point; stages are joined and torn down strictly in order 0..n on
/// [`Pipeline::shutdown`].
pub struct Pipeline {
    stages: Vec<Arc<Stage>>,
}

impl Pipeline {
    /// Resolves `stage_names` against the static registry, initializes each
    /// stage with the given `queue_capacity`, and wires each stage's
    /// output to the next stage's input (the last stage is terminal).
    ///
    /// On failure, already-initialized stages are unwound in reverse order
    /// (joined and dropped) before the error is returned, matching the
    /// original's clean-up-what-was-loaded-so-far behavior.
    pub fn build(queue_capacity: usize, stage_names: &[String]) -> Result<Self, PipelineError> {
        if queue_capacity == 0 {
            return Err(PipelineError::InvalidParameter {
                message: "queue_size must be a positive integer".to_string(),
            });
        }

        let mut stages: Vec<Arc<Stage>> = Vec::with_capacity(stage_names.len());
        for name in stage_names {
            let transform = registry::resolve(name).ok_or_else(|| PipelineError::UnknownStage {
                name: name.clone(),
            })?;
            match Stage::init(name.clone(), queue_capacity, transform) {
                Ok(stage) => stages.push(stage),
                Err(source) => {
                    Self::unwind(&stages);
                    return Err(PipelineError::StageInit {
                        stage_name: name.clone(),
                        source,
                    });
                }
            }
        }

        for i in 0..stages.len().saturating_sub(1) {
            let downstream = stages[i + 1].downstream_handle();
            if let Err(source) = stages[i].attach(Some(downstream)) {
                Self::unwind(&stages);
                return Err(PipelineError::StageInit {
                    stage_name: stages[i].name().to_string(),
                    source,
                });
            }
        }
        if let Some(last) = stages.last() {
            last.attach(None).ok();
        }

        info!(stages = stage_names.len(), "pipeline built");
        Ok(Self { stages })
    }

    fn unwind(stages: &[Arc<Stage>]) {
        for stage in stages.iter().rev() {
            stage.place_work(SENTINEL).ok();
            if let Err(e) = stage.fini() {
                warn!(stage = %stage.name(), error = %e, "error during construction unwind");
            }
        }
    }

    /// Feeds one line (or the sentinel `<END>`) to the first stage.
    pub fn feed(&self, line: &str) -> Result<(), StageError> {
        let Some(first) = self.stages.first() else {
            return Ok(());
        };
        first.place_work(line)
    }

    /// Waits for every stage to drain and join, in order 0..n, then returns.
    /// The i-th stage cannot finish before every upstream stage has
    /// propagated the sentinel to it, so joining in order never blocks
    /// forever as long as `<END>` was fed.
    pub fn shutdown(self) {
        for stage in &self.stages {
            if let Err(e) = stage.wait_finished() {
                error!(stage = %stage.name(), error = %e, "error waiting for stage to finish");
            }
        }
        for stage in &self.stages {
            if let Err(e) = stage.fini() {
                error!(stage = %stage.name(), error = %e, "error finalizing stage");
            }
        }
    }
}
