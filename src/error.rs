//! Error types for the pipeline system.

use thiserror::Error;

/// Errors produced by [`crate::queue::BoundedStringQueue`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QueueError {
    #[error("invalid parameter: {message}")]
    InvalidParameter { message: String },

    #[error("queue is closed")]
    Closed,

    #[error("end of stream")]
    EndOfStream,

    /// Allocation failure constructing the queue's buffer. Rust's global
    /// allocator aborts the process on allocation failure rather than
    /// returning an error, so this variant currently has no construction
    /// site in this crate; it exists for API completeness should a
    /// fallible-allocation path ever be added.
    #[error("resource exhausted: {message}")]
    ResourceExhausted { message: String },
}

/// Errors produced by [`crate::stage::Stage`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StageError {
    #[error("stage already initialized")]
    AlreadyInitialized,

    #[error("invalid parameter: {message}")]
    InvalidParameter { message: String },

    #[error("resource exhausted: {message}")]
    ResourceExhausted { message: String },

    #[error(transparent)]
    Queue(#[from] QueueError),
}

/// Result type for stage operations.
pub type StageResult<T> = Result<T, StageError>;

/// Errors produced while constructing or tearing down a [`crate::pipeline::Pipeline`].
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("invalid parameter: {message}")]
    InvalidParameter { message: String },

    #[error("unknown stage: {name}")]
    UnknownStage { name: String },

    #[error("failed to initialize stage '{stage_name}': {source}")]
    StageInit {
        stage_name: String,
        #[source]
        source: StageError,
    },
}

/// Result type for pipeline operations.
pub type PipelineResult<T> = Result<T, PipelineError>;
