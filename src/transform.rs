//! The `StageTransform` contract: a pure, total function from an owned
//! input string to an owned output string, or a deliberate "drop".

/// Result of applying a [`StageTransform`] to one input line.
pub enum TransformOutput {
    /// Produce this string downstream.
    Emit(String),
    /// Produce nothing for this input; it is silently discarded.
    Drop,
}

/// A stage's pure processing step.
///
/// Implementations must not retain the input past the call and must not
/// reach into stage-internal state beyond `&mut self` on the transform
/// itself (no access to the owning [`crate::stage::Stage`]'s queue or
/// worker).
pub trait StageTransform: Send {
    /// Human-readable name, used in log lines and error messages.
    fn name(&self) -> &'static str;

    /// Applies the transform to one input line.
    fn apply(&mut self, input: String) -> TransformOutput;
}
