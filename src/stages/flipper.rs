//! `flipper`: reverses the string.

use crate::transform::{StageTransform, TransformOutput};

#[derive(Default)]
pub struct Flipper;

impl StageTransform for Flipper {
    fn name(&self) -> &'static str {
        "flipper"
    }

    fn apply(&mut self, input: String) -> TransformOutput {
        TransformOutput::Emit(input.chars().rev().collect())
    }
}
