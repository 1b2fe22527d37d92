//! `expander`: inserts a single space after each character.

use crate::transform::{StageTransform, TransformOutput};

#[derive(Default)]
pub struct Expander;

impl StageTransform for Expander {
    fn name(&self) -> &'static str {
        "expander"
    }

    fn apply(&mut self, input: String) -> TransformOutput {
        let mut out = String::with_capacity(input.len() * 2);
        for c in input.chars() {
            out.push(c);
            out.push(' ');
        }
        TransformOutput::Emit(out)
    }
}
