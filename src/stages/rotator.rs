//! `rotator`: right-rotates the string by one character — the last
//! character becomes the first, everything else shifts right by one
//! (`abc` -> `cab`).

use crate::transform::{StageTransform, TransformOutput};

#[derive(Default)]
pub struct Rotator;

impl StageTransform for Rotator {
    fn name(&self) -> &'static str {
        "rotator"
    }

    fn apply(&mut self, input: String) -> TransformOutput {
        let chars: Vec<char> = input.chars().collect();
        if chars.is_empty() {
            return TransformOutput::Emit(String::new());
        }
        let mut out = String::with_capacity(input.len());
        out.push(chars[chars.len() - 1]);
        out.extend(&chars[..chars.len() - 1]);
        TransformOutput::Emit(out)
    }
}
