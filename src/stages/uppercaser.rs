//! `uppercaser`: maps lowercase letters to uppercase, leaving everything
//! else unchanged.

use crate::transform::{StageTransform, TransformOutput};

#[derive(Default)]
pub struct Uppercaser;

impl StageTransform for Uppercaser {
    fn name(&self) -> &'static str {
        "uppercaser"
    }

    fn apply(&mut self, input: String) -> TransformOutput {
        // ASCII-only, matching the original's char-by-char `toupper`: other
        // characters (including non-ASCII letters) pass through unchanged.
        let out: String = input.chars().map(|c| c.to_ascii_uppercase()).collect();
        TransformOutput::Emit(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uppercases_ascii_letters_only() {
        let mut s = Uppercaser;
        match s.apply("Hello, World! 123".to_string()) {
            TransformOutput::Emit(out) => assert_eq!(out, "HELLO, WORLD! 123"),
            TransformOutput::Drop => panic!("expected Emit"),
        }
    }

    #[test]
    fn empty_string_maps_to_empty() {
        let mut s = Uppercaser;
        match s.apply(String::new()) {
            TransformOutput::Emit(out) => assert_eq!(out, ""),
            TransformOutput::Drop => panic!("expected Emit"),
        }
    }
}
