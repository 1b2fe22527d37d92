//! `typewriter`: writes `[typewriter] ` then each character with a delay
//! between them, then a newline, then passes the line through unchanged.

use crate::transform::{StageTransform, TransformOutput};
use std::io::{self, Write};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Per-character delay used outside tests, matching the original's
/// `usleep(100000)` (100ms).
pub const TYPEWRITER_DELAY: Duration = Duration::from_millis(100);

/// Writes `[typewriter] ` followed by each character of the line with a
/// delay between them, then a trailing newline, then passes the line
/// through unchanged.
pub struct Typewriter {
    sink: Arc<Mutex<dyn Write + Send>>,
    delay: Duration,
}

impl Typewriter {
    /// Types to real process stdout at the spec-mandated ~100ms/character.
    pub fn to_stdout() -> Self {
        Self::new(Arc::new(Mutex::new(io::stdout())), TYPEWRITER_DELAY)
    }

    /// Types to an arbitrary sink at a given per-character delay (tests use
    /// a delay of zero to keep runs fast while still exercising the same
    /// code path).
    pub fn new(sink: Arc<Mutex<dyn Write + Send>>, delay: Duration) -> Self {
        Self { sink, delay }
    }
}

impl StageTransform for Typewriter {
    fn name(&self) -> &'static str {
        "typewriter"
    }

    fn apply(&mut self, input: String) -> TransformOutput {
        {
            let mut sink = self.sink.lock().unwrap_or_else(|e| e.into_inner());
            let _ = write!(sink, "[typewriter] ");
            let _ = sink.flush();
        }
        for c in input.chars() {
            {
                let mut sink = self.sink.lock().unwrap_or_else(|e| e.into_inner());
                let _ = write!(sink, "{c}");
                let _ = sink.flush();
            }
            if !self.delay.is_zero() {
                std::thread::sleep(self.delay);
            }
        }
        {
            let mut sink = self.sink.lock().unwrap_or_else(|e| e.into_inner());
            let _ = writeln!(sink);
            let _ = sink.flush();
        }
        TransformOutput::Emit(input)
    }
}
