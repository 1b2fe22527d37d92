//! `logger`: writes `[logger] <line>` to an output sink and passes the line
//! through unchanged.
//!
//! The sink is injected rather than hard-coded to `stdout` so integration
//! tests can capture the exact bytes this stage writes.

use crate::transform::{StageTransform, TransformOutput};
use std::io::{self, Write};
use std::sync::{Arc, Mutex};

/// Writes `[logger] <line>\n` to the given sink, then passes the line
/// through unchanged.
pub struct Logger {
    sink: Arc<Mutex<dyn Write + Send>>,
}

impl Logger {
    /// Logs to real process stdout.
    pub fn to_stdout() -> Self {
        Self::new(Arc::new(Mutex::new(io::stdout())))
    }

    /// Logs to an arbitrary sink (tests pass a shared buffer here).
    pub fn new(sink: Arc<Mutex<dyn Write + Send>>) -> Self {
        Self { sink }
    }
}

impl StageTransform for Logger {
    fn name(&self) -> &'static str {
        "logger"
    }

    fn apply(&mut self, input: String) -> TransformOutput {
        let mut sink = self.sink.lock().unwrap_or_else(|e| e.into_inner());
        let _ = writeln!(sink, "[logger] {input}");
        let _ = sink.flush();
        drop(sink);
        TransformOutput::Emit(input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_prefixed_line_and_passes_through() {
        let buf = Arc::new(Mutex::new(Vec::<u8>::new()));
        let mut logger = Logger::new(buf.clone());
        match logger.apply("hi".to_string()) {
            TransformOutput::Emit(out) => assert_eq!(out, "hi"),
            TransformOutput::Drop => panic!("expected Emit"),
        }
        let written = buf.lock().unwrap();
        assert_eq!(std::str::from_utf8(&written).unwrap(), "[logger] hi\n");
    }
}
