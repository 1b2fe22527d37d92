//! Argument parsing and the stdin feed loop.

use crate::pipeline::Pipeline;
use crate::stage::SENTINEL;
use crate::MAX_LINE_LEN;
use clap::error::ErrorKind;
use clap::Parser;
use std::io::BufRead;
use tracing::error;

/// `analyzer <queue_size> <stage1> <stage2> ... <stageN>`
#[derive(Parser, Debug)]
#[command(
    name = "analyzer",
    about = "Runs a line through a chain of named text-transform stages",
    after_help = "Available stages:\n  logger        - Logs all strings that pass through\n  typewriter    - Simulates typewriter effect with delays\n  uppercaser    - Converts strings to uppercase\n  rotator       - Moves every character to the right; the last character moves to the beginning\n  flipper       - Reverses the order of characters\n  expander      - Expands each character with spaces\n\nExample:\n  analyzer 20 uppercaser rotator logger\n  echo 'hello' | analyzer 20 uppercaser rotator logger"
)]
pub struct Cli {
    /// Maximum number of in-flight items per stage's queue
    pub queue_size: usize,

    /// Names of stages to chain, in order
    #[arg(required = true, num_args = 1..)]
    pub stages: Vec<String>,
}

/// Process exit codes.
pub mod exit_code {
    pub const OK: i32 = 0;
    pub const ARGUMENT_ERROR: i32 = 1;
    pub const STAGE_INIT_ERROR: i32 = 2;
}

/// Parses `std::env::args()`, printing clap's own usage/help output and
/// returning the process exit code to use on any parse failure instead of
/// letting clap call `std::process::exit` itself. A malformed invocation
/// (missing stages, non-numeric `queue_size`) is an argument error (exit
/// code 1); `--help`/`--version` exit cleanly (code 0).
pub fn parse() -> Result<Cli, i32> {
    match Cli::try_parse() {
        Ok(cli) => Ok(cli),
        Err(e) => {
            let code = match e.kind() {
                ErrorKind::DisplayHelp
                | ErrorKind::DisplayVersion
                | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand => exit_code::OK,
                _ => exit_code::ARGUMENT_ERROR,
            };
            e.print().ok();
            Err(code)
        }
    }
}

/// Truncates `line` to at most `max_len` bytes, backing off to the nearest
/// preceding UTF-8 character boundary so a multi-byte character straddling
/// the cutoff is dropped whole rather than splitting it.
fn truncate_at_char_boundary(line: &mut String, max_len: usize) {
    if line.len() <= max_len {
        return;
    }
    let mut boundary = max_len;
    while boundary > 0 && !line.is_char_boundary(boundary) {
        boundary -= 1;
    }
    line.truncate(boundary);
}

/// Reads lines from `input`, truncating anything over [`MAX_LINE_LEN`]
/// bytes, feeding each to `pipeline` until the literal line `<END>` is
/// fed (inclusive) or the input is exhausted (in which case the sentinel
/// is fed on the reader's behalf, so the pipeline always drains cleanly).
pub fn feed_from<R: BufRead>(pipeline: &Pipeline, input: R) {
    for line in input.lines() {
        let Ok(mut line) = line else { break };
        truncate_at_char_boundary(&mut line, MAX_LINE_LEN);
        if let Err(e) = pipeline.feed(&line) {
            error!(error = %e, "error placing work");
            break;
        }
        if line == SENTINEL {
            return;
        }
    }
    // Input exhausted without an explicit <END>: still close the pipeline.
    let _ = pipeline.feed(SENTINEL);
}
