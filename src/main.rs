use analyzer::cli::{self, exit_code, feed_from};
use analyzer::Pipeline;
use std::io::{self, BufReader};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("analyzer=info")))
        .with_writer(io::stderr)
        .init();

    let cli = match cli::parse() {
        Ok(cli) => cli,
        Err(code) => return ExitCode::from(code as u8),
    };

    let pipeline = match Pipeline::build(cli.queue_size, &cli.stages) {
        Ok(pipeline) => pipeline,
        Err(e) => {
            eprintln!("error: {e}");
            let code = match e {
                analyzer::PipelineError::InvalidParameter { .. }
                | analyzer::PipelineError::UnknownStage { .. } => exit_code::ARGUMENT_ERROR,
                analyzer::PipelineError::StageInit { .. } => exit_code::STAGE_INIT_ERROR,
            };
            return ExitCode::from(code as u8);
        }
    };

    feed_from(&pipeline, BufReader::new(io::stdin()));
    pipeline.shutdown();
    println!("Pipeline shutdown complete");

    ExitCode::from(exit_code::OK as u8)
}
