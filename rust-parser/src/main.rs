//! Native Rust Parser
//!
//! Reads parse requests from stdin, one JSON object per line, and writes one
//! JSON response per request to stdout. Logs go to stderr.

use clap::Parser;
use rust_parser::server::{OnEof, serve};
use std::process::ExitCode;
use tracing::{error, info};

#[derive(Debug, Parser)]
#[command(name = "native", version, about = "Native Rust parser for the language driver")]
struct Args {
    /// Keep polling stdin after end of input instead of exiting.
    #[arg(long)]
    keep_alive: bool,
}

impl Args {
    fn on_eof(&self) -> OnEof {
        if self.keep_alive {
            OnEof::Wait
        } else {
            OnEof::Exit
        }
    }
}

fn main() -> ExitCode {
    let args = Args::parse();
    let log_level = std::env::var("RUST_PARSER_LOG").unwrap_or_else(|_| "info".to_string());

    tracing_subscriber::fmt()
        .with_env_filter(log_level)
        .with_writer(std::io::stderr)
        .init();

    info!("Rust native parser v{}", env!("CARGO_PKG_VERSION"));

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    match serve(stdin.lock(), stdout.lock(), args.on_eof()) {
        Ok(served) => {
            info!("Served {} request(s)", served);
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("Parser stopped: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
