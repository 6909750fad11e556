//! Rust Driver
//!
//! Prints the build identifiers of the driver and whether the native parser
//! binary is installed.

use rust_driver::{BuildInfo, NATIVE_BIN};
use std::io::Write;
use std::path::Path;
use std::process::ExitCode;
use tracing::error;

fn main() -> ExitCode {
    let log_level = std::env::var("RUST_DRIVER_LOG").unwrap_or_else(|_| "warn".to_string());

    tracing_subscriber::fmt()
        .with_env_filter(log_level)
        .with_writer(std::io::stderr)
        .init();

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let result = rust_driver::report(&mut out, &BuildInfo::current(), Path::new(NATIVE_BIN))
        .and_then(|()| out.flush());

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Failed to write report: {}", e);
            ExitCode::FAILURE
        }
    }
}
