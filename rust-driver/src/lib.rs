//! Rust Driver
//!
//! Diagnostic entry point of the Rust language driver. It reports the
//! version and build identifiers the binary was built with and checks that
//! the native parser is installed where the driver expects it.

use anyhow::{Context, Result};
use std::io::{self, Write};
use std::path::Path;
use tracing::debug;

/// Location of the native parser binary inside the driver image.
pub const NATIVE_BIN: &str = "/opt/driver/bin/native";

/// Version and build identifiers injected at build time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildInfo {
    pub version: &'static str,
    pub build: &'static str,
}

impl BuildInfo {
    /// Identifiers this binary was built with. Empty when the build
    /// environment did not provide them.
    pub const fn current() -> Self {
        Self {
            version: env!("DRIVER_VERSION"),
            build: env!("DRIVER_BUILD"),
        }
    }
}

/// Checks that the native binary exists at `path`.
pub fn check_native(path: &Path) -> Result<()> {
    std::fs::metadata(path).with_context(|| format!("stat {}", path.display()))?;
    Ok(())
}

/// Writes the diagnostic report to `out`.
///
/// The stat error is part of the report, so the only errors returned here
/// come from writing to `out`.
pub fn report<W: Write>(out: &mut W, info: &BuildInfo, native: &Path) -> io::Result<()> {
    write!(out, "version: {}\nbuild: {}\n", info.version, info.build)?;

    match check_native(native) {
        Ok(()) => {
            debug!("Native binary found at {}", native.display());
            writeln!(out, "native: ok")
        }
        Err(e) => {
            debug!("Native binary check failed: {:#}", e);
            writeln!(out, "native: {:#}", e)
        }
    }
}
