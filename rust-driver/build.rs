//! Build script for rust-driver.
//!
//! Captures the version and build identifiers handed over by the release
//! tooling so the binary can report them.

fn main() {
    for var in ["DRIVER_VERSION", "DRIVER_BUILD"] {
        let value = std::env::var(var).unwrap_or_default();
        println!("cargo::rustc-env={var}={value}");
        println!("cargo::rerun-if-env-changed={var}");
    }
}
