//! Crate level documentation.
#![allow(dead_code)]

fn helper() -> bool {
    true
}
