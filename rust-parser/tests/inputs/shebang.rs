#!/usr/bin/env rust-script
fn main() {}
