//! Test doubles and fixtures for exercising the wasm query gateway and the
//! packet bridge without a chain.
#![forbid(unsafe_code)]
#![deny(trivial_numeric_casts, unused_import_braces, rust_2018_idioms)]

pub mod context;
pub mod fixtures;
pub mod utils;
pub mod vm;
