//! Adapter serving wasm queries out of a CosmWasm [`Storage`](cosmwasm_std::Storage).
#![forbid(unsafe_code)]
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![deny(trivial_numeric_casts, unused_import_braces, rust_2018_idioms)]

pub mod context;
pub mod keys;
pub mod writer;

pub use context::*;
pub use writer::*;
