//! Data model of the wasm module: code and contract metadata, contract code
//! history, raw contract state and contract messages.
#![no_std]
#![forbid(unsafe_code)]
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![deny(trivial_numeric_casts, unused_import_braces, rust_2018_idioms)]

#[cfg(feature = "std")]
extern crate std;

pub mod code;
pub mod contract;
pub mod error;
pub mod model;
pub mod msg;
pub mod proto;

pub use code::*;
pub use contract::*;
pub use model::*;
pub use msg::*;
