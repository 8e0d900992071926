//! Contains primitive types and helpers common to the wasm module crates.
#![no_std]
#![forbid(unsafe_code)]
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![deny(trivial_numeric_casts, unused_import_braces, rust_2018_idioms)]

extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

pub mod prelude;

#[cfg(feature = "serde")]
pub mod serializers;

mod types;
pub use types::*;
