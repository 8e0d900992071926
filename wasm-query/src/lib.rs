//! Read-only query gateway of the wasm module.
//!
//! A host exposes its store through [`QueryContext`](crate::core::context::QueryContext)
//! and hands incoming query paths to a [`QueryRouter`](crate::router::QueryRouter):
//!
//! ```rust,ignore
//! use wasm_primitives::AddressCodec;
//! use wasm_query::config::WasmConfig;
//! use wasm_query::router::QueryRouter;
//!
//! let codec = AddressCodec::new("wasm")?;
//! let config = WasmConfig::default();
//! let router = QueryRouter::new(&codec, &config);
//!
//! let bytes = router.route(&ctx, &["contract-state", address, "smart"], br#"{"get_count":{}}"#)?;
//! ```
//!
//! Smart queries run under a fresh gas meter bounded by
//! [`WasmConfig::smart_query_gas_limit`](crate::config::WasmConfig), never
//! the meter of the surrounding block.
#![forbid(unsafe_code)]
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![deny(trivial_numeric_casts, unused_import_braces, rust_2018_idioms)]

pub mod config;
pub mod core;
pub mod error;
pub mod gas;
pub mod router;
pub mod types;
