//! Context traits and query handlers, one module per area of the store.

pub mod code;
pub mod context;
pub mod contract;
pub mod state;
