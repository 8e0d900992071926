mod address;
mod signer;

pub use address::*;
pub use signer::*;
