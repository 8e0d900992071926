use derive_more::Display;

use crate::prelude::*;
use crate::ContractAddress;

/// Represents the address of the relayer or sender handing a message to a
/// contract.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Display)]
pub struct Signer(String);

impl Signer {
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    pub fn new_empty() -> Self {
        Self::new(String::new())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<String> for Signer {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&ContractAddress> for Signer {
    fn from(address: &ContractAddress) -> Self {
        Self(address.to_string())
    }
}

impl AsRef<str> for Signer {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}
