//! Defines the bech32 encoded contract address and the codec that parses it.

use core::fmt;

use displaydoc::Display;
use subtle_encoding::bech32;

use crate::prelude::*;

/// Maximum byte length of an address accepted by the host chain.
pub const MAX_ADDRESS_LENGTH: usize = 255;

/// Maximum length of a bech32 human readable part.
const MAX_PREFIX_LENGTH: usize = 83;

/// Errors that arise when parsing or constructing contract addresses.
#[derive(Clone, Debug, Display, PartialEq, Eq)]
pub enum AddressError {
    /// empty address string is not allowed
    EmptyString,
    /// invalid bech32 prefix `{prefix}`
    InvalidPrefix { prefix: String },
    /// invalid bech32 encoding of `{address}`: `{description}`
    InvalidEncoding { address: String, description: String },
    /// mismatched prefix of `{address}`: expected `{expected}`, actual `{actual}`
    MismatchedPrefix {
        address: String,
        expected: String,
        actual: String,
    },
    /// address `{address}` is not in canonical lower-case form
    NonCanonical { address: String },
    /// address bytes cannot be empty
    EmptyBytes,
    /// address length `{length}` exceeds the maximum of `{max}` bytes
    InvalidLength { length: usize, max: usize },
}

#[cfg(feature = "std")]
impl std::error::Error for AddressError {}

/// Address of a contract instance, kept as raw bytes together with the
/// human readable part it is displayed with.
///
/// Instances are only handed out by an [`AddressCodec`], so the textual form
/// of every `ContractAddress` is the canonical lower-case bech32 string it was
/// parsed from.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ContractAddress {
    prefix: String,
    bytes: Vec<u8>,
}

impl ContractAddress {
    /// Returns the human readable part of the address.
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Returns the raw address bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }
}

impl fmt::Display for ContractAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", bech32::encode(&self.prefix, &self.bytes))
    }
}

impl AsRef<[u8]> for ContractAddress {
    fn as_ref(&self) -> &[u8] {
        &self.bytes
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for ContractAddress {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

/// Parses and formats contract addresses under one bech32 prefix.
///
/// The codec is built once from the chain configuration and passed by
/// reference to whatever needs to read addresses.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "String", into = "String"))]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "schema", schemars(transparent))]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AddressCodec {
    prefix: String,
}

impl TryFrom<String> for AddressCodec {
    type Error = AddressError;

    fn try_from(prefix: String) -> Result<Self, Self::Error> {
        Self::new(prefix)
    }
}

impl From<AddressCodec> for String {
    fn from(codec: AddressCodec) -> Self {
        codec.prefix
    }
}

impl AddressCodec {
    pub fn new(prefix: impl Into<String>) -> Result<Self, AddressError> {
        let prefix = prefix.into();

        let valid_chars = prefix
            .bytes()
            .all(|b| (33..=126).contains(&b) && !b.is_ascii_uppercase());

        if prefix.is_empty() || prefix.len() > MAX_PREFIX_LENGTH || !valid_chars {
            return Err(AddressError::InvalidPrefix { prefix });
        }

        Ok(Self { prefix })
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Parses a bech32 address under the codec's prefix.
    ///
    /// Only canonical (lower-case) encodings are accepted, which keeps
    /// `codec.parse(s)?.to_string() == s` for every accepted `s`.
    pub fn parse(&self, address: &str) -> Result<ContractAddress, AddressError> {
        if address.trim().is_empty() {
            return Err(AddressError::EmptyString);
        }

        let (prefix, bytes) =
            bech32::decode(address).map_err(|e| AddressError::InvalidEncoding {
                address: address.to_string(),
                description: format!("{e:?}"),
            })?;

        if prefix != self.prefix {
            return Err(AddressError::MismatchedPrefix {
                address: address.to_string(),
                expected: self.prefix.clone(),
                actual: prefix,
            });
        }

        let contract = self.from_bytes(bytes)?;

        if contract.to_string() != address {
            return Err(AddressError::NonCanonical {
                address: address.to_string(),
            });
        }

        Ok(contract)
    }

    /// Wraps raw address bytes read back from the store.
    pub fn from_bytes(&self, bytes: impl Into<Vec<u8>>) -> Result<ContractAddress, AddressError> {
        let bytes = bytes.into();

        if bytes.is_empty() {
            return Err(AddressError::EmptyBytes);
        }

        if bytes.len() > MAX_ADDRESS_LENGTH {
            return Err(AddressError::InvalidLength {
                length: bytes.len(),
                max: MAX_ADDRESS_LENGTH,
            });
        }

        Ok(ContractAddress {
            prefix: self.prefix.clone(),
            bytes,
        })
    }
}
