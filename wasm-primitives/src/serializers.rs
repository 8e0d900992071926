//! Serde helpers for fields whose JSON form differs from their Rust type.

use core::fmt::Display;
use core::str::FromStr;

use serde::{de, Deserialize, Deserializer, Serializer};

use crate::prelude::*;

pub fn serialize<T, S>(value: &T, serializer: S) -> Result<S::Ok, S::Error>
where
    T: Display,
    S: Serializer,
{
    serializer.serialize_str(value.to_string().as_ref())
}

pub fn deserialize<'de, T, D>(deserializer: D) -> Result<T, D::Error>
where
    T: FromStr,
    T::Err: Display,
    D: Deserializer<'de>,
{
    T::from_str(<String>::deserialize(deserializer)?.as_str()).map_err(de::Error::custom)
}

/// Byte fields encoded as standard padded base64.
pub mod base64 {
    use ::base64::prelude::{Engine, BASE64_STANDARD};
    use serde::{de, Deserialize, Deserializer, Serializer};

    use crate::prelude::*;

    pub fn serialize<T, S>(value: T, serializer: S) -> Result<S::Ok, S::Error>
    where
        T: AsRef<[u8]>,
        S: Serializer,
    {
        serializer.serialize_str(&BASE64_STANDARD.encode(value))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Vec<u8>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let encoded = <String>::deserialize(deserializer)?;
        BASE64_STANDARD.decode(encoded).map_err(de::Error::custom)
    }
}

/// Byte fields encoded as upper-case hex.
pub mod hex_upper {
    use serde::{de, Deserialize, Deserializer, Serializer};
    use subtle_encoding::{Encoding, Hex};

    use crate::prelude::*;

    pub fn serialize<T, S>(value: T, serializer: S) -> Result<S::Ok, S::Error>
    where
        T: AsRef<[u8]>,
        S: Serializer,
    {
        let encoded = Hex::upper_case()
            .encode_to_string(value)
            .map_err(|e| serde::ser::Error::custom(format!("invalid hex: {e:?}")))?;
        serializer.serialize_str(&encoded)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Vec<u8>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let encoded = <String>::deserialize(deserializer)?;
        Hex::upper_case()
            .decode(encoded)
            .map_err(|e| de::Error::custom(format!("invalid hex: {e:?}")))
    }
}

/// Optional integers written as decimal strings, `null` when absent.
pub mod option_u64_string {
    use serde::{de, Deserialize, Deserializer, Serializer};

    use crate::prelude::*;

    pub fn serialize<S>(value: &Option<u64>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(v) => serializer.serialize_str(&v.to_string()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Option::<String>::deserialize(deserializer)?
            .map(|s| s.parse::<u64>().map_err(de::Error::custom))
            .transpose()
    }
}
