use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::QueryError;

/// Result of a query handler: a value to serialize or an explicit
/// "nothing to report", which is answered with an empty body.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum QueryResponse<T> {
    Content(T),
    NoContent,
}

impl<T> QueryResponse<T> {
    pub fn is_no_content(&self) -> bool {
        matches!(self, Self::NoContent)
    }

    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> QueryResponse<U> {
        match self {
            Self::Content(value) => QueryResponse::Content(f(value)),
            Self::NoContent => QueryResponse::NoContent,
        }
    }
}

impl<I> QueryResponse<Vec<I>> {
    /// Wraps a collected list, answering `NoContent` when it is empty.
    pub fn from_list(items: Vec<I>) -> Self {
        if items.is_empty() {
            Self::NoContent
        } else {
            Self::Content(items)
        }
    }
}

impl<T> From<Option<T>> for QueryResponse<T> {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::NoContent, Self::Content)
    }
}

impl<T: Serialize> QueryResponse<T> {
    /// Serializes the content as JSON indented with two spaces.
    pub fn into_json(self) -> Result<Vec<u8>, QueryError> {
        match self {
            Self::Content(value) => Ok(serde_json::to_vec_pretty(&value)?),
            Self::NoContent => Ok(Vec::new()),
        }
    }
}

/// Kinds of queries served by the router.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum QueryKind {
    ContractInfo,
    ListContractsByCode,
    ContractState,
    Code,
    ListCode,
    ContractHistory,
    InactiveContracts,
    InactiveContract,
}

impl QueryKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ContractInfo => "contract-info",
            Self::ListContractsByCode => "list-contracts-by-code",
            Self::ContractState => "contract-state",
            Self::Code => "code",
            Self::ListCode => "list-code",
            Self::ContractHistory => "contract-history",
            Self::InactiveContracts => "inactive-contracts",
            Self::InactiveContract => "inactive-contract",
        }
    }
}

impl fmt::Display for QueryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for QueryKind {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "contract-info" => Ok(Self::ContractInfo),
            "list-contracts-by-code" => Ok(Self::ListContractsByCode),
            "contract-state" => Ok(Self::ContractState),
            "code" => Ok(Self::Code),
            "list-code" => Ok(Self::ListCode),
            "contract-history" => Ok(Self::ContractHistory),
            "inactive-contracts" => Ok(Self::InactiveContracts),
            "inactive-contract" => Ok(Self::InactiveContract),
            _ => Err(QueryError::unknown_request("unknown data query endpoint")),
        }
    }
}

/// Ways of reading a contract's state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StateMethod {
    /// Run the contract's query entry point.
    Smart,
    /// Look up a single raw key.
    Raw,
    /// Dump every key/value entry.
    All,
}

impl StateMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Smart => "smart",
            Self::Raw => "raw",
            Self::All => "all",
        }
    }
}

impl fmt::Display for StateMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StateMethod {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "smart" => Ok(Self::Smart),
            "raw" => Ok(Self::Raw),
            "all" => Ok(Self::All),
            _ => Err(QueryError::unknown_request(s)),
        }
    }
}
