//! Node level configuration of the query gateway.

use serde::{Deserialize, Serialize};

use crate::gas::{Gas, GasRegister, DEFAULT_GAS_MULTIPLIER, DEFAULT_INSTANCE_COST};

/// Default gas limit of a single smart query.
pub const DEFAULT_SMART_QUERY_GAS_LIMIT: Gas = 3_000_000;

/// Runtime configuration read from the node's configuration file.
///
/// Missing fields fall back to their defaults.
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WasmConfig {
    /// Max gas a smart query may consume before it is aborted.
    pub smart_query_gas_limit: Gas,
    /// VM gas units per unit of chain gas.
    pub gas_multiplier: u64,
    /// Chain gas charged for loading a contract instance.
    pub instance_cost: Gas,
}

impl Default for WasmConfig {
    fn default() -> Self {
        Self {
            smart_query_gas_limit: DEFAULT_SMART_QUERY_GAS_LIMIT,
            gas_multiplier: DEFAULT_GAS_MULTIPLIER,
            instance_cost: DEFAULT_INSTANCE_COST,
        }
    }
}

impl From<&WasmConfig> for GasRegister {
    fn from(config: &WasmConfig) -> Self {
        GasRegister::new(config.gas_multiplier, config.instance_cost)
    }
}
