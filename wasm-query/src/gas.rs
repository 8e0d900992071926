//! Gas metering of smart queries.

use displaydoc::Display;
use tracing::debug;

/// Unit of chain gas.
pub type Gas = u64;

/// VM gas units per unit of chain gas.
pub const DEFAULT_GAS_MULTIPLIER: u64 = 140_000_000;

/// Chain gas charged for loading a contract instance.
pub const DEFAULT_INSTANCE_COST: Gas = 60_000;

/// Errors raised while consuming gas.
#[derive(Clone, Debug, Display, PartialEq, Eq)]
pub enum GasError {
    /// out of gas in location `{descriptor}`; gas wanted: `{wanted}`, gas limit: `{limit}`
    OutOfGas {
        descriptor: String,
        wanted: Gas,
        limit: Gas,
    },
    /// gas overflow in location `{descriptor}`
    Overflow { descriptor: String },
}

impl std::error::Error for GasError {}

/// Tracks gas consumed against a fixed limit.
///
/// A meter is owned by exactly one call and is neither cloned nor shared.
#[derive(Debug)]
pub struct GasMeter {
    limit: Gas,
    consumed: Gas,
}

impl GasMeter {
    pub fn new(limit: Gas) -> Self {
        Self { limit, consumed: 0 }
    }

    pub fn limit(&self) -> Gas {
        self.limit
    }

    pub fn consumed(&self) -> Gas {
        self.consumed
    }

    pub fn remaining(&self) -> Gas {
        self.limit.saturating_sub(self.consumed)
    }

    pub fn is_out_of_gas(&self) -> bool {
        self.consumed >= self.limit
    }

    /// Consumes `amount` of gas.
    ///
    /// Consumption past the limit fails and leaves the meter saturated at
    /// its limit.
    pub fn consume(&mut self, amount: Gas, descriptor: &str) -> Result<(), GasError> {
        let wanted = self
            .consumed
            .checked_add(amount)
            .ok_or_else(|| GasError::Overflow {
                descriptor: descriptor.to_string(),
            })?;

        if wanted > self.limit {
            self.consumed = self.limit;
            return Err(GasError::OutOfGas {
                descriptor: descriptor.to_string(),
                wanted,
                limit: self.limit,
            });
        }

        self.consumed = wanted;
        Ok(())
    }
}

/// Converts between chain gas and VM gas and prices contract setup.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GasRegister {
    multiplier: u64,
    instance_cost: Gas,
}

impl Default for GasRegister {
    fn default() -> Self {
        Self::new(DEFAULT_GAS_MULTIPLIER, DEFAULT_INSTANCE_COST)
    }
}

impl GasRegister {
    /// Creates a register; a zero multiplier is treated as one.
    pub fn new(multiplier: u64, instance_cost: Gas) -> Self {
        Self {
            multiplier: multiplier.max(1),
            instance_cost,
        }
    }

    pub fn multiplier(&self) -> u64 {
        self.multiplier
    }

    /// Chain gas charged before a contract instance can run.
    pub fn setup_contract_cost(&self) -> Gas {
        self.instance_cost
    }

    pub fn to_vm_gas(&self, gas: Gas) -> Result<u64, GasError> {
        gas.checked_mul(self.multiplier)
            .ok_or_else(|| GasError::Overflow {
                descriptor: "to vm gas".to_string(),
            })
    }

    pub fn from_vm_gas(&self, vm_gas: u64) -> Gas {
        vm_gas / self.multiplier
    }
}

/// Runs `f` with a fresh gas meter bounded by `limit`.
///
/// The meter lives only for the duration of the call and is dropped on
/// every exit path, so nothing it records reaches block gas accounting.
pub fn with_query_gas_meter<T, E, F>(limit: Gas, f: F) -> Result<T, E>
where
    F: FnOnce(&mut GasMeter) -> Result<T, E>,
{
    let mut meter = GasMeter::new(limit);

    let result = f(&mut meter);

    debug!(
        limit,
        consumed = meter.consumed(),
        success = result.is_ok(),
        "smart query gas used"
    );

    result
}
