//! Persisted AMM state.
//!
//! The state is a single record: which params are live (by hash) and the
//! price, liquidity and balances observed at the last enable or
//! reconciliation. Balances are always observed values, never estimates.

use alloy_primitives::U256;
use serde::{Deserialize, Serialize};

use crate::{ParamsHash, TokenSide};

/// Snapshot of the AMM's trading configuration and last observed price.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AmmState {
    /// Hash of the accepted params, or [`ParamsHash::NO_TRADING`].
    pub trading_params_hash: ParamsHash,
    pub last_sqrt_price_x96: U256,
    pub last_liquidity: u128,
    pub last_balance0: U256,
    pub last_balance1: U256,
}

impl AmmState {
    #[must_use]
    pub fn is_trading_enabled(&self) -> bool {
        !self.trading_params_hash.is_no_trading()
    }

    #[must_use]
    pub fn last_balance(&self, side: TokenSide) -> U256 {
        match side {
            TokenSide::Token0 => self.last_balance0,
            TokenSide::Token1 => self.last_balance1,
        }
    }
}
