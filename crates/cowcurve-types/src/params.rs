//! Trading parameters: the content-addressed AMM configuration.
//!
//! Only the [`ParamsHash`] of the active parameters is stored. Every caller
//! re-supplies the full struct, which is re-hashed and compared.

use alloy_primitives::{B256, U256};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::abi::{self, Word, WordReader};
use crate::constants::{MAX_SQRT_PRICE_X96, TRADING_PARAMS_HASH_TAG, TRADING_PARAMS_WORDS};
use crate::{CowCurveError, ParamsHash, Result};

/// Parameters governing which orders are admissible while trading is enabled.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TradingParams {
    /// Minimum token0-denominated size of a trade.
    pub min_traded_token0: U256,
    /// Sqrt price (Q64.96) adopted when trading is enabled.
    pub sqrt_price_deposit_x96: U256,
    /// Virtual liquidity of the curve.
    pub liquidity: u128,
    /// Application tag every order must carry.
    pub app_data: B256,
}

impl TradingParams {
    /// Canonical words, in field order.
    #[must_use]
    pub fn abi_words(&self) -> [Word; TRADING_PARAMS_WORDS] {
        [
            abi::u256_word(self.min_traded_token0),
            abi::u256_word(self.sqrt_price_deposit_x96),
            abi::u128_word(self.liquidity),
            abi::b256_word(self.app_data),
        ]
    }

    /// Decode from canonical words.
    pub fn read_from(reader: &mut WordReader<'_>) -> Result<Self> {
        Ok(Self {
            min_traded_token0: reader.u256()?,
            sqrt_price_deposit_x96: reader.u160()?,
            liquidity: reader.u128()?,
            app_data: reader.b256()?,
        })
    }

    /// Content address: `SHA-256(tag || words)`.
    #[must_use]
    pub fn hash(&self) -> ParamsHash {
        let mut hasher = Sha256::new();
        hasher.update(TRADING_PARAMS_HASH_TAG);
        for word in self.abi_words() {
            hasher.update(word);
        }
        let result = hasher.finalize();
        let mut hash = [0u8; 32];
        hash.copy_from_slice(&result);
        ParamsHash(hash)
    }

    /// Check the params can back an enabled AMM.
    ///
    /// # Errors
    /// Returns [`CowCurveError::InvalidTradingParams`] for zero liquidity or a
    /// sqrt price outside `(0, 2^160)`.
    pub fn validate(&self) -> Result<()> {
        if self.liquidity == 0 {
            return Err(CowCurveError::InvalidTradingParams {
                reason: "liquidity must be non-zero".into(),
            });
        }
        if self.sqrt_price_deposit_x96.is_zero() {
            return Err(CowCurveError::InvalidTradingParams {
                reason: "sqrt price must be non-zero".into(),
            });
        }
        if self.sqrt_price_deposit_x96 > MAX_SQRT_PRICE_X96 {
            return Err(CowCurveError::InvalidTradingParams {
                reason: format!(
                    "sqrt price {} exceeds 160 bits",
                    self.sqrt_price_deposit_x96
                ),
            });
        }
        Ok(())
    }
}

/// Test helpers.
#[cfg(any(test, feature = "test-helpers"))]
impl TradingParams {
    /// Price 1.0, the given liquidity, no minimum size.
    pub fn dummy(liquidity: u128) -> Self {
        Self {
            min_traded_token0: U256::ZERO,
            sqrt_price_deposit_x96: crate::constants::Q96,
            liquidity,
            app_data: B256::repeat_byte(0xa0),
        }
    }
}
