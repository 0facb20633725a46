//! Identifiers and hashes used throughout CowCurve.
//!
//! Token and caller identities are plain EVM [`Address`]es. Hashes are
//! wrapped in newtypes so an order hash can never be passed where a params
//! hash is expected.

use std::fmt;

use alloy_primitives::{Address, B256};
use serde::{Deserialize, Serialize};

use crate::{CowCurveError, Result};

// ---------------------------------------------------------------------------
// OrderHash
// ---------------------------------------------------------------------------

/// Domain-bound EIP-712 hash of an order. Also the value stored in a
/// commitment slot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OrderHash(pub B256);

impl OrderHash {
    /// All-zero hash, the default of a commitment slot.
    pub const EMPTY: Self = Self(B256::ZERO);

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0 == B256::ZERO
    }
}

impl fmt::Display for OrderHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<B256> for OrderHash {
    fn from(value: B256) -> Self {
        Self(value)
    }
}

/// Commitment value meaning "no explicit restriction".
pub const EMPTY_COMMITMENT: OrderHash = OrderHash::EMPTY;

// ---------------------------------------------------------------------------
// ParamsHash
// ---------------------------------------------------------------------------

/// SHA-256 content address of a [`crate::TradingParams`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ParamsHash(pub [u8; 32]);

impl ParamsHash {
    /// Sentinel stored while trading is disabled.
    pub const NO_TRADING: Self = Self([0u8; 32]);

    #[must_use]
    pub fn is_no_trading(&self) -> bool {
        *self == Self::NO_TRADING
    }
}

impl Default for ParamsHash {
    fn default() -> Self {
        Self::NO_TRADING
    }
}

impl fmt::Display for ParamsHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

/// Params hash meaning "all orders rejected".
pub const NO_TRADING: ParamsHash = ParamsHash::NO_TRADING;

// ---------------------------------------------------------------------------
// TokenSide / TokenPair
// ---------------------------------------------------------------------------

/// One of the two tokens of the pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TokenSide {
    Token0,
    Token1,
}

impl TokenSide {
    #[must_use]
    pub fn other(self) -> Self {
        match self {
            Self::Token0 => Self::Token1,
            Self::Token1 => Self::Token0,
        }
    }
}

impl fmt::Display for TokenSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Token0 => write!(f, "TOKEN0"),
            Self::Token1 => write!(f, "TOKEN1"),
        }
    }
}

/// The two tokens traded by an AMM instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TokenPair {
    pub token0: Address,
    pub token1: Address,
}

impl TokenPair {
    #[must_use]
    pub fn new(token0: Address, token1: Address) -> Self {
        Self { token0, token1 }
    }

    /// Resolve a token address to its side.
    ///
    /// # Errors
    /// Returns [`CowCurveError::InvalidToken`] for any other address.
    pub fn side_of(&self, token: Address) -> Result<TokenSide> {
        if token == self.token0 {
            Ok(TokenSide::Token0)
        } else if token == self.token1 {
            Ok(TokenSide::Token1)
        } else {
            Err(CowCurveError::InvalidToken(token))
        }
    }

    #[must_use]
    pub fn token(&self, side: TokenSide) -> Address {
        match side {
            TokenSide::Token0 => self.token0,
            TokenSide::Token1 => self.token1,
        }
    }
}

impl fmt::Display for TokenPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.token0, self.token1)
    }
}
