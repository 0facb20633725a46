//! Settlement orders as seen by the AMM.
//!
//! The settlement engine owns the order format; this module mirrors it and
//! reproduces its domain-bound EIP-712 hash so the AMM can check that the
//! order it is asked to authorize is the one being signed for.

use std::fmt;

use alloy_primitives::{Address, B256, U256, keccak256};
use serde::{Deserialize, Serialize};

use crate::abi::{self, Word, WordReader};
use crate::constants::{ORDER_TYPE, ORDER_WORDS};
use crate::{CowCurveError, OrderHash, Result};

/// Whether the order fixes the sell or the buy amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrderKind {
    Sell,
    Buy,
}

impl OrderKind {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Sell => "sell",
            Self::Buy => "buy",
        }
    }

    /// `keccak256` of the kind string, as it appears in the hashed struct.
    #[must_use]
    pub fn marker(self) -> B256 {
        keccak256(self.as_str())
    }

    /// Inverse of [`OrderKind::marker`].
    pub fn from_marker(marker: B256) -> Result<Self> {
        [Self::Sell, Self::Buy]
            .into_iter()
            .find(|k| k.marker() == marker)
            .ok_or_else(|| CowCurveError::Serialization(format!("unknown order kind {marker}")))
    }
}

impl fmt::Display for OrderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sell => write!(f, "SELL"),
            Self::Buy => write!(f, "BUY"),
        }
    }
}

/// Where the settlement engine takes or puts a token balance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TokenBalance {
    /// Plain token balance of the owner.
    Erc20,
    /// Vault balance via an external allowance.
    External,
    /// Internal vault balance.
    Internal,
}

impl TokenBalance {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Erc20 => "erc20",
            Self::External => "external",
            Self::Internal => "internal",
        }
    }

    #[must_use]
    pub fn marker(self) -> B256 {
        keccak256(self.as_str())
    }

    pub fn from_marker(marker: B256) -> Result<Self> {
        [Self::Erc20, Self::External, Self::Internal]
            .into_iter()
            .find(|b| b.marker() == marker)
            .ok_or_else(|| {
                CowCurveError::Serialization(format!("unknown token balance {marker}"))
            })
    }
}

impl fmt::Display for TokenBalance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An order the AMM is asked to authorize. The AMM is the owner: it sells
/// `sell_amount` of `sell_token` and receives `buy_amount` of `buy_token`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Order {
    pub sell_token: Address,
    pub buy_token: Address,
    /// Zero means "the owner".
    pub receiver: Address,
    pub sell_amount: U256,
    pub buy_amount: U256,
    /// Unix timestamp (seconds) after which the order is void.
    pub valid_to: u32,
    pub app_data: B256,
    pub fee_amount: U256,
    pub kind: OrderKind,
    pub partially_fillable: bool,
    pub sell_token_balance: TokenBalance,
    pub buy_token_balance: TokenBalance,
}

impl Order {
    /// `keccak256` of the EIP-712 type string.
    #[must_use]
    pub fn type_hash() -> B256 {
        keccak256(ORDER_TYPE)
    }

    /// Canonical words, in field order. Kind and balances are encoded as
    /// their string markers.
    #[must_use]
    pub fn abi_words(&self) -> [Word; ORDER_WORDS] {
        [
            abi::address_word(self.sell_token),
            abi::address_word(self.buy_token),
            abi::address_word(self.receiver),
            abi::u256_word(self.sell_amount),
            abi::u256_word(self.buy_amount),
            abi::u32_word(self.valid_to),
            abi::b256_word(self.app_data),
            abi::u256_word(self.fee_amount),
            abi::b256_word(self.kind.marker()),
            abi::bool_word(self.partially_fillable),
            abi::b256_word(self.sell_token_balance.marker()),
            abi::b256_word(self.buy_token_balance.marker()),
        ]
    }

    /// Decode from canonical words.
    pub fn read_from(reader: &mut WordReader<'_>) -> Result<Self> {
        Ok(Self {
            sell_token: reader.address()?,
            buy_token: reader.address()?,
            receiver: reader.address()?,
            sell_amount: reader.u256()?,
            buy_amount: reader.u256()?,
            valid_to: reader.u32()?,
            app_data: reader.b256()?,
            fee_amount: reader.u256()?,
            kind: OrderKind::from_marker(reader.b256()?)?,
            partially_fillable: reader.bool()?,
            sell_token_balance: TokenBalance::from_marker(reader.b256()?)?,
            buy_token_balance: TokenBalance::from_marker(reader.b256()?)?,
        })
    }

    /// EIP-712 struct hash: `keccak256(type_hash || words)`.
    #[must_use]
    pub fn struct_hash(&self) -> B256 {
        let mut buf = Vec::with_capacity(32 * (ORDER_WORDS + 1));
        buf.extend_from_slice(Self::type_hash().as_slice());
        for word in self.abi_words() {
            buf.extend_from_slice(&word);
        }
        keccak256(&buf)
    }

    /// Domain-bound hash: `keccak256(0x1901 || domain_separator || struct_hash)`.
    #[must_use]
    pub fn hash(&self, domain_separator: B256) -> OrderHash {
        let mut buf = [0u8; 66];
        buf[0] = 0x19;
        buf[1] = 0x01;
        buf[2..34].copy_from_slice(domain_separator.as_slice());
        buf[34..].copy_from_slice(self.struct_hash().as_slice());
        OrderHash(keccak256(buf))
    }
}

impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Order[{}] sell {} {} for {} {} until {}",
            self.kind,
            self.sell_amount,
            self.sell_token,
            self.buy_amount,
            self.buy_token,
            self.valid_to,
        )
    }
}

/// Test helpers.
#[cfg(any(test, feature = "test-helpers"))]
impl Order {
    /// A well-formed sell order with zero fee, zero receiver and erc20 balances.
    pub fn dummy(
        sell_token: Address,
        buy_token: Address,
        sell_amount: U256,
        buy_amount: U256,
        valid_to: u32,
        app_data: B256,
    ) -> Self {
        Self {
            sell_token,
            buy_token,
            receiver: Address::ZERO,
            sell_amount,
            buy_amount,
            valid_to,
            app_data,
            fee_amount: U256::ZERO,
            kind: OrderKind::Sell,
            partially_fillable: false,
            sell_token_balance: TokenBalance::Erc20,
            buy_token_balance: TokenBalance::Erc20,
        }
    }

    /// Random token addresses, for hashing tests.
    pub fn random() -> Self {
        Self::dummy(
            Address::from(rand::random::<[u8; 20]>()),
            Address::from(rand::random::<[u8; 20]>()),
            U256::from(rand::random::<u64>()),
            U256::from(rand::random::<u64>()),
            rand::random::<u32>(),
            B256::from(rand::random::<[u8; 32]>()),
        )
    }
}
