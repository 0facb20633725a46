//! System-wide constants for the CowCurve AMM.

use alloy_primitives::U256;

/// Maximum time (seconds) an order's `valid_to` may lie beyond the current
/// timestamp.
pub const MAX_ORDER_DURATION: u32 = 5 * 60;

/// Number of fractional bits in a sqrt price.
pub const RESOLUTION: usize = 96;

/// `2^96`, the unit of a Q64.96 sqrt price.
pub const Q96: U256 = U256::from_limbs([0, 1 << 32, 0, 0]);

/// Largest representable sqrt price (`2^160 - 1`).
pub const MAX_SQRT_PRICE_X96: U256 = U256::from_limbs([u64::MAX, u64::MAX, 0xFFFF_FFFF, 0]);

/// ERC-1271 magic value returned by a successful signature check.
pub const ERC1271_MAGIC_VALUE: [u8; 4] = [0x16, 0x26, 0xba, 0x7e];

/// Domain tag prepended to the canonical words of a `TradingParams` before hashing.
pub const TRADING_PARAMS_HASH_TAG: &[u8] = b"cowcurve:trading_params:v1:";

/// EIP-712 type string of a settlement order.
pub const ORDER_TYPE: &str = "Order(address sellToken,address buyToken,address receiver,\
uint256 sellAmount,uint256 buyAmount,uint32 validTo,bytes32 appData,uint256 feeAmount,\
string kind,bool partiallyFillable,string sellTokenBalance,string buyTokenBalance)";

/// Number of 32-byte words in an encoded order.
pub const ORDER_WORDS: usize = 12;

/// Number of 32-byte words in encoded trading params.
pub const TRADING_PARAMS_WORDS: usize = 4;

/// Size in bytes of an encoded `(Order, TradingParams)` signature payload.
pub const SIGNATURE_PAYLOAD_LEN: usize = (ORDER_WORDS + TRADING_PARAMS_WORDS) * 32;

/// Reasons carried by [`crate::CowCurveError::OrderNotValid`].
pub mod reason {
    pub const RECEIVER_NOT_ZERO: &str = "receiver must be zero";
    pub const VALIDITY_TOO_FAR: &str = "validity too far in future";
    pub const INVALID_APP_DATA: &str = "invalid appData";
    pub const FEE_NOT_ZERO: &str = "fee amount must be zero";
    pub const SELL_BALANCE_NOT_ERC20: &str = "sellTokenBalance must be erc20";
    pub const BUY_BALANCE_NOT_ERC20: &str = "buyTokenBalance must be erc20";
    pub const RECEIVED_TOO_LOW: &str = "received amount too low";
    pub const TRADED_TOO_SMALL: &str = "traded amount too small";
    pub const NO_TRADE_NEEDED: &str = "no trade needed";
}

/// Version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn q96_is_two_to_the_96() {
        assert_eq!(Q96, U256::from(1u8) << RESOLUTION);
    }

    #[test]
    fn max_sqrt_price_is_160_bits() {
        assert_eq!(MAX_SQRT_PRICE_X96, (U256::from(1u8) << 160) - U256::from(1u8));
    }

    #[test]
    fn payload_is_sixteen_words() {
        assert_eq!(SIGNATURE_PAYLOAD_LEN, 512);
    }
}
