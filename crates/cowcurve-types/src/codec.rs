//! Signature payload codec.
//!
//! The settlement engine passes the AMM an opaque "signature" that is the
//! static tuple `(Order, TradingParams)`: 12 order words followed by 4
//! params words.

use crate::abi::WordReader;
use crate::constants::{ORDER_WORDS, SIGNATURE_PAYLOAD_LEN, TRADING_PARAMS_WORDS};
use crate::{Order, Result, TradingParams};

/// Encode an order and the params it is traded against.
#[must_use]
pub fn encode_signature(order: &Order, params: &TradingParams) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(SIGNATURE_PAYLOAD_LEN);
    for word in order.abi_words() {
        bytes.extend_from_slice(&word);
    }
    for word in params.abi_words() {
        bytes.extend_from_slice(&word);
    }
    bytes
}

/// Decode a payload produced by [`encode_signature`].
///
/// # Errors
/// Returns [`crate::CowCurveError::Serialization`] on a wrong length, dirty
/// padding, or an unknown kind/balance marker.
pub fn decode_signature(bytes: &[u8]) -> Result<(Order, TradingParams)> {
    let mut reader = WordReader::new(bytes, ORDER_WORDS + TRADING_PARAMS_WORDS)?;
    let order = Order::read_from(&mut reader)?;
    let params = TradingParams::read_from(&mut reader)?;
    Ok((order, params))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CowCurveError;

    #[test]
    fn payload_has_fixed_length() {
        let bytes = encode_signature(&Order::random(), &TradingParams::dummy(1));
        assert_eq!(bytes.len(), SIGNATURE_PAYLOAD_LEN);
    }

    #[test]
    fn decode_recovers_both_parts() {
        let order = Order::random();
        let params = TradingParams::dummy(123);
        let (o, p) = decode_signature(&encode_signature(&order, &params)).unwrap();
        assert_eq!(o, order);
        assert_eq!(p, params);
    }

    #[test]
    fn truncated_payload_rejected() {
        let bytes = encode_signature(&Order::random(), &TradingParams::dummy(1));
        let err = decode_signature(&bytes[..bytes.len() - 1]).unwrap_err();
        assert!(matches!(err, CowCurveError::Serialization(_)));
    }

    #[test]
    fn unknown_kind_marker_rejected() {
        let mut bytes = encode_signature(&Order::random(), &TradingParams::dummy(1));
        // kind is word 8
        bytes[8 * 32] ^= 0xff;
        assert!(decode_signature(&bytes).is_err());
    }

    #[test]
    fn oversized_liquidity_word_rejected() {
        let mut bytes = encode_signature(&Order::random(), &TradingParams::dummy(1));
        // liquidity is params word 2
        bytes[(ORDER_WORDS + 2) * 32] = 1;
        assert!(decode_signature(&bytes).is_err());
    }
}
