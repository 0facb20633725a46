//! Full-precision multiply-divide.
//!
//! Products of a Q64.96 price, a `u128` liquidity and a `U256` amount need up
//! to 416 bits, so every intermediate is widened to 512 bits and only the
//! final quotient is narrowed back to 256 bits (checked).

use alloy_primitives::{U256, U512};
use cowcurve_types::{CowCurveError, Result};

#[must_use]
pub fn widen(value: U256) -> U512 {
    let mut limbs = [0u64; 8];
    limbs[..4].copy_from_slice(value.as_limbs());
    U512::from_limbs(limbs)
}

/// Narrow a 512-bit value back to 256 bits.
///
/// # Errors
/// Returns [`CowCurveError::ArithmeticFault`] if the value does not fit.
pub fn narrow(value: U512) -> Result<U256> {
    U256::checked_from_limbs_slice(value.as_limbs())
        .ok_or_else(|| CowCurveError::arithmetic("result exceeds 256 bits"))
}

/// `floor(a / b)` on wide operands.
pub fn div_floor(a: U512, b: U512) -> Result<U512> {
    if b.is_zero() {
        return Err(CowCurveError::arithmetic("division by zero"));
    }
    Ok(a / b)
}

/// `ceil(a / b)` on wide operands.
pub fn div_ceil(a: U512, b: U512) -> Result<U512> {
    if b.is_zero() {
        return Err(CowCurveError::arithmetic("division by zero"));
    }
    let quotient = a / b;
    if (a % b).is_zero() {
        Ok(quotient)
    } else {
        Ok(quotient + U512::from(1u8))
    }
}

/// `floor(a * b / denominator)` with a 512-bit intermediate.
pub fn mul_div(a: U256, b: U256, denominator: U256) -> Result<U256> {
    narrow(div_floor(widen(a) * widen(b), widen(denominator))?)
}

/// `ceil(a * b / denominator)` with a 512-bit intermediate.
pub fn mul_div_rounding_up(a: U256, b: U256, denominator: U256) -> Result<U256> {
    narrow(div_ceil(widen(a) * widen(b), widen(denominator))?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn widen_narrow_roundtrip() {
        for v in [U256::ZERO, U256::from(12345u64), U256::MAX] {
            assert_eq!(narrow(widen(v)).unwrap(), v);
        }
    }

    #[test]
    fn narrow_keeps_values_below_256_bits() {
        assert_eq!(narrow(U512::from(1u8)).unwrap(), U256::from(1u8));
        assert_eq!(narrow(U512::from(u128::MAX)).unwrap(), U256::from(u128::MAX));
        let top = widen(U256::MAX);
        assert_eq!(narrow(top).unwrap(), U256::MAX);
    }

    #[test]
    fn mul_div_small_operands() {
        assert_eq!(
            mul_div(U256::from(6u8), U256::from(7u8), U256::from(2u8)).unwrap(),
            U256::from(21u8)
        );
    }

    #[test]
    fn narrow_rejects_overflow() {
        let too_big = widen(U256::MAX) + U512::from(1u8);
        assert!(narrow(too_big).is_err());
    }

    #[test]
    fn mul_div_handles_512_bit_product() {
        // MAX * MAX / MAX == MAX, the product alone overflows 256 bits.
        assert_eq!(mul_div(U256::MAX, U256::MAX, U256::MAX).unwrap(), U256::MAX);
    }

    #[test]
    fn rounding_direction() {
        let seven = U256::from(7u8);
        let two = U256::from(2u8);
        let one = U256::from(1u8);
        assert_eq!(mul_div(seven, one, two).unwrap(), U256::from(3u8));
        assert_eq!(mul_div_rounding_up(seven, one, two).unwrap(), U256::from(4u8));
        // exact division does not round up
        assert_eq!(mul_div_rounding_up(U256::from(8u8), one, two).unwrap(), U256::from(4u8));
    }

    #[test]
    fn zero_denominator_is_arithmetic_fault() {
        let err = mul_div(U256::from(1u8), U256::from(1u8), U256::ZERO).unwrap_err();
        assert!(matches!(err, CowCurveError::ArithmeticFault { .. }));
    }

    #[test]
    fn quotient_too_large_is_arithmetic_fault() {
        assert!(mul_div(U256::MAX, U256::from(2u8), U256::from(1u8)).is_err());
    }
}
