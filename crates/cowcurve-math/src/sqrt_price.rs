//! Sqrt-price transitions and the amounts between two prices.
//!
//! Prices are `sqrt(token1 / token0) * 2^96`. For virtual liquidity `L`:
//!
//! ```text
//! amount0 = L * 2^96 * (sqrtB - sqrtA) / (sqrtA * sqrtB)
//! amount1 = L * (sqrtB - sqrtA) / 2^96
//! ```
//!
//! Every function rounds so the pool never pays out more, or takes in less,
//! than the exact curve would.

use alloy_primitives::{U256, U512};
use cowcurve_types::constants::{MAX_SQRT_PRICE_X96, Q96, RESOLUTION};
use cowcurve_types::{CowCurveError, Result};

use crate::full_math::{div_ceil, div_floor, mul_div, mul_div_rounding_up, narrow, widen};

fn liquidity_x96(liquidity: u128) -> U512 {
    U512::from(liquidity) << RESOLUTION
}

fn check_inputs(sqrt_price_x96: U256, liquidity: u128) -> Result<()> {
    if liquidity == 0 {
        return Err(CowCurveError::arithmetic("zero liquidity"));
    }
    if sqrt_price_x96.is_zero() {
        return Err(CowCurveError::arithmetic("zero sqrt price"));
    }
    if sqrt_price_x96 > MAX_SQRT_PRICE_X96 {
        return Err(CowCurveError::arithmetic("sqrt price exceeds 160 bits"));
    }
    Ok(())
}

/// Price after adding `amount` of token0. Rounds up, so the price falls by
/// no more than the exact value.
///
/// ```text
/// sqrtP' = ceil(L * 2^96 * sqrtP / (L * 2^96 + amount * sqrtP))
/// ```
pub fn next_sqrt_price_from_amount0_in(
    sqrt_price_x96: U256,
    liquidity: u128,
    amount: U256,
) -> Result<U256> {
    check_inputs(sqrt_price_x96, liquidity)?;
    if amount.is_zero() {
        return Ok(sqrt_price_x96);
    }
    let numerator = liquidity_x96(liquidity);
    let price = widen(sqrt_price_x96);
    let denominator = numerator + widen(amount) * price;
    let next = narrow(div_ceil(numerator * price, denominator)?)?;
    if next.is_zero() {
        return Err(CowCurveError::arithmetic("sqrt price underflow"));
    }
    Ok(next)
}

/// Price after adding `amount` of token1. Rounds down, so the price rises by
/// no more than the exact value.
///
/// ```text
/// sqrtP' = sqrtP + floor(amount * 2^96 / L)
/// ```
pub fn next_sqrt_price_from_amount1_in(
    sqrt_price_x96: U256,
    liquidity: u128,
    amount: U256,
) -> Result<U256> {
    check_inputs(sqrt_price_x96, liquidity)?;
    let quotient = div_floor(widen(amount) << RESOLUTION, U512::from(liquidity))?;
    let next = widen(sqrt_price_x96) + quotient;
    let next = narrow(next)?;
    if next > MAX_SQRT_PRICE_X96 {
        return Err(CowCurveError::arithmetic("sqrt price overflow"));
    }
    Ok(next)
}

fn ordered(a: U256, b: U256) -> (U256, U256) {
    if a > b { (b, a) } else { (a, b) }
}

/// Token0 between two prices.
pub fn amount0_delta(
    sqrt_price_a_x96: U256,
    sqrt_price_b_x96: U256,
    liquidity: u128,
    round_up: bool,
) -> Result<U256> {
    let (lower, upper) = ordered(sqrt_price_a_x96, sqrt_price_b_x96);
    if lower.is_zero() {
        return Err(CowCurveError::arithmetic("zero sqrt price"));
    }
    let numerator = liquidity_x96(liquidity) * widen(upper - lower);
    let amount = if round_up {
        div_ceil(div_ceil(numerator, widen(upper))?, widen(lower))?
    } else {
        div_floor(div_floor(numerator, widen(upper))?, widen(lower))?
    };
    narrow(amount)
}

/// Token1 between two prices.
pub fn amount1_delta(
    sqrt_price_a_x96: U256,
    sqrt_price_b_x96: U256,
    liquidity: u128,
    round_up: bool,
) -> Result<U256> {
    let (lower, upper) = ordered(sqrt_price_a_x96, sqrt_price_b_x96);
    let liquidity = U256::from(liquidity);
    if round_up {
        mul_div_rounding_up(liquidity, upper - lower, Q96)
    } else {
        mul_div(liquidity, upper - lower, Q96)
    }
}
