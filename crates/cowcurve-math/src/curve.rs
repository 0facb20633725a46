//! Curve pricing entry points.
//!
//! These are the functions a solver must reproduce bit-for-bit to build an
//! order the AMM will accept: the pool's output for a given input, and the
//! price after that input is added to the pool.

use alloy_primitives::{Address, U256};
use cowcurve_types::{Result, TokenPair, TokenSide};

use crate::sqrt_price::{
    amount0_delta, amount1_delta, next_sqrt_price_from_amount0_in,
    next_sqrt_price_from_amount1_in,
};

/// Sqrt price after `amount_in` of `input` is added to the pool.
///
/// Token0 in moves the price down, token1 in moves it up.
pub fn next_sqrt_price(
    sqrt_price_x96: U256,
    liquidity: u128,
    amount_in: U256,
    input: TokenSide,
) -> Result<U256> {
    match input {
        TokenSide::Token0 => next_sqrt_price_from_amount0_in(sqrt_price_x96, liquidity, amount_in),
        TokenSide::Token1 => next_sqrt_price_from_amount1_in(sqrt_price_x96, liquidity, amount_in),
    }
}

/// Amount of the other token the pool pays for `amount_in` of `input`,
/// rounded down.
pub fn amount_out_from_amount_in(
    sqrt_price_x96: U256,
    liquidity: u128,
    amount_in: U256,
    input: TokenSide,
) -> Result<U256> {
    let next = next_sqrt_price(sqrt_price_x96, liquidity, amount_in, input)?;
    match input {
        TokenSide::Token0 => amount1_delta(next, sqrt_price_x96, liquidity, false),
        TokenSide::Token1 => amount0_delta(sqrt_price_x96, next, liquidity, false),
    }
}

/// Amount of `input` the pool must receive to move from `sqrt_price_x96` to
/// `target_sqrt_price_x96`, rounded up. The input side follows from the
/// direction of the move.
pub fn amount_in_to_reach(
    sqrt_price_x96: U256,
    target_sqrt_price_x96: U256,
    liquidity: u128,
) -> Result<(TokenSide, U256)> {
    if target_sqrt_price_x96 < sqrt_price_x96 {
        let amount = amount0_delta(target_sqrt_price_x96, sqrt_price_x96, liquidity, true)?;
        Ok((TokenSide::Token0, amount))
    } else {
        let amount = amount1_delta(sqrt_price_x96, target_sqrt_price_x96, liquidity, true)?;
        Ok((TokenSide::Token1, amount))
    }
}

/// Token-addressed variant of [`amount_out_from_amount_in`].
///
/// # Errors
/// Returns [`cowcurve_types::CowCurveError::InvalidToken`] if `token_in` is not
/// one of `pair`.
pub fn amount_out_for_token(
    pair: &TokenPair,
    sqrt_price_x96: U256,
    liquidity: u128,
    token_in: Address,
    amount_in: U256,
) -> Result<U256> {
    let input = pair.side_of(token_in)?;
    amount_out_from_amount_in(sqrt_price_x96, liquidity, amount_in, input)
}

/// Token-addressed variant of [`next_sqrt_price`].
pub fn next_sqrt_price_for_token(
    pair: &TokenPair,
    sqrt_price_x96: U256,
    liquidity: u128,
    token_in: Address,
    amount_in: U256,
) -> Result<U256> {
    let input = pair.side_of(token_in)?;
    next_sqrt_price(sqrt_price_x96, liquidity, amount_in, input)
}
