//! # cowcurve-math
//!
//! **Pure deterministic curve math for CowCurve.**
//!
//! A constant-product curve `L^2 = x * y` expressed through a Q64.96 sqrt
//! price, single range, no ticks. It has:
//!
//! - **Zero side effects**: no state, no balances, no policy
//! - **Deterministic output**: solvers reproduce every result exactly
//! - **Pool-favouring rounding**: outputs round down, required inputs round up
//! - **Overflow safety**: 512-bit intermediates, checked narrowing

pub mod curve;
pub mod full_math;
pub mod sqrt_price;

pub use curve::{
    amount_in_to_reach, amount_out_for_token, amount_out_from_amount_in, next_sqrt_price,
    next_sqrt_price_for_token,
};
pub use sqrt_price::{amount0_delta, amount1_delta};
