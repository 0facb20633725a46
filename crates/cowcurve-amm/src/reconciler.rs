//! Post-trade reconciliation.
//!
//! After the settlement engine has moved tokens, the AMM reads its balances,
//! treats the side that grew as the trade input and advances the live price
//! along the curve by that amount. This is the only path by which the price
//! moves between enables.

use alloy_primitives::U256;
use cowcurve_math::next_sqrt_price_for_token;
use cowcurve_types::{CowCurveError, Result, TokenSide, TradingParams};
use tracing::{info, warn};

use crate::amm::CowAmm;
use crate::balances::TokenBalances;
use crate::context::CallContext;

/// What the reconciler observed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reconciliation {
    /// `amount_in` of `input` arrived and the price moved.
    Traded { input: TokenSide, amount_in: U256 },
    /// Neither balance grew. Price kept, balances re-snapshotted.
    NoTrade,
}

impl<B: TokenBalances> CowAmm<B> {
    /// Reconcile price and balance snapshot after a settlement.
    ///
    /// # Errors
    /// - `OnlySettlement` unless the caller of `ctx` is the settlement contract
    /// - `TradingParamsDoNotMatchHash` for stale params or while disabled
    /// - `AmbiguousBalanceDelta` if both balances grew
    /// - `ArithmeticFault` if the curve cannot absorb the input
    pub fn post_hook(&mut self, ctx: &CallContext, params: &TradingParams) -> Result<Reconciliation> {
        self.only_settlement(ctx.caller())?;
        self.require_live_params(params)?;

        let (balance0, balance1) = self.observe_balances();
        let state = self.state();
        let incoming: Vec<(TokenSide, U256)> = [(TokenSide::Token0, balance0), (TokenSide::Token1, balance1)]
            .into_iter()
            .filter_map(|(side, observed)| {
                observed
                    .checked_sub(state.last_balance(side))
                    .filter(|delta| !delta.is_zero())
                    .map(|delta| (side, delta))
            })
            .collect();

        let (outcome, sqrt_price_x96) = match incoming.as_slice() {
            [] => (Reconciliation::NoTrade, state.last_sqrt_price_x96),
            &[(input, amount_in)] => {
                let price = next_sqrt_price_for_token(
                    self.pair(),
                    state.last_sqrt_price_x96,
                    state.last_liquidity,
                    self.pair().token(input),
                    amount_in,
                )?;
                (Reconciliation::Traded { input, amount_in }, price)
            }
            _ => return Err(CowCurveError::AmbiguousBalanceDelta),
        };

        let previous = state.last_sqrt_price_x96;
        let next = self.state_mut();
        next.last_sqrt_price_x96 = sqrt_price_x96;
        next.last_balance0 = balance0;
        next.last_balance1 = balance1;

        match outcome {
            Reconciliation::Traded { input, amount_in } => info!(
                ?input,
                amount_in = %amount_in,
                from = %previous,
                to = %sqrt_price_x96,
                "price reconciled"
            ),
            Reconciliation::NoTrade => warn!(
                balance0 = %balance0,
                balance1 = %balance1,
                "post hook saw no incoming balance, price unchanged"
            ),
        }
        Ok(outcome)
    }
}
