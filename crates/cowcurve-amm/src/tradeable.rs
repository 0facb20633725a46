//! Tradeable-order generator.
//!
//! Builds the order an off-chain poller submits to move the AMM from its live
//! price to a target price. The order is built from the same curve functions
//! the verifier uses, so it always passes verification at the time it is
//! generated.

use alloy_primitives::{Address, U256};
use cowcurve_math::{amount_in_to_reach, amount_out_from_amount_in};
use cowcurve_types::constants::{MAX_ORDER_DURATION, MAX_SQRT_PRICE_X96, reason};
use cowcurve_types::{CowCurveError, Order, OrderKind, Result, TokenBalance, TradingParams};
use tracing::debug;

use crate::amm::CowAmm;
use crate::balances::TokenBalances;
use crate::verifier::traded_token0;

impl<B: TokenBalances> CowAmm<B> {
    /// Order that moves the live price to `target_sqrt_price_x96`.
    ///
    /// # Errors
    /// - `TradingParamsDoNotMatchHash` for stale params or while disabled
    /// - `OrderNotValid` if no trade is needed or the trade is below the
    ///   minimum size
    /// - `PollTryLater` if the AMM does not hold enough of the output token
    /// - `ArithmeticFault` for a target outside `(0, 2^160)`
    pub fn tradeable_order(
        &self,
        params: &TradingParams,
        target_sqrt_price_x96: U256,
        now: u32,
    ) -> Result<Order> {
        self.require_live_params(params)?;
        if target_sqrt_price_x96.is_zero() || target_sqrt_price_x96 > MAX_SQRT_PRICE_X96 {
            return Err(CowCurveError::arithmetic("target sqrt price out of range"));
        }

        let state = self.state();
        if target_sqrt_price_x96 == state.last_sqrt_price_x96 {
            return Err(CowCurveError::order_not_valid(reason::NO_TRADE_NEEDED));
        }

        let (input, amount_in) = amount_in_to_reach(
            state.last_sqrt_price_x96,
            target_sqrt_price_x96,
            state.last_liquidity,
        )?;
        let amount_out = amount_out_from_amount_in(
            state.last_sqrt_price_x96,
            state.last_liquidity,
            amount_in,
            input,
        )?;

        let sell_token = self.pair().token(input.other());
        let held = self.balances().balance_of(sell_token);
        if amount_out > held {
            return Err(CowCurveError::PollTryLater {
                reason: format!("need {amount_out} of {sell_token}, hold {held}"),
            });
        }

        let order = Order {
            sell_token,
            buy_token: self.pair().token(input),
            receiver: Address::ZERO,
            sell_amount: amount_out,
            buy_amount: amount_in,
            valid_to: now.saturating_add(MAX_ORDER_DURATION),
            app_data: params.app_data,
            fee_amount: U256::ZERO,
            kind: OrderKind::Sell,
            partially_fillable: false,
            sell_token_balance: TokenBalance::Erc20,
            buy_token_balance: TokenBalance::Erc20,
        };
        if amount_out.is_zero() || traded_token0(&order, input) < params.min_traded_token0 {
            return Err(CowCurveError::order_not_valid(reason::TRADED_TOO_SMALL));
        }

        debug!(%order, "tradeable order built");
        Ok(order)
    }
}
