//! Order policy and curve checks.
//!
//! Checks run in a fixed order and the first failure wins:
//! 1. Receiver is zero (the AMM itself)
//! 2. Validity ends at most [`MAX_ORDER_DURATION`] after `now`
//! 3. appData matches the params
//! 4. Fee is zero
//! 5. Sell and buy balances are erc20
//! 6. Tokens are the AMM pair, one in and one out
//! 7. The curve pays at least `sell_amount` for `buy_amount`
//! 8. The token0 leg is at least the minimum trade size
//!
//! The verifier does not check the params hash. Callers do that first.

use alloy_primitives::U256;
use cowcurve_math::amount_out_for_token;
use cowcurve_types::constants::{MAX_ORDER_DURATION, reason};
use cowcurve_types::{
    AmmState, CowCurveError, Order, Result, TokenBalance, TokenPair, TokenSide, TradingParams,
};

/// Borrowed view of everything an order is verified against.
#[derive(Debug, Clone, Copy)]
pub struct OrderVerifier<'a> {
    pair: &'a TokenPair,
    state: &'a AmmState,
}

impl<'a> OrderVerifier<'a> {
    #[must_use]
    pub fn new(pair: &'a TokenPair, state: &'a AmmState) -> Self {
        Self { pair, state }
    }

    /// Accept or reject `order` against the last reconciled price.
    ///
    /// # Errors
    /// - `OrderNotValid` with the reason of the first failed policy check
    /// - `InvalidToken` if a token is outside the pair or both are the same side
    /// - `ArithmeticFault` if the curve cannot price `buy_amount`
    pub fn verify(&self, params: &TradingParams, order: &Order, now: u32) -> Result<()> {
        Self::check_policy(params, order, now)?;

        let input = self.pair.side_of(order.buy_token)?;
        let output = self.pair.side_of(order.sell_token)?;
        if output != input.other() {
            return Err(CowCurveError::InvalidToken(order.sell_token));
        }

        let amount_out = amount_out_for_token(
            self.pair,
            self.state.last_sqrt_price_x96,
            self.state.last_liquidity,
            order.buy_token,
            order.buy_amount,
        )?;
        if amount_out < order.sell_amount {
            return Err(CowCurveError::order_not_valid(reason::RECEIVED_TOO_LOW));
        }

        if traded_token0(order, input) < params.min_traded_token0 {
            return Err(CowCurveError::order_not_valid(reason::TRADED_TOO_SMALL));
        }
        Ok(())
    }

    fn check_policy(params: &TradingParams, order: &Order, now: u32) -> Result<()> {
        if !order.receiver.is_zero() {
            return Err(CowCurveError::order_not_valid(reason::RECEIVER_NOT_ZERO));
        }
        if u64::from(order.valid_to) > u64::from(now) + u64::from(MAX_ORDER_DURATION) {
            return Err(CowCurveError::order_not_valid(reason::VALIDITY_TOO_FAR));
        }
        if order.app_data != params.app_data {
            return Err(CowCurveError::order_not_valid(reason::INVALID_APP_DATA));
        }
        if !order.fee_amount.is_zero() {
            return Err(CowCurveError::order_not_valid(reason::FEE_NOT_ZERO));
        }
        if order.sell_token_balance != TokenBalance::Erc20 {
            return Err(CowCurveError::order_not_valid(reason::SELL_BALANCE_NOT_ERC20));
        }
        if order.buy_token_balance != TokenBalance::Erc20 {
            return Err(CowCurveError::order_not_valid(reason::BUY_BALANCE_NOT_ERC20));
        }
        Ok(())
    }
}

/// The token0 leg of an order, whichever direction it trades.
pub(crate) fn traded_token0(order: &Order, input: TokenSide) -> U256 {
    match input {
        TokenSide::Token0 => order.buy_amount,
        TokenSide::Token1 => order.sell_amount,
    }
}
