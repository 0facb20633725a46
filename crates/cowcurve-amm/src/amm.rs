//! The AMM instance: persisted state, manager operations and commit.

use alloy_primitives::{Address, U256};
use cowcurve_types::{
    AmmConfig, AmmState, CowCurveError, Order, OrderHash, ParamsHash, Result, TokenPair,
    TradingParams,
};
use tracing::{debug, info};

use crate::balances::TokenBalances;
use crate::context::CallContext;
use crate::verifier::OrderVerifier;

/// One CowCurve AMM holding a single token pair.
///
/// Mutating entry points take `&mut self`, so the host serializes them. Each
/// validates everything before writing state, so a failed call leaves the
/// AMM untouched.
#[derive(Debug)]
pub struct CowAmm<B> {
    config: AmmConfig,
    pair: TokenPair,
    state: AmmState,
    balances: B,
}

impl<B: TokenBalances> CowAmm<B> {
    /// Create a disabled AMM.
    ///
    /// # Errors
    /// Returns [`CowCurveError::Configuration`] if the config is invalid.
    pub fn new(config: AmmConfig, balances: B) -> Result<Self> {
        config.validate()?;
        let pair = config.pair();
        info!(
            token0 = %pair.token0,
            token1 = %pair.token1,
            manager = %config.manager,
            "AMM created"
        );
        Ok(Self {
            config,
            pair,
            state: AmmState::default(),
            balances,
        })
    }

    // -----------------------------------------------------------------
    // Accessors
    // -----------------------------------------------------------------

    #[must_use]
    pub fn config(&self) -> &AmmConfig {
        &self.config
    }

    #[must_use]
    pub fn pair(&self) -> &TokenPair {
        &self.pair
    }

    #[must_use]
    pub fn state(&self) -> &AmmState {
        &self.state
    }

    #[must_use]
    pub fn trading_params_hash(&self) -> ParamsHash {
        self.state.trading_params_hash
    }

    #[must_use]
    pub fn is_trading_enabled(&self) -> bool {
        self.state.is_trading_enabled()
    }

    #[must_use]
    pub fn balances(&self) -> &B {
        &self.balances
    }

    /// Mutable access to the balance source, for hosts that apply
    /// settlement transfers to it directly.
    pub fn balances_mut(&mut self) -> &mut B {
        &mut self.balances
    }

    /// The committed order hash of the call in `ctx`.
    #[must_use]
    pub fn commitment(&self, ctx: &CallContext) -> OrderHash {
        ctx.commitment()
    }

    // -----------------------------------------------------------------
    // Manager operations
    // -----------------------------------------------------------------

    /// Activate `params` and adopt the deposit price and liquidity.
    ///
    /// Replaces any previously enabled params. The current balances become
    /// the reconciliation baseline.
    ///
    /// # Errors
    /// - `OnlyManager` if `caller` is not the manager
    /// - `InvalidTradingParams` for zero liquidity or an out-of-range price
    pub fn enable_trading(&mut self, caller: Address, params: &TradingParams) -> Result<ParamsHash> {
        self.only_manager(caller)?;
        params.validate()?;

        let hash = params.hash();
        let (balance0, balance1) = self.observe_balances();
        self.state = AmmState {
            trading_params_hash: hash,
            last_sqrt_price_x96: params.sqrt_price_deposit_x96,
            last_liquidity: params.liquidity,
            last_balance0: balance0,
            last_balance1: balance1,
        };

        info!(
            params_hash = %hash,
            sqrt_price_x96 = %params.sqrt_price_deposit_x96,
            liquidity = params.liquidity,
            balance0 = %balance0,
            balance1 = %balance1,
            "trading enabled"
        );
        Ok(hash)
    }

    /// Stop all order acceptance. Price and balances are kept for the next
    /// enable to overwrite.
    ///
    /// # Errors
    /// Returns `OnlyManager` if `caller` is not the manager.
    pub fn disable_trading(&mut self, caller: Address) -> Result<()> {
        self.only_manager(caller)?;
        self.state.trading_params_hash = ParamsHash::NO_TRADING;
        info!("trading disabled");
        Ok(())
    }

    // -----------------------------------------------------------------
    // Settlement operations
    // -----------------------------------------------------------------

    /// Record the order this settlement call will trade with the AMM.
    ///
    /// # Errors
    /// Returns `CommitOutsideOfSettlement` unless the caller of `ctx` is the
    /// settlement contract.
    pub fn commit(&self, ctx: &mut CallContext, order_hash: OrderHash) -> Result<()> {
        if ctx.caller() != self.config.settlement {
            return Err(CowCurveError::CommitOutsideOfSettlement {
                caller: ctx.caller(),
            });
        }
        ctx.store_commitment(order_hash);
        debug!(order_hash = %order_hash, "commitment stored");
        Ok(())
    }

    /// Check `params` against the live hash, then run the policy and curve
    /// checks against the current state. Nothing passes while disabled.
    ///
    /// Skips the message hash and commitment; see
    /// [`Self::is_valid_signature`] for the full gateway.
    ///
    /// # Errors
    /// - `TradingParamsDoNotMatchHash` for stale params or while disabled
    /// - otherwise see [`OrderVerifier::verify`]
    pub fn verify(&self, params: &TradingParams, order: &Order, now: u32) -> Result<()> {
        self.require_live_params(params)?;
        OrderVerifier::new(&self.pair, &self.state).verify(params, order, now)
    }

    // -----------------------------------------------------------------
    // Internal
    // -----------------------------------------------------------------

    pub(crate) fn only_manager(&self, caller: Address) -> Result<()> {
        if caller == self.config.manager {
            Ok(())
        } else {
            Err(CowCurveError::OnlyManager { caller })
        }
    }

    pub(crate) fn only_settlement(&self, caller: Address) -> Result<()> {
        if caller == self.config.settlement {
            Ok(())
        } else {
            Err(CowCurveError::OnlySettlement { caller })
        }
    }

    /// Fail unless `params` hash to the live params hash. Always fails while
    /// trading is disabled.
    pub(crate) fn require_live_params(&self, params: &TradingParams) -> Result<ParamsHash> {
        let hash = params.hash();
        if !self.state.is_trading_enabled() || hash != self.state.trading_params_hash {
            return Err(CowCurveError::TradingParamsDoNotMatchHash);
        }
        Ok(hash)
    }

    pub(crate) fn observe_balances(&self) -> (U256, U256) {
        (
            self.balances.balance_of(self.pair.token0),
            self.balances.balance_of(self.pair.token1),
        )
    }

    pub(crate) fn state_mut(&mut self) -> &mut AmmState {
        &mut self.state
    }
}
