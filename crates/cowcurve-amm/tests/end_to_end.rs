//! End-to-end integration tests across all three crates.
//!
//! These tests drive the AMM the way a settlement engine does within one
//! call: commit -> isValidSignature -> token transfers -> postHook.
//!
//! They verify that types, curve math and the AMM instance agree: the
//! commitment scenario, disable/enable, policy rejections, price movement,
//! and the tradeable order poller loop.

use cowcurve_amm::{CallContext, CowAmm, InMemoryBalances, Reconciliation};
use cowcurve_math::amount_out_from_amount_in;
use cowcurve_types::constants::{ERC1271_MAGIC_VALUE, Q96, reason};
use cowcurve_types::*;

const NOW: u32 = 1_700_000_000;
const L: u128 = 1_000_000;

/// Helper: one AMM plus the settlement engine driving it.
struct SettlementHarness {
    amm: CowAmm<InMemoryBalances>,
    params: TradingParams,
}

impl SettlementHarness {
    fn new(min_traded_token0: u64) -> Self {
        init_tracing();
        let config = AmmConfig::dummy();
        let mut balances = InMemoryBalances::new();
        balances.credit(config.token0, U256::from(L)).unwrap();
        balances.credit(config.token1, U256::from(L)).unwrap();
        let manager = config.manager;

        let mut amm = CowAmm::new(config, balances).expect("config should be valid");
        let mut params = TradingParams::dummy(L);
        params.min_traded_token0 = U256::from(min_traded_token0);
        amm.enable_trading(manager, &params)
            .expect("manager enable should succeed");
        Self { amm, params }
    }

    fn settlement_call(&self) -> CallContext {
        CallContext::new(self.amm.config().settlement, NOW)
    }

    fn order(&self, input: TokenSide, amount_in: u64, amount_out: U256) -> Order {
        let pair = self.amm.pair();
        Order::dummy(
            pair.token(input.other()),
            pair.token(input),
            amount_out,
            U256::from(amount_in),
            NOW + 120,
            self.params.app_data,
        )
    }

    fn message_hash(&self, order: &Order) -> B256 {
        order.hash(self.amm.config().domain_separator).0
    }

    fn signature(&self, order: &Order) -> Vec<u8> {
        encode_signature(order, &self.params)
    }

    /// Ask the AMM whether it signed `order` within `ctx`.
    fn check(&self, ctx: &CallContext, order: &Order) -> Result<[u8; 4]> {
        self.amm
            .is_valid_signature(ctx, self.message_hash(order), &self.signature(order))
    }

    /// Move the tokens of a settled order: the AMM receives `buy_amount` of
    /// `buy_token` and pays `sell_amount` of `sell_token`.
    fn transfer(&mut self, order: &Order) {
        let ledger = self.amm.balances_mut();
        ledger.credit(order.buy_token, order.buy_amount).unwrap();
        ledger.debit(order.sell_token, order.sell_amount).unwrap();
    }

    /// Full settlement of one order in one call.
    fn settle(&mut self, order: &Order) -> Result<Reconciliation> {
        let mut ctx = self.settlement_call();
        self.amm.commit(&mut ctx, OrderHash(self.message_hash(order)))?;
        self.check(&ctx, order)?;
        self.transfer(order);
        self.amm.post_hook(&ctx, &self.params)
    }
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

// =============================================================================
// Test: Commitment gates the call to exactly one order
// =============================================================================
#[test]
fn e2e_commitment_scenario() {
    let harness = SettlementHarness::new(0);
    let committed = harness.order(TokenSide::Token1, 500, U256::from(499u64));
    let other = harness.order(TokenSide::Token1, 400, U256::from(300u64));

    // No commit: any valid order passes.
    let free_call = harness.settlement_call();
    assert_eq!(harness.check(&free_call, &committed).unwrap(), ERC1271_MAGIC_VALUE);
    assert_eq!(harness.check(&free_call, &other).unwrap(), ERC1271_MAGIC_VALUE);

    // Commit: only the committed order passes.
    let mut ctx = harness.settlement_call();
    harness
        .amm
        .commit(&mut ctx, OrderHash(harness.message_hash(&committed)))
        .unwrap();
    assert_eq!(harness.check(&ctx, &committed).unwrap(), ERC1271_MAGIC_VALUE);
    let err = harness.check(&ctx, &other).unwrap_err();
    assert_eq!(err, CowCurveError::OrderDoesNotMatchCommitmentHash);
    assert_eq!(err.category(), ErrorCategory::CommitmentMismatch);

    // Next call starts clean.
    drop(ctx);
    let next_call = harness.settlement_call();
    assert!(harness.check(&next_call, &other).is_ok());
}

// =============================================================================
// Test: Only settlement may commit or reconcile; only the manager may toggle
// =============================================================================
#[test]
fn e2e_authorization() {
    let mut harness = SettlementHarness::new(0);
    let intruder = Address::repeat_byte(0x01);
    let mut ctx = CallContext::new(intruder, NOW);

    let err = harness
        .amm
        .commit(&mut ctx, OrderHash(B256::repeat_byte(0x42)))
        .unwrap_err();
    assert_eq!(err.category(), ErrorCategory::Authorization);

    let err = harness.amm.post_hook(&ctx, &harness.params).unwrap_err();
    assert_eq!(err, CowCurveError::OnlySettlement { caller: intruder });

    let err = harness.amm.disable_trading(intruder).unwrap_err();
    assert_eq!(err, CowCurveError::OnlyManager { caller: intruder });
    assert!(harness.amm.is_trading_enabled());
}

// =============================================================================
// Test: Disable stops every order; re-enable restores trading
// =============================================================================
#[test]
fn e2e_disable_then_enable() {
    let mut harness = SettlementHarness::new(0);
    let order = harness.order(TokenSide::Token0, 500, U256::from(499u64));
    let manager = harness.amm.config().manager;

    harness.amm.disable_trading(manager).unwrap();
    let err = harness.check(&harness.settlement_call(), &order).unwrap_err();
    assert_eq!(err, CowCurveError::TradingParamsDoNotMatchHash);
    assert_eq!(err.category(), ErrorCategory::StaleOrBadConfig);

    harness.amm.enable_trading(manager, &harness.params).unwrap();
    assert!(harness.check(&harness.settlement_call(), &order).is_ok());
}

// =============================================================================
// Test: Policy rejections surface through the gateway
// =============================================================================
#[test]
fn e2e_policy_rejections() {
    let harness = SettlementHarness::new(1000);
    let ctx = harness.settlement_call();

    let mut with_fee = harness.order(TokenSide::Token1, 2000, U256::from(1000u64));
    with_fee.fee_amount = U256::from(1u8);
    assert_eq!(
        harness.check(&ctx, &with_fee).unwrap_err(),
        CowCurveError::order_not_valid(reason::FEE_NOT_ZERO)
    );

    // AMM pays 1000 token0: exactly the minimum.
    let at_minimum = harness.order(TokenSide::Token1, 2000, U256::from(1000u64));
    assert!(harness.check(&ctx, &at_minimum).is_ok());

    let below_minimum = harness.order(TokenSide::Token1, 2000, U256::from(999u64));
    assert_eq!(
        harness.check(&ctx, &below_minimum).unwrap_err(),
        CowCurveError::order_not_valid(reason::TRADED_TOO_SMALL)
    );

    let greedy = harness.order(TokenSide::Token1, 500, U256::from(500u64));
    assert_eq!(
        harness.check(&ctx, &greedy).unwrap_err(),
        CowCurveError::order_not_valid(reason::RECEIVED_TOO_LOW)
    );
}

// =============================================================================
// Test: A settled trade moves the price and the next order is priced from it
// =============================================================================
#[test]
fn e2e_settlement_moves_price() {
    let mut harness = SettlementHarness::new(0);
    let paid = amount_out_from_amount_in(Q96, L, U256::from(5000u64), TokenSide::Token0).unwrap();
    let first = harness.order(TokenSide::Token0, 5000, paid);

    let outcome = harness.settle(&first).unwrap();
    assert_eq!(
        outcome,
        Reconciliation::Traded {
            input: TokenSide::Token0,
            amount_in: U256::from(5000u64),
        }
    );
    let state = harness.amm.state().clone();
    assert!(state.last_sqrt_price_x96 < Q96);
    assert_eq!(state.last_balance0, U256::from(L + 5000));
    assert_eq!(state.last_balance1, U256::from(L) - paid);

    // Same input again now pays less: token0 got cheaper.
    let out = amount_out_from_amount_in(
        state.last_sqrt_price_x96,
        state.last_liquidity,
        U256::from(5000u64),
        TokenSide::Token0,
    )
    .unwrap();
    assert!(out < paid);
    let stale = harness.order(TokenSide::Token0, 5000, paid);
    assert!(harness.check(&harness.settlement_call(), &stale).is_err());
    let fresh = harness.order(TokenSide::Token0, 5000, out);
    harness.settle(&fresh).unwrap();
}

// =============================================================================
// Test: Round trip back to the deposit price never loses the pool money
// =============================================================================
#[test]
fn e2e_round_trip_favours_pool() {
    let mut harness = SettlementHarness::new(0);
    let down = harness
        .amm
        .tradeable_order(&harness.params, Q96 - Q96 / U256::from(100u8), NOW)
        .unwrap();
    harness.settle(&down).unwrap();

    let up = harness
        .amm
        .tradeable_order(&harness.params, Q96, NOW)
        .unwrap();
    harness.settle(&up).unwrap();

    let state = harness.amm.state();
    assert!(state.last_sqrt_price_x96 >= Q96);
    assert!(state.last_balance0 >= U256::from(L));
    assert!(state.last_balance1 >= U256::from(L));
}

// =============================================================================
// Test: Poller loop with retry signal
// =============================================================================
#[test]
fn e2e_tradeable_order_and_retry() {
    let mut harness = SettlementHarness::new(0);
    let target = Q96 + Q96 / U256::from(20u8);

    let order = harness.amm.tradeable_order(&harness.params, target, NOW).unwrap();
    assert_eq!(harness.check(&harness.settlement_call(), &order).unwrap(), ERC1271_MAGIC_VALUE);

    // Drain token0 from the pool out of band: the same target is now unreachable.
    let token0 = harness.amm.pair().token0;
    harness.amm.balances_mut().debit(token0, U256::from(L - 10)).unwrap();
    let err = harness.amm.tradeable_order(&harness.params, target, NOW).unwrap_err();
    assert!(err.is_retry_later());
}

// =============================================================================
// Test: Ambiguous balance deltas leave state untouched
// =============================================================================
#[test]
fn e2e_ambiguous_post_hook() {
    let mut harness = SettlementHarness::new(0);
    let before = harness.amm.state().clone();
    let pair = *harness.amm.pair();
    harness.amm.balances_mut().credit(pair.token0, U256::from(5u8)).unwrap();
    harness.amm.balances_mut().credit(pair.token1, U256::from(5u8)).unwrap();

    let ctx = harness.settlement_call();
    let err = harness.amm.post_hook(&ctx, &harness.params).unwrap_err();
    assert_eq!(err, CowCurveError::AmbiguousBalanceDelta);
    assert_eq!(harness.amm.state(), &before);
}

// =============================================================================
// Test: Config from JSON drives a working AMM
// =============================================================================
#[test]
fn e2e_config_from_json() {
    let json = serde_json::to_string(&AmmConfig::dummy()).unwrap();
    let config = AmmConfig::from_json(&json).unwrap();
    let amm = CowAmm::new(config, InMemoryBalances::new()).unwrap();
    assert!(!amm.is_trading_enabled());
    assert!(amm.trading_params_hash().is_no_trading());
}
