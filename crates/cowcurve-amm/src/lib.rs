//! # cowcurve-amm
//!
//! **The CowCurve AMM instance**: a constant-product pool that trades only
//! through a batch-auction settlement engine, by authorizing orders as a
//! contract signer.
//!
//! ## Architecture
//!
//! One settlement call drives the AMM through three entry points, all on
//! [`CowAmm`] and all sharing one [`CallContext`]:
//! 1. [`CowAmm::commit`] pins the single order the AMM trades in this call
//! 2. [`CowAmm::is_valid_signature`] checks params, order hash, commitment,
//!    then the policy and curve rules of [`OrderVerifier`]
//! 3. [`CowAmm::post_hook`] reads the balances the engine left behind and
//!    advances the live price
//!
//! The manager enables and disables trading with
//! [`CowAmm::enable_trading`] / [`CowAmm::disable_trading`]. Off-chain
//! pollers use [`CowAmm::tradeable_order`] to build an order that moves the
//! price to a target.
//!
//! The AMM never moves tokens. It reads them through [`TokenBalances`].

pub mod amm;
pub mod balances;
pub mod context;
pub mod gateway;
pub mod reconciler;
pub mod tradeable;
pub mod verifier;

pub use amm::CowAmm;
pub use balances::{InMemoryBalances, TokenBalances};
pub use context::CallContext;
pub use reconciler::Reconciliation;
pub use verifier::OrderVerifier;
