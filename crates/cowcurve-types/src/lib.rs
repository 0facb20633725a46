//! # cowcurve-types
//!
//! Shared types, errors, and configuration for the **CowCurve** AMM.
//!
//! This crate is the leaf dependency of the workspace. It defines:
//!
//! - **Identifiers**: [`OrderHash`], [`ParamsHash`], [`TokenPair`], [`TokenSide`]
//! - **Order model**: [`Order`], [`OrderKind`], [`TokenBalance`]
//! - **Trading params**: [`TradingParams`] (content-addressed configuration)
//! - **State**: [`AmmState`]
//! - **Configuration**: [`AmmConfig`]
//! - **Codec**: canonical word encoding ([`abi`]) and the signature payload ([`codec`])
//! - **Errors**: [`CowCurveError`] with `CC_ERR_` prefix codes
//! - **Constants**: system-wide limits and sentinels

pub mod abi;
pub mod codec;
pub mod config;
pub mod constants;
pub mod error;
pub mod ids;
pub mod order;
pub mod params;
pub mod state;

pub use alloy_primitives::{Address, B256, U256};

pub use codec::{decode_signature, encode_signature};
pub use config::*;
pub use error::*;
pub use ids::*;
pub use order::*;
pub use params::*;
pub use state::*;

// Constants are accessed via `cowcurve_types::constants::FOO`
// (not re-exported to avoid name collisions).
