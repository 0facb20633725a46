//! Per-call context and the commitment slot.
//!
//! A [`CallContext`] lives for exactly one top-level settlement invocation.
//! The host creates it when the call starts and drops it when the call
//! returns, so a commitment written during one batch is invisible to the next.
//! The commitment is never part of the persisted [`cowcurve_types::AmmState`].

use alloy_primitives::Address;
use chrono::Utc;
use cowcurve_types::{CowCurveError, EMPTY_COMMITMENT, OrderHash, Result};

/// Caller identity, block time and the commitment slot of one call.
#[derive(Debug)]
pub struct CallContext {
    caller: Address,
    /// Unix seconds.
    timestamp: u32,
    commitment: OrderHash,
}

impl CallContext {
    /// Start a call at the given timestamp with an empty commitment.
    #[must_use]
    pub fn new(caller: Address, timestamp: u32) -> Self {
        Self {
            caller,
            timestamp,
            commitment: EMPTY_COMMITMENT,
        }
    }

    /// Start a call at the current wall-clock time.
    ///
    /// # Errors
    /// Returns [`CowCurveError::ArithmeticFault`] if the clock is before the
    /// Unix epoch or past the `u32` range.
    pub fn now(caller: Address) -> Result<Self> {
        let timestamp = u32::try_from(Utc::now().timestamp())
            .map_err(|_| CowCurveError::arithmetic("timestamp outside u32 range"))?;
        Ok(Self::new(caller, timestamp))
    }

    #[must_use]
    pub fn caller(&self) -> Address {
        self.caller
    }

    #[must_use]
    pub fn timestamp(&self) -> u32 {
        self.timestamp
    }

    /// The committed order hash, or [`EMPTY_COMMITMENT`] if none this call.
    #[must_use]
    pub fn commitment(&self) -> OrderHash {
        self.commitment
    }

    /// Overwrite the slot. Authorization is the AMM's job, see
    /// [`crate::CowAmm::commit`].
    pub(crate) fn store_commitment(&mut self, order_hash: OrderHash) {
        self.commitment = order_hash;
    }

    /// Fail unless `candidate` is the committed order or nothing is committed.
    ///
    /// # Errors
    /// Returns [`CowCurveError::OrderDoesNotMatchCommitmentHash`].
    pub fn require_matching_commitment(&self, candidate: OrderHash) -> Result<()> {
        if self.commitment.is_empty() || self.commitment == candidate {
            Ok(())
        } else {
            Err(CowCurveError::OrderDoesNotMatchCommitmentHash)
        }
    }
}
