//! Contract-signature entry point.
//!
//! The settlement engine asks the AMM whether it "signed" an order by passing
//! the EIP-712 order hash and a payload carrying the order and the trading
//! params. The AMM answers with the magic value or an error.

use alloy_primitives::B256;
use cowcurve_types::constants::ERC1271_MAGIC_VALUE;
use cowcurve_types::{CowCurveError, Order, OrderHash, Result, decode_signature};
use tracing::{debug, warn};

use crate::amm::CowAmm;
use crate::balances::TokenBalances;
use crate::context::CallContext;
use crate::verifier::OrderVerifier;

impl<B: TokenBalances> CowAmm<B> {
    /// Authorize `message_hash` as an AMM order.
    ///
    /// Steps, first failure wins:
    /// 1. Decode the payload into an order and params
    /// 2. Params hash to the live params hash
    /// 3. Order hashes to `message_hash` under the configured domain
    /// 4. Order matches the commitment of this call, if one is set
    /// 5. Order passes the policy and curve checks at `ctx.timestamp()`
    ///
    /// Anyone may call this; it never writes state.
    ///
    /// # Errors
    /// - `Serialization` for a malformed payload
    /// - `TradingParamsDoNotMatchHash` for stale params or while disabled
    /// - `OrderDoesNotMatchMessageHash`
    /// - `OrderDoesNotMatchCommitmentHash`
    /// - anything [`crate::OrderVerifier::verify`] returns
    pub fn is_valid_signature(
        &self,
        ctx: &CallContext,
        message_hash: B256,
        signature: &[u8],
    ) -> Result<[u8; 4]> {
        match self.authorize(ctx, OrderHash(message_hash), signature) {
            Ok(order) => {
                debug!(order = %order, message_hash = %message_hash, "order authorized");
                Ok(ERC1271_MAGIC_VALUE)
            }
            Err(e) => {
                warn!(
                    message_hash = %message_hash,
                    category = %e.category(),
                    error = %e,
                    "order rejected"
                );
                Err(e)
            }
        }
    }

    fn authorize(&self, ctx: &CallContext, message_hash: OrderHash, signature: &[u8]) -> Result<Order> {
        let (order, params) = decode_signature(signature)?;
        self.require_live_params(&params)?;
        if order.hash(self.config().domain_separator) != message_hash {
            return Err(CowCurveError::OrderDoesNotMatchMessageHash);
        }
        ctx.require_matching_commitment(message_hash)?;
        OrderVerifier::new(self.pair(), self.state()).verify(&params, &order, ctx.timestamp())?;
        Ok(order)
    }
}
