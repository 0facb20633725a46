//! Error types for the CowCurve AMM.
//!
//! All errors use the `CC_ERR_` prefix convention for easy grepping in logs.
//! Error codes are grouped by subsystem:
//! - 1xx: Authorization errors
//! - 2xx: Configuration / trading params errors
//! - 3xx: Order errors
//! - 4xx: Commitment errors
//! - 5xx: Arithmetic errors
//! - 9xx: General / internal errors

use std::fmt;

use alloy_primitives::Address;
use thiserror::Error;

/// Central error enum for all CowCurve operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CowCurveError {
    // =================================================================
    // Authorization Errors (1xx)
    // =================================================================
    /// `commit` was called by someone other than the settlement contract.
    #[error("CC_ERR_100: Commit outside of settlement (caller {caller})")]
    CommitOutsideOfSettlement { caller: Address },

    /// A settlement-only entry point was called by another address.
    #[error("CC_ERR_101: Only settlement may call this (caller {caller})")]
    OnlySettlement { caller: Address },

    /// A manager-only entry point was called by another address.
    #[error("CC_ERR_102: Only the manager may call this (caller {caller})")]
    OnlyManager { caller: Address },

    // =================================================================
    // Configuration / Params Errors (2xx)
    // =================================================================
    /// The supplied trading params do not hash to the stored hash. Also
    /// returned when trading is disabled.
    #[error("CC_ERR_200: Trading params do not match stored hash")]
    TradingParamsDoNotMatchHash,

    /// The trading params cannot be enabled.
    #[error("CC_ERR_201: Invalid trading params: {reason}")]
    InvalidTradingParams { reason: String },

    /// Configuration error (bad config file, missing fields, etc.).
    #[error("CC_ERR_202: Configuration error: {0}")]
    Configuration(String),

    // =================================================================
    // Order Errors (3xx)
    // =================================================================
    /// The order failed a policy or curve check.
    #[error("CC_ERR_300: Order not valid: {reason}")]
    OrderNotValid { reason: String },

    /// The order does not hash to the message hash being verified.
    #[error("CC_ERR_301: Order does not match message hash")]
    OrderDoesNotMatchMessageHash,

    /// A token that is neither token0 nor token1 of this AMM.
    #[error("CC_ERR_302: Invalid token: {0}")]
    InvalidToken(Address),

    // =================================================================
    // Commitment Errors (4xx)
    // =================================================================
    /// A commitment is set and the candidate order is not the committed one.
    #[error("CC_ERR_400: Order does not match commitment hash")]
    OrderDoesNotMatchCommitmentHash,

    // =================================================================
    // Arithmetic Errors (5xx)
    // =================================================================
    /// Would-be overflow, underflow or division by zero.
    #[error("CC_ERR_500: Arithmetic fault: {reason}")]
    ArithmeticFault { reason: String },

    /// Both token balances increased since the last snapshot.
    #[error("CC_ERR_501: Ambiguous balance delta: both token balances increased")]
    AmbiguousBalanceDelta,

    /// A balance decrease would go negative. The caller should try again
    /// after the next state update.
    #[error("CC_ERR_502: Try again later: {reason}")]
    PollTryLater { reason: String },

    // =================================================================
    // General / Internal (9xx)
    // =================================================================
    /// Serialization / deserialization error.
    #[error("CC_ERR_900: Serialization error: {0}")]
    Serialization(String),
}

/// Coarse failure classes reported to callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    Authorization,
    StaleOrBadConfig,
    OrderRejected,
    CommitmentMismatch,
    ArithmeticFault,
    Malformed,
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Authorization => write!(f, "AUTHORIZATION"),
            Self::StaleOrBadConfig => write!(f, "STALE_OR_BAD_CONFIG"),
            Self::OrderRejected => write!(f, "ORDER_REJECTED"),
            Self::CommitmentMismatch => write!(f, "COMMITMENT_MISMATCH"),
            Self::ArithmeticFault => write!(f, "ARITHMETIC_FAULT"),
            Self::Malformed => write!(f, "MALFORMED"),
        }
    }
}

impl CowCurveError {
    /// Shorthand for an [`CowCurveError::OrderNotValid`] with a static reason.
    #[must_use]
    pub fn order_not_valid(reason: &str) -> Self {
        Self::OrderNotValid {
            reason: reason.to_string(),
        }
    }

    /// Shorthand for an [`CowCurveError::ArithmeticFault`].
    #[must_use]
    pub fn arithmetic(reason: &str) -> Self {
        Self::ArithmeticFault {
            reason: reason.to_string(),
        }
    }

    /// The failure class of this error.
    #[must_use]
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::CommitOutsideOfSettlement { .. }
            | Self::OnlySettlement { .. }
            | Self::OnlyManager { .. } => ErrorCategory::Authorization,
            Self::TradingParamsDoNotMatchHash
            | Self::InvalidTradingParams { .. }
            | Self::Configuration(_) => ErrorCategory::StaleOrBadConfig,
            Self::OrderNotValid { .. }
            | Self::OrderDoesNotMatchMessageHash
            | Self::InvalidToken(_) => ErrorCategory::OrderRejected,
            Self::OrderDoesNotMatchCommitmentHash => ErrorCategory::CommitmentMismatch,
            Self::ArithmeticFault { .. }
            | Self::AmbiguousBalanceDelta
            | Self::PollTryLater { .. } => ErrorCategory::ArithmeticFault,
            Self::Serialization(_) => ErrorCategory::Malformed,
        }
    }

    /// Whether an off-chain poller should re-check after the next state
    /// update instead of giving up.
    #[must_use]
    pub fn is_retry_later(&self) -> bool {
        matches!(self, Self::PollTryLater { .. })
    }
}

/// Crate-wide `Result` alias.
pub type Result<T> = std::result::Result<T, CowCurveError>;
