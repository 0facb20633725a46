//! Construction-time configuration of an AMM instance.

use alloy_primitives::{Address, B256};
use serde::{Deserialize, Serialize};

use crate::{CowCurveError, Result, TokenPair};

/// Immutable identities fixed when the AMM is deployed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AmmConfig {
    pub token0: Address,
    pub token1: Address,
    /// Sole caller of `enable_trading` / `disable_trading`.
    pub manager: Address,
    /// Sole caller of `commit` / `post_hook`.
    pub settlement: Address,
    /// EIP-712 domain separator of the settlement deployment.
    pub domain_separator: B256,
}

impl AmmConfig {
    /// Parse and validate a JSON config.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| CowCurveError::Configuration(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject zero identities and a degenerate token pair.
    pub fn validate(&self) -> Result<()> {
        for (name, addr) in [
            ("token0", self.token0),
            ("token1", self.token1),
            ("manager", self.manager),
            ("settlement", self.settlement),
        ] {
            if addr == Address::ZERO {
                return Err(CowCurveError::Configuration(format!(
                    "{name} must not be the zero address"
                )));
            }
        }
        if self.token0 == self.token1 {
            return Err(CowCurveError::Configuration(
                "token0 and token1 must differ".into(),
            ));
        }
        Ok(())
    }

    #[must_use]
    pub fn pair(&self) -> TokenPair {
        TokenPair::new(self.token0, self.token1)
    }
}

/// Test helpers.
#[cfg(any(test, feature = "test-helpers"))]
impl AmmConfig {
    /// Fixed, distinct identities.
    pub fn dummy() -> Self {
        Self {
            token0: Address::repeat_byte(0x10),
            token1: Address::repeat_byte(0x11),
            manager: Address::repeat_byte(0xaa),
            settlement: Address::repeat_byte(0x5e),
            domain_separator: B256::repeat_byte(0xd0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dummy_is_valid() {
        assert!(AmmConfig::dummy().validate().is_ok());
    }

    #[test]
    fn identical_tokens_rejected() {
        let mut cfg = AmmConfig::dummy();
        cfg.token1 = cfg.token0;
        let err = cfg.validate().unwrap_err();
        assert!(matches!(err, CowCurveError::Configuration(_)));
    }

    #[test]
    fn zero_settlement_rejected() {
        let mut cfg = AmmConfig::dummy();
        cfg.settlement = Address::ZERO;
        let err = cfg.validate().unwrap_err();
        assert!(format!("{err}").contains("settlement"));
    }

    #[test]
    fn json_roundtrip() {
        let cfg = AmmConfig::dummy();
        let json = serde_json::to_string(&cfg).unwrap();
        let back = AmmConfig::from_json(&json).unwrap();
        assert_eq!(cfg, back);
    }

    #[test]
    fn malformed_json_is_configuration_error() {
        let err = AmmConfig::from_json("{\"token0\": 1}").unwrap_err();
        assert!(matches!(err, CowCurveError::Configuration(_)));
    }

    #[test]
    fn pair_uses_configured_tokens() {
        let cfg = AmmConfig::dummy();
        let pair = cfg.pair();
        assert_eq!(pair.token0, cfg.token0);
        assert_eq!(pair.token1, cfg.token1);
    }
}
