//! Settlement configuration: decimal scale, rounding and tolerance

use bigdecimal::{BigDecimal, RoundingMode};
use serde::{Deserialize, Serialize};

use crate::types::*;

/// How balances and transfer amounts are rounded to the configured scale
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoundingPolicy {
    /// Round half away from zero (0.005 -> 0.01, -0.005 -> -0.01)
    #[default]
    HalfAwayFromZero,
    /// Round half to the nearest even digit (banker's rounding)
    HalfEven,
}

impl RoundingPolicy {
    fn mode(self) -> RoundingMode {
        match self {
            RoundingPolicy::HalfAwayFromZero => RoundingMode::HalfUp,
            RoundingPolicy::HalfEven => RoundingMode::HalfEven,
        }
    }
}

/// Parameters shared by the aggregator and the minimizer
///
/// Missing fields fall back to the defaults when deserialized, so a partial
/// document such as `{"rounding": "half_even"}` is accepted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SettlementConfig {
    /// Number of decimal places amounts are rounded to
    pub scale: i64,
    /// Rounding rule applied at `scale`
    pub rounding: RoundingPolicy,
    /// Balances with an absolute value at or below this are settled
    pub epsilon: BigDecimal,
}

impl Default for SettlementConfig {
    fn default() -> Self {
        Self {
            scale: 2,
            rounding: RoundingPolicy::HalfAwayFromZero,
            epsilon: BigDecimal::new(1.into(), 2),
        }
    }
}

impl SettlementConfig {
    /// Create the default configuration (2 decimals, half away from zero, 0.01)
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the decimal scale
    pub fn with_scale(mut self, scale: i64) -> Self {
        self.scale = scale;
        self
    }

    /// Set the rounding policy
    pub fn with_rounding(mut self, rounding: RoundingPolicy) -> Self {
        self.rounding = rounding;
        self
    }

    /// Set the settlement tolerance
    pub fn with_epsilon(mut self, epsilon: BigDecimal) -> Self {
        self.epsilon = epsilon;
        self
    }

    /// Round a value to the configured scale
    pub fn round(&self, value: &BigDecimal) -> BigDecimal {
        value.with_scale_round(self.scale, self.rounding.mode())
    }

    /// Largest error a single rounding step can introduce
    pub fn half_unit(&self) -> BigDecimal {
        BigDecimal::new(5.into(), self.scale + 1)
    }

    /// Check that the configuration is usable
    pub fn validate(&self) -> SplitResult<()> {
        if !(0..=18).contains(&self.scale) {
            return Err(SplitError::Validation(format!(
                "Scale must be between 0 and 18, got {}",
                self.scale
            )));
        }

        if self.epsilon < BigDecimal::from(0) {
            return Err(SplitError::Validation(
                "Epsilon cannot be negative".to_string(),
            ));
        }

        Ok(())
    }
}
