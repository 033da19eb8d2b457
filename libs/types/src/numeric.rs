//! Fixed-point score type
//!
//! Uses rust_decimal for deterministic arithmetic so that severity
//! boundaries (4.0, 7.0, 9.0) are compared exactly. Scores are rounded to
//! one decimal place, half away from zero.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A CVSS score in [0.0, 10.0] with one decimal place
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Score(Decimal);

impl Score {
    pub const ZERO: Score = Score(Decimal::ZERO);

    /// Upper bound of the CVSS scale
    pub fn max() -> Decimal {
        Decimal::TEN
    }

    /// Clamp a raw value into [0, 10] and round it to one decimal place
    pub fn new(raw: Decimal) -> Self {
        let clamped = raw.max(Decimal::ZERO).min(Self::max());
        Self(clamped.round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero))
    }

    pub fn as_decimal(&self) -> Decimal {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }
}

impl From<Decimal> for Score {
    fn from(raw: Decimal) -> Self {
        Self::new(raw)
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn d(s: &str) -> Decimal {
        Decimal::from_str_exact(s).unwrap()
    }

    #[test]
    fn test_rounds_to_one_decimal() {
        assert_eq!(Score::new(d("6.94")).as_decimal(), d("6.9"));
        assert_eq!(Score::new(d("6.96")).as_decimal(), d("7.0"));
    }

    #[test]
    fn test_midpoint_rounds_away_from_zero() {
        assert_eq!(Score::new(d("3.95")).as_decimal(), d("4.0"));
        assert_eq!(Score::new(d("0.05")).as_decimal(), d("0.1"));
    }

    #[test]
    fn test_clamps_to_scale() {
        assert_eq!(Score::new(d("12.3")).as_decimal(), Decimal::TEN);
        assert_eq!(Score::new(d("-0.4")), Score::ZERO);
    }

    #[test]
    fn test_display_always_has_one_decimal() {
        assert_eq!(Score::new(Decimal::from(9)).to_string(), "9.0");
        assert_eq!(Score::new(d("8.75")).to_string(), "8.8");
    }

    #[test]
    fn test_serializes_as_string() {
        let json = serde_json::to_string(&Score::new(d("5.3"))).unwrap();
        assert_eq!(json, "\"5.3\"");
    }

    proptest! {
        #[test]
        fn score_stays_on_scale_with_one_decimal(mantissa in -200_000i64..200_000, scale in 0u32..6) {
            let score = Score::new(Decimal::new(mantissa, scale));
            let value = score.as_decimal();

            prop_assert!(value >= Decimal::ZERO && value <= Decimal::TEN);
            prop_assert_eq!(value.round_dp(1), value);
        }
    }
}
