//! Grip utilization classifier
//!
//! Maps the evaluator's grip utilization onto an ordered advisory tier.
//! Thresholds are strict `>` comparisons checked highest first, so a
//! value sitting exactly on a boundary falls into the tier below it.

use crate::units::Percent;
use serde::{Deserialize, Serialize};

/// Utilization above which the driver is beyond the traction circle
pub const DANGER_THRESHOLD_PCT: f64 = 95.0;
pub const AGGRESSIVE_THRESHOLD_PCT: f64 = 85.0;
pub const BALANCED_THRESHOLD_PCT: f64 = 70.0;

/// Advisory tier for a driving state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Tier {
    /// Can push harder
    Conservative,
    Balanced,
    Aggressive,
    /// Exceeding grip limits
    Danger,
    /// Grip utilization could not be computed (non-finite, or no effective grip)
    Undefined,
}

impl Tier {
    /// How close to the limit this tier sits, for colouring.
    ///
    /// `None` for `Undefined`, which is outside the scale.
    pub fn severity(&self) -> Option<u8> {
        match self {
            Tier::Conservative => Some(0),
            Tier::Balanced => Some(1),
            Tier::Aggressive => Some(2),
            Tier::Danger => Some(3),
            Tier::Undefined => None,
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            Tier::Danger => "exceeding grip limits; reduce speed or brake force",
            Tier::Aggressive => "pushing hard, excellent grip utilization",
            Tier::Balanced => "good balance between speed and safety",
            Tier::Conservative => "can push harder; increase entry speed or brake later",
            Tier::Undefined => "invalid configuration; grip utilization is undefined",
        }
    }
}

/// A tier and the advice shown alongside it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub tier: Tier,
    pub message: String,
}

impl From<Tier> for Recommendation {
    fn from(tier: Tier) -> Self {
        Self {
            tier,
            message: tier.message().to_string(),
        }
    }
}

/// Classify a grip utilization percentage
pub fn classify(grip_utilization: Percent) -> Recommendation {
    classify_tier(grip_utilization.0).into()
}

fn classify_tier(pct: f64) -> Tier {
    if !pct.is_finite() {
        Tier::Undefined
    } else if pct > DANGER_THRESHOLD_PCT {
        Tier::Danger
    } else if pct > AGGRESSIVE_THRESHOLD_PCT {
        Tier::Aggressive
    } else if pct > BALANCED_THRESHOLD_PCT {
        Tier::Balanced
    } else {
        Tier::Conservative
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tier(pct: f64) -> Tier {
        classify(Percent(pct)).tier
    }

    #[test]
    fn test_danger_boundary_is_exclusive() {
        assert_eq!(tier(95.0), Tier::Aggressive);
        assert_eq!(tier(95.0001), Tier::Danger);
    }

    #[test]
    fn test_aggressive_boundary_is_exclusive() {
        assert_eq!(tier(85.0), Tier::Balanced);
        assert_eq!(tier(85.0001), Tier::Aggressive);
    }

    #[test]
    fn test_balanced_boundary_is_exclusive() {
        assert_eq!(tier(70.0), Tier::Conservative);
        assert_eq!(tier(70.0001), Tier::Balanced);
    }

    #[test]
    fn test_extremes() {
        assert_eq!(tier(0.0), Tier::Conservative);
        assert_eq!(tier(-15.0), Tier::Conservative);
        assert_eq!(tier(227.2), Tier::Danger);
        assert_eq!(tier(1.0e9), Tier::Danger);
    }

    #[test]
    fn test_non_finite_is_undefined() {
        assert_eq!(tier(f64::NAN), Tier::Undefined);
        assert_eq!(tier(f64::INFINITY), Tier::Undefined);
        assert_eq!(tier(f64::NEG_INFINITY), Tier::Undefined);
    }

    #[test]
    fn test_messages() {
        let rec = classify(Percent(99.0));
        assert_eq!(rec.message, "exceeding grip limits; reduce speed or brake force");

        let rec = classify(Percent(50.0));
        assert_eq!(
            rec.message,
            "can push harder; increase entry speed or brake later"
        );
    }

    #[test]
    fn test_severity_orders_defined_tiers() {
        let tiers = [Tier::Conservative, Tier::Balanced, Tier::Aggressive, Tier::Danger];
        for pair in tiers.windows(2) {
            assert!(pair[0].severity() < pair[1].severity());
        }
        assert_eq!(Tier::Undefined.severity(), None);
    }

    #[test]
    fn test_tier_serialization() {
        let json = serde_json::to_string(&Tier::Aggressive).unwrap();
        assert_eq!(json, "\"Aggressive\"");

        let back: Tier = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Tier::Aggressive);
    }
}
