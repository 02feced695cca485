//! Oracle score results and the two policies for missing scores.

use serde::{Deserialize, Serialize};

/// Outcome of scoring one configuration: a numeric score, or an explicit
/// marker that the oracle failed to answer.
///
/// Serializes as a nullable number. The two ways an `Unknown` flows through
/// the system are deliberately distinct: the annealer never accepts one as
/// an improvement, while cross-scenario aggregation coerces it to zero.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "Option<f64>", into = "Option<f64>")]
pub enum ScoreResult {
    Known(f64),
    Unknown,
}

impl ScoreResult {
    pub fn is_known(&self) -> bool {
        matches!(self, Self::Known(_))
    }

    pub fn known(&self) -> Option<f64> {
        match self {
            Self::Known(v) => Some(*v),
            Self::Unknown => None,
        }
    }

    /// Reporting-time policy: a missing score counts as zero.
    pub fn or_zero(&self) -> f64 {
        self.known().unwrap_or(0.0)
    }

    /// Search-time policy: a known score beats `Unknown`, a known score
    /// beats a strictly lower known score, and `Unknown` never improves
    /// on anything.
    pub fn improves_on(&self, other: &ScoreResult) -> bool {
        match (self, other) {
            (Self::Known(a), Self::Known(b)) => a > b,
            (Self::Known(_), Self::Unknown) => true,
            (Self::Unknown, _) => false,
        }
    }
}

impl From<Option<f64>> for ScoreResult {
    fn from(value: Option<f64>) -> Self {
        match value {
            Some(v) => Self::Known(v),
            None => Self::Unknown,
        }
    }
}

impl From<ScoreResult> for Option<f64> {
    fn from(value: ScoreResult) -> Self {
        value.known()
    }
}

impl std::fmt::Display for ScoreResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Known(v) => write!(f, "{v}"),
            Self::Unknown => write!(f, "unknown"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn improvement_ordering() {
        assert!(ScoreResult::Known(2.0).improves_on(&ScoreResult::Known(1.0)));
        assert!(!ScoreResult::Known(1.0).improves_on(&ScoreResult::Known(1.0)));
        assert!(ScoreResult::Known(-5.0).improves_on(&ScoreResult::Unknown));
        assert!(!ScoreResult::Unknown.improves_on(&ScoreResult::Known(-5.0)));
        assert!(!ScoreResult::Unknown.improves_on(&ScoreResult::Unknown));
    }

    #[test]
    fn unknown_coerces_to_zero() {
        assert_eq!(ScoreResult::Unknown.or_zero(), 0.0);
        assert_eq!(ScoreResult::Known(41.0).or_zero(), 41.0);
    }

    #[test]
    fn serde_round_trips_as_nullable_number() {
        let known: ScoreResult = serde_json::from_str("41.5").unwrap();
        assert_eq!(known, ScoreResult::Known(41.5));
        let unknown: ScoreResult = serde_json::from_str("null").unwrap();
        assert_eq!(unknown, ScoreResult::Unknown);
        assert_eq!(serde_json::to_string(&unknown).unwrap(), "null");
    }
}
