//! Scenario identifiers and aggregation weights.

use serde::{Deserialize, Serialize};

use crate::{TunerError, TunerResult};

/// Identifier for one independent oracle scenario (a year in the original
/// bracket-scoring deployment).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ScenarioId(pub String);

impl ScenarioId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ScenarioId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ScenarioId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// A scenario plus the weight it carries during cross-scenario aggregation.
/// The weight plays no role during search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    pub id: ScenarioId,
    pub weight: f64,
}

impl Scenario {
    pub fn new(id: impl Into<ScenarioId>, weight: f64) -> Self {
        Self {
            id: id.into(),
            weight,
        }
    }
}

impl From<String> for ScenarioId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// The full set of scenarios a sweep runs against.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioSet {
    scenarios: Vec<Scenario>,
}

impl ScenarioSet {
    /// Weights must be finite and non-negative.
    pub fn new(scenarios: Vec<Scenario>) -> TunerResult<Self> {
        if scenarios.is_empty() {
            return Err(TunerError::Config("scenario set is empty".into()));
        }
        for s in &scenarios {
            if !s.weight.is_finite() || s.weight < 0.0 {
                return Err(TunerError::Config(format!(
                    "scenario {} has invalid weight {}",
                    s.id, s.weight
                )));
            }
        }
        Ok(Self { scenarios })
    }

    /// Builds a set with weights linearly interpolated from `min_weight` at
    /// the smallest identifier to `max_weight` at the largest. Identifiers
    /// sort numerically when they all parse as integers, lexically otherwise.
    pub fn with_linear_weights(
        ids: Vec<ScenarioId>,
        min_weight: f64,
        max_weight: f64,
    ) -> TunerResult<Self> {
        if ids.is_empty() {
            return Err(TunerError::Config("scenario set is empty".into()));
        }

        let mut sorted = ids.clone();
        let all_numeric = sorted.iter().all(|id| id.as_str().parse::<i64>().is_ok());
        if all_numeric {
            sorted.sort_by_key(|id| id.as_str().parse::<i64>().unwrap_or(0));
        } else {
            sorted.sort();
        }

        let last = sorted.len() - 1;
        let rank_of = |id: &ScenarioId| sorted.iter().position(|s| s == id).unwrap_or(0);

        let scenarios = ids
            .into_iter()
            .map(|id| {
                let weight = if last == 0 {
                    max_weight
                } else {
                    let t = rank_of(&id) as f64 / last as f64;
                    min_weight + t * (max_weight - min_weight)
                };
                Scenario { id, weight }
            })
            .collect();

        Self::new(scenarios)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Scenario> {
        self.scenarios.iter()
    }

    pub fn ids(&self) -> impl Iterator<Item = &ScenarioId> {
        self.scenarios.iter().map(|s| &s.id)
    }

    pub fn len(&self) -> usize {
        self.scenarios.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scenarios.is_empty()
    }

    /// Weight for `id`; unknown identifiers carry a neutral weight of 1.
    pub fn weight_of(&self, id: &ScenarioId) -> f64 {
        self.scenarios
            .iter()
            .find(|s| &s.id == id)
            .map(|s| s.weight)
            .unwrap_or(1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn linear_weights_hit_both_endpoints() {
        let ids: Vec<ScenarioId> = ["2024", "2010", "2017"].iter().map(|s| (*s).into()).collect();
        let set = ScenarioSet::with_linear_weights(ids, 0.3, 1.0).unwrap();

        assert!((set.weight_of(&"2010".into()) - 0.3).abs() < 1e-12);
        assert!((set.weight_of(&"2024".into()) - 1.0).abs() < 1e-12);
        assert!((set.weight_of(&"2017".into()) - 0.65).abs() < 1e-12);
    }

    #[test]
    fn single_scenario_gets_max_weight() {
        let set = ScenarioSet::with_linear_weights(vec!["2024".into()], 0.3, 1.0).unwrap();
        assert_eq!(set.weight_of(&"2024".into()), 1.0);
    }

    #[test]
    fn numeric_ids_sort_numerically() {
        let ids: Vec<ScenarioId> = ["999", "2024"].iter().map(|s| (*s).into()).collect();
        let set = ScenarioSet::with_linear_weights(ids, 0.0, 1.0).unwrap();
        // Lexically "2024" < "999"; numerically 999 comes first.
        assert_eq!(set.weight_of(&"999".into()), 0.0);
        assert_eq!(set.weight_of(&"2024".into()), 1.0);
    }

    #[test]
    fn negative_weight_rejected() {
        let err = ScenarioSet::new(vec![Scenario::new("2024", -1.0)]);
        assert!(err.is_err());
    }

    #[test]
    fn unknown_id_defaults_to_unit_weight() {
        let set = ScenarioSet::new(vec![Scenario::new("2024", 0.5)]).unwrap();
        assert_eq!(set.weight_of(&"1999".into()), 1.0);
    }
}
