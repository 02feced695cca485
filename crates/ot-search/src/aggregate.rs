//! Cross-scenario re-scoring of candidate configurations.

use std::collections::BTreeMap;
use tracing::{debug, warn};

use ot_types::{AggregateRecord, Configuration, ScenarioId, ScenarioSet, ScoreResult};

use crate::evaluator::{score_or_unknown, Evaluator};
use crate::orchestrator::SweepResult;

/// Re-scores a configuration against every scenario and combines the
/// per-scenario scores into one weighted aggregate.
///
/// Missing scores are treated differently here than during search: an
/// `Unknown` coerces to 0 before weighting. Unifying the two policies would
/// silently change search behavior, so they stay separate on purpose.
pub struct CrossScenarioEvaluator<'a> {
    scenarios: &'a ScenarioSet,
}

impl<'a> CrossScenarioEvaluator<'a> {
    pub fn new(scenarios: &'a ScenarioSet) -> Self {
        Self { scenarios }
    }

    /// Scores `config` once per scenario, each under a fresh session — no
    /// oracle state is assumed to survive a scenario switch. A scenario
    /// whose session cannot be opened scores `Unknown` for that scenario
    /// only.
    pub fn evaluate<E: Evaluator>(
        &self,
        evaluator: &E,
        config: &Configuration,
        optimized_for: Option<ScenarioId>,
    ) -> AggregateRecord {
        let mut scores = BTreeMap::new();
        for scenario in self.scenarios.iter() {
            let score = match evaluator.open(&scenario.id) {
                Ok(mut session) => score_or_unknown(&mut session, config),
                Err(err) => {
                    warn!("scoring scenario as unknown: {err}");
                    ScoreResult::Unknown
                }
            };
            debug!(scenario = %scenario.id, %score, weight = scenario.weight, "scenario scored");
            scores.insert(scenario.id.clone(), score);
        }

        let weighted_score = weighted_aggregate(&scores, self.scenarios);
        AggregateRecord {
            config: config.clone(),
            scores,
            weighted_score,
            optimized_for,
        }
    }

    /// Convenience over a finished sweep: aggregates each scenario's best
    /// configuration, tagged with the scenario it was optimized for.
    /// Records come back in scenario-id order.
    pub fn evaluate_sweep_best<E: Evaluator>(
        &self,
        evaluator: &E,
        sweep: &SweepResult,
    ) -> Vec<AggregateRecord> {
        let mut best: Vec<_> = sweep.best_by_scenario.iter().collect();
        best.sort_by(|a, b| a.0.cmp(b.0));
        best.into_iter()
            .map(|(scenario, outcome)| {
                self.evaluate(evaluator, &outcome.best, Some(scenario.clone()))
            })
            .collect()
    }
}

/// The weighted-aggregation arithmetic on its own: `Σ(score_or_zero × w) / Σw`,
/// `Unknown` when the total weight is zero (never a division error).
pub fn weighted_aggregate(
    scores: &BTreeMap<ScenarioId, ScoreResult>,
    scenarios: &ScenarioSet,
) -> ScoreResult {
    let mut total = 0.0;
    let mut total_weight = 0.0;
    for (id, score) in scores {
        let weight = scenarios.weight_of(id);
        total += score.or_zero() * weight;
        total_weight += weight;
    }
    if total_weight > 0.0 {
        ScoreResult::Known(total / total_weight)
    } else {
        ScoreResult::Unknown
    }
}
