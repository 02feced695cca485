//! Result records produced by search and aggregation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

use crate::{Configuration, ScenarioId, ScoreResult};

/// Index of one annealing run within its scenario.
pub type RunId = u32;

/// One append-only entry of an annealing trajectory.
///
/// Records the configuration that was current *after* the iteration's
/// accept/reject decision, its score, and the temperature in force before
/// that iteration's decay.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrajectoryStep {
    /// 1-based iteration index.
    pub iteration: u32,
    pub config: Configuration,
    pub score: ScoreResult,
    pub temperature: f64,
}

/// Final result of a single annealing run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchOutcome {
    pub id: Uuid,
    pub scenario: ScenarioId,
    pub run: RunId,
    /// The highest-scoring configuration observed anywhere in the
    /// trajectory, not necessarily the final current one.
    pub best: Configuration,
    pub best_score: ScoreResult,
    pub trajectory: Vec<TrajectoryStep>,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

/// A configuration re-scored against every scenario, with the weighted
/// aggregate of those scores.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregateRecord {
    pub config: Configuration,
    pub scores: BTreeMap<ScenarioId, ScoreResult>,
    pub weighted_score: ScoreResult,
    /// The scenario this configuration was originally optimized for, when
    /// it came out of a sweep.
    pub optimized_for: Option<ScenarioId>,
}
