//! Deterministic stub oracles shared by the crate's tests.

use std::sync::{Arc, Mutex};

use ot_types::{Configuration, ScenarioId, ScoreResult, SessionError, TransientError};

use crate::evaluator::{Evaluator, ScoreSession};

pub fn sum_of(config: &Configuration) -> f64 {
    config.iter().map(|(_, v)| v as f64).sum()
}

/// Scores every configuration as the sum of its values.
#[derive(Default)]
pub struct SumSession;

impl ScoreSession for SumSession {
    fn score(&mut self, config: &Configuration) -> Result<ScoreResult, TransientError> {
        Ok(ScoreResult::Known(sum_of(config)))
    }
}

/// An oracle that never manages to produce a score.
pub struct UnknownSession;

impl ScoreSession for UnknownSession {
    fn score(&mut self, _config: &Configuration) -> Result<ScoreResult, TransientError> {
        Ok(ScoreResult::Unknown)
    }
}

/// Fails every call with a transient error.
pub struct DisconnectedSession;

impl ScoreSession for DisconnectedSession {
    fn score(&mut self, _config: &Configuration) -> Result<ScoreResult, TransientError> {
        Err(TransientError::new("connection reset"))
    }
}

/// Scores like [`SumSession`] while recording every configuration it saw.
#[derive(Default)]
pub struct RecordingSession {
    pub evaluated: Arc<Mutex<Vec<Configuration>>>,
}

impl ScoreSession for RecordingSession {
    fn score(&mut self, config: &Configuration) -> Result<ScoreResult, TransientError> {
        self.evaluated.lock().unwrap().push(config.clone());
        Ok(ScoreResult::Known(sum_of(config)))
    }
}

/// Always opens; every session scores by value sum.
pub struct SumEvaluator;

impl Evaluator for SumEvaluator {
    type Session = SumSession;

    fn open(&self, _scenario: &ScenarioId) -> Result<Self::Session, SessionError> {
        Ok(SumSession)
    }
}

/// Refuses to open sessions for one scenario, delegating the rest to
/// [`SumSession`].
pub struct FailingOpenEvaluator {
    pub fail_for: ScenarioId,
}

impl Evaluator for FailingOpenEvaluator {
    type Session = SumSession;

    fn open(&self, scenario: &ScenarioId) -> Result<Self::Session, SessionError> {
        if scenario == &self.fail_for {
            Err(SessionError::new(scenario.clone(), "oracle refused the scenario"))
        } else {
            Ok(SumSession)
        }
    }
}

/// A contract-breaking oracle: sessions open fine, then panic on scoring.
pub struct PanickingEvaluator;

pub struct PanickingSession;

impl ScoreSession for PanickingSession {
    fn score(&mut self, _config: &Configuration) -> Result<ScoreResult, TransientError> {
        panic!("oracle driver crashed");
    }
}

impl Evaluator for PanickingEvaluator {
    type Session = PanickingSession;

    fn open(&self, _scenario: &ScenarioId) -> Result<Self::Session, SessionError> {
        Ok(PanickingSession)
    }
}
