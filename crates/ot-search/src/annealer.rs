//! One simulated-annealing trajectory against one oracle session.

use chrono::Utc;
use rand::Rng;
use std::collections::HashSet;
use tracing::debug;
use uuid::Uuid;

use ot_types::{
    AnnealSchedule, Configuration, RunId, ScenarioId, ScoreResult, SearchOutcome, TrajectoryStep,
};

use crate::evaluator::{score_or_unknown, ScoreSession};
use crate::space::ConfigSpace;

/// Runs single annealing trajectories over a [`ConfigSpace`] under an
/// [`AnnealSchedule`]. Stateless between runs; each run owns its session,
/// RNG and visited set.
pub struct Annealer<'a> {
    space: &'a ConfigSpace,
    schedule: &'a AnnealSchedule,
}

impl<'a> Annealer<'a> {
    pub fn new(space: &'a ConfigSpace, schedule: &'a AnnealSchedule) -> Self {
        Self { space, schedule }
    }

    /// Runs one trajectory from `initial` and returns the best
    /// configuration observed anywhere along it.
    ///
    /// A transient oracle failure scores the configuration `Unknown`; an
    /// `Unknown` on either side of the acceptance comparison forces
    /// rejection, so a run never moves onto or away from a configuration
    /// it could not compare. Panics from a misbehaving evaluator are not
    /// caught here.
    pub fn run<S, R>(
        &self,
        session: &mut S,
        scenario: &ScenarioId,
        run: RunId,
        initial: Configuration,
        rng: &mut R,
    ) -> SearchOutcome
    where
        S: ScoreSession,
        R: Rng,
    {
        let started_at = Utc::now();

        let mut visited: HashSet<Configuration> = HashSet::new();
        visited.insert(initial.clone());

        let mut current = initial;
        let mut current_score = score_or_unknown(session, &current);
        let mut best = current.clone();
        let mut best_score = current_score;
        debug!(%scenario, run, initial_score = %current_score, "annealing run started");

        let mut trajectory = Vec::with_capacity(self.schedule.iterations);
        let mut temperature = self.schedule.initial_temp;

        for iteration in 1..=self.schedule.iterations {
            let candidate = self.next_candidate(&current, &visited, rng);
            visited.insert(candidate.clone());
            let candidate_score = score_or_unknown(session, &candidate);

            // An Unknown on either side forces rejection: exp(-inf/T) is
            // exactly 0, so the Metropolis test can never pass.
            let delta = match (candidate_score.known(), current_score.known()) {
                (Some(cand), Some(cur)) => cand - cur,
                _ => f64::NEG_INFINITY,
            };

            let accepted = delta > 0.0
                || (temperature > 0.0 && (delta / temperature).exp() > rng.random::<f64>());

            if accepted {
                current = candidate;
                current_score = candidate_score;
                if candidate_score.improves_on(&best_score) {
                    best = current.clone();
                    best_score = candidate_score;
                }
            }

            trajectory.push(TrajectoryStep {
                iteration: iteration as u32,
                config: current.clone(),
                score: current_score,
                temperature,
            });
            temperature *= self.schedule.cooling_rate;
        }

        debug!(%scenario, run, best = %best_score, "annealing run finished");
        SearchOutcome {
            id: Uuid::new_v4(),
            scenario: scenario.clone(),
            run,
            best,
            best_score,
            trajectory,
            started_at,
            finished_at: Utc::now(),
        }
    }

    /// Perturbs until a never-visited candidate appears, bounded by
    /// `max_perturb_attempts`. Once the reachable neighborhood looks
    /// saturated the run falls back to a fresh uniform draw, which is used
    /// even if it was visited before.
    fn next_candidate<R: Rng>(
        &self,
        current: &Configuration,
        visited: &HashSet<Configuration>,
        rng: &mut R,
    ) -> Configuration {
        for _ in 0..self.schedule.max_perturb_attempts {
            let candidate = self.space.perturb(current, rng);
            if !visited.contains(&candidate) {
                return candidate;
            }
        }
        debug!("perturbation neighborhood exhausted, drawing a fresh random configuration");
        self.space.random(rng)
    }
}
