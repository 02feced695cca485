//! Tunable parameters for annealing runs and sweeps.

use serde::{Deserialize, Serialize};

use crate::{TunerError, TunerResult};

/// Per-run annealing schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnealSchedule {
    /// Number of perturbation iterations per run.
    pub iterations: usize,
    pub initial_temp: f64,
    /// Multiplicative temperature decay applied after every iteration.
    pub cooling_rate: f64,
    /// Bound on the regenerate-until-novel loop. Once a perturbation has
    /// collided with the visited set this many times, the run falls back to
    /// a fresh uniform draw even if that draw was already visited.
    pub max_perturb_attempts: usize,
}

impl Default for AnnealSchedule {
    fn default() -> Self {
        Self {
            iterations: 100,
            initial_temp: 10.0,
            cooling_rate: 0.95,
            max_perturb_attempts: 64,
        }
    }
}

impl AnnealSchedule {
    pub fn validate(&self) -> TunerResult<()> {
        if self.initial_temp < 0.0 || !self.initial_temp.is_finite() {
            return Err(TunerError::Config(format!(
                "initial_temp must be finite and non-negative, got {}",
                self.initial_temp
            )));
        }
        if !(0.0..=1.0).contains(&self.cooling_rate) {
            return Err(TunerError::Config(format!(
                "cooling_rate must be within [0, 1], got {}",
                self.cooling_rate
            )));
        }
        if self.max_perturb_attempts == 0 {
            return Err(TunerError::Config(
                "max_perturb_attempts must be at least 1".into(),
            ));
        }
        Ok(())
    }

    pub fn with_iterations(mut self, n: usize) -> Self {
        self.iterations = n;
        self
    }

    pub fn with_initial_temp(mut self, t: f64) -> Self {
        self.initial_temp = t;
        self
    }

    pub fn with_cooling_rate(mut self, r: f64) -> Self {
        self.cooling_rate = r;
        self
    }
}

/// Parameters for one orchestrated sweep across scenarios.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepParams {
    pub schedule: AnnealSchedule,
    /// Independent annealing runs launched per scenario.
    pub runs_per_scenario: usize,
    /// Worker-pool size; each worker holds one evaluator session at a time.
    pub concurrency: usize,
    /// Base seed for deterministic sweeps. Each (scenario, run) job derives
    /// its own RNG from this plus the job index. `None` seeds from the OS.
    pub seed: Option<u64>,
}

impl Default for SweepParams {
    fn default() -> Self {
        Self {
            schedule: AnnealSchedule::default(),
            runs_per_scenario: 25,
            concurrency: 4,
            seed: None,
        }
    }
}

impl SweepParams {
    pub fn validate(&self) -> TunerResult<()> {
        self.schedule.validate()?;
        if self.runs_per_scenario == 0 {
            return Err(TunerError::Config(
                "runs_per_scenario must be at least 1".into(),
            ));
        }
        if self.concurrency == 0 {
            return Err(TunerError::Config("concurrency must be at least 1".into()));
        }
        Ok(())
    }

    pub fn with_schedule(mut self, schedule: AnnealSchedule) -> Self {
        self.schedule = schedule;
        self
    }

    pub fn with_runs_per_scenario(mut self, n: usize) -> Self {
        self.runs_per_scenario = n;
        self
    }

    pub fn with_concurrency(mut self, n: usize) -> Self {
        self.concurrency = n;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}
