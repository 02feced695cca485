//! # ot-search
//!
//! Simulated-annealing search and sweep orchestration for OraTune.
//!
//! Provides the discrete configuration space (random draws and
//! perturbations), the per-run annealer, the parallel multi-run sweep
//! orchestrator, and the cross-scenario weighted evaluation step. The slow
//! external scoring oracle is abstracted behind the [`Evaluator`] trait; the
//! core works unchanged against any implementation of it.

mod aggregate;
mod annealer;
mod evaluator;
mod orchestrator;
mod space;

pub use aggregate::{weighted_aggregate, CrossScenarioEvaluator};
pub use annealer::Annealer;
pub use evaluator::{score_or_unknown, Evaluator, ScoreSession};
pub use orchestrator::{Orchestrator, SweepResult};
pub use space::ConfigSpace;

#[cfg(test)]
pub(crate) mod testing;
