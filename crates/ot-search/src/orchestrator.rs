//! Parallel fan-out of annealing runs across scenarios.

use crossbeam_channel::{Receiver, Sender};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::any::Any;
use std::collections::HashMap;
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use tracing::{debug, info, warn};

use ot_types::{
    RunId, ScenarioId, ScenarioSet, SearchOutcome, SessionError, SweepParams, TunerError,
    TunerResult,
};

use crate::annealer::Annealer;
use crate::evaluator::Evaluator;
use crate::space::ConfigSpace;

/// Everything a sweep produced: every run's outcome in completion order,
/// plus the single best outcome per scenario (first seen wins exact ties).
#[derive(Debug, Clone, PartialEq)]
pub struct SweepResult {
    pub best_by_scenario: HashMap<ScenarioId, SearchOutcome>,
    pub outcomes: Vec<SearchOutcome>,
    /// Runs that never started because their session could not be opened.
    pub failed_sessions: usize,
}

struct Job {
    scenario: ScenarioId,
    run: RunId,
    seed: u64,
}

enum WorkerMsg {
    Outcome(SearchOutcome),
    SessionFailed(SessionError),
    Fatal(String),
}

/// Launches `scenarios × runs_per_scenario` independent annealing runs over
/// a bounded worker pool. Each job owns an exclusive oracle session for its
/// whole lifetime; no state is shared between jobs beyond the read-only
/// space and parameters.
pub struct Orchestrator<'a> {
    space: &'a ConfigSpace,
    params: &'a SweepParams,
}

impl<'a> Orchestrator<'a> {
    pub fn new(space: &'a ConfigSpace, params: &'a SweepParams) -> Self {
        Self { space, params }
    }

    /// Runs the full sweep and collects results in completion order.
    ///
    /// A session that cannot be opened drops that one run and lets its
    /// siblings finish. A panic out of the evaluator is a contract
    /// violation: the pool stops taking jobs and the first such failure is
    /// returned once in-flight runs have drained.
    pub fn run_all<E: Evaluator>(
        &self,
        evaluator: &E,
        scenarios: &ScenarioSet,
    ) -> TunerResult<SweepResult> {
        self.params.validate()?;

        let base_seed = self.params.seed.unwrap_or_else(|| rand::rng().random());
        let (job_tx, job_rx) = crossbeam_channel::unbounded::<Job>();
        let mut job_count: u64 = 0;
        for scenario in scenarios.ids() {
            for run in 0..self.params.runs_per_scenario {
                let _ = job_tx.send(Job {
                    scenario: scenario.clone(),
                    run: run as RunId,
                    seed: base_seed.wrapping_add(job_count),
                });
                job_count += 1;
            }
        }
        drop(job_tx);

        let workers = self.params.concurrency.min(job_count as usize);
        info!(
            scenarios = scenarios.len(),
            runs_per_scenario = self.params.runs_per_scenario,
            workers,
            "starting sweep"
        );

        let (result_tx, result_rx) = crossbeam_channel::unbounded::<WorkerMsg>();
        let cancelled = AtomicBool::new(false);

        let (outcomes, best_by_scenario, failed_sessions, fatal) = thread::scope(|scope| {
            for _ in 0..workers {
                let job_rx = job_rx.clone();
                let result_tx = result_tx.clone();
                let cancelled = &cancelled;
                scope.spawn(move || self.worker(evaluator, job_rx, result_tx, cancelled));
            }
            drop(job_rx);
            drop(result_tx);

            self.collect(result_rx)
        });

        if let Some(message) = fatal {
            return Err(TunerError::ContractViolation(message));
        }

        info!(
            outcomes = outcomes.len(),
            failed_sessions, "sweep finished"
        );
        Ok(SweepResult {
            best_by_scenario,
            outcomes,
            failed_sessions,
        })
    }

    fn worker<E: Evaluator>(
        &self,
        evaluator: &E,
        jobs: Receiver<Job>,
        results: Sender<WorkerMsg>,
        cancelled: &AtomicBool,
    ) {
        let annealer = Annealer::new(self.space, &self.params.schedule);
        while let Ok(job) = jobs.recv() {
            if cancelled.load(Ordering::SeqCst) {
                break;
            }
            let msg = match panic::catch_unwind(AssertUnwindSafe(|| {
                self.run_one(evaluator, &annealer, &job)
            })) {
                Ok(Ok(outcome)) => WorkerMsg::Outcome(outcome),
                Ok(Err(err)) => WorkerMsg::SessionFailed(err),
                Err(payload) => {
                    // The evaluator broke its contract; stop the pool.
                    cancelled.store(true, Ordering::SeqCst);
                    WorkerMsg::Fatal(panic_message(payload))
                }
            };
            if results.send(msg).is_err() {
                break;
            }
        }
    }

    fn run_one<E: Evaluator>(
        &self,
        evaluator: &E,
        annealer: &Annealer<'_>,
        job: &Job,
    ) -> Result<SearchOutcome, SessionError> {
        let mut rng = StdRng::seed_from_u64(job.seed);
        // Session is released by Drop on every exit path, panics included.
        let mut session = evaluator.open(&job.scenario)?;
        let initial = self.space.random(&mut rng);
        let outcome = annealer.run(&mut session, &job.scenario, job.run, initial, &mut rng);
        debug!(
            scenario = %job.scenario,
            run = job.run,
            best = %outcome.best_score,
            "run complete"
        );
        Ok(outcome)
    }

    #[allow(clippy::type_complexity)]
    fn collect(
        &self,
        results: Receiver<WorkerMsg>,
    ) -> (
        Vec<SearchOutcome>,
        HashMap<ScenarioId, SearchOutcome>,
        usize,
        Option<String>,
    ) {
        let mut outcomes = Vec::new();
        let mut best_by_scenario: HashMap<ScenarioId, SearchOutcome> = HashMap::new();
        let mut failed_sessions = 0;
        let mut fatal: Option<String> = None;

        for msg in results.iter() {
            match msg {
                WorkerMsg::Outcome(outcome) => {
                    let replaces = match best_by_scenario.get(&outcome.scenario) {
                        None => true,
                        Some(current) => outcome.best_score.improves_on(&current.best_score),
                    };
                    if replaces {
                        best_by_scenario.insert(outcome.scenario.clone(), outcome.clone());
                    }
                    outcomes.push(outcome);
                }
                WorkerMsg::SessionFailed(err) => {
                    warn!("dropping run: {err}");
                    failed_sessions += 1;
                }
                WorkerMsg::Fatal(message) => {
                    warn!("evaluator contract violation: {message}");
                    if fatal.is_none() {
                        fatal = Some(message);
                    }
                }
            }
        }

        (outcomes, best_by_scenario, failed_sessions, fatal)
    }
}

fn panic_message(payload: Box<dyn Any + Send>) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "evaluator panicked".to_string()
    }
}
