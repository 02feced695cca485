//! The boundary to the external scoring oracle.

use tracing::warn;

use ot_types::{Configuration, ScenarioId, ScoreResult, SessionError, TransientError};

/// Factory for scoped oracle sessions. The sole seam between the search
/// core and the page-specific plumbing that actually applies a
/// configuration and reads a score.
///
/// Implementations own their call deadlines: a call that runs past its
/// budget must come back as [`TransientError`], which the core downgrades
/// to an `Unknown` score rather than propagating.
pub trait Evaluator: Send + Sync {
    type Session: ScoreSession;

    /// Acquires a session bound to one scenario context. Sessions are held
    /// exclusively by one run and released via `Drop` on every exit path.
    fn open(&self, scenario: &ScenarioId) -> Result<Self::Session, SessionError>;
}

/// One exclusive oracle session.
pub trait ScoreSession {
    /// Applies the configuration under this session and reads the score.
    /// Never fails for a scoreable-but-poor configuration; a connectivity
    /// or timeout problem surfaces as [`TransientError`].
    fn score(&mut self, config: &Configuration) -> Result<ScoreResult, TransientError>;
}

/// Scores a configuration, absorbing transient oracle failures as
/// `Unknown`. This is the only treatment a per-configuration failure ever
/// gets inside the core.
pub fn score_or_unknown<S: ScoreSession>(session: &mut S, config: &Configuration) -> ScoreResult {
    match session.score(config) {
        Ok(score) => score,
        Err(err) => {
            warn!("transient oracle failure, scoring as unknown: {err}");
            ScoreResult::Unknown
        }
    }
}
