use thiserror::Error;

use crate::ScenarioId;

/// An oracle session could not be established for a scenario. Fatal to the
/// one run that needed the session; sibling runs continue.
#[derive(Error, Debug, Clone)]
#[error("session for scenario {scenario} could not be established: {message}")]
pub struct SessionError {
    pub scenario: ScenarioId,
    pub message: String,
}

impl SessionError {
    pub fn new(scenario: impl Into<ScenarioId>, message: impl Into<String>) -> Self {
        Self {
            scenario: scenario.into(),
            message: message.into(),
        }
    }
}

/// A recoverable oracle communication failure (connectivity, timeout).
/// Callers downgrade this to an `Unknown` score rather than propagate it.
#[derive(Error, Debug, Clone)]
#[error("transient oracle failure: {0}")]
pub struct TransientError(pub String);

impl TransientError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

/// Main error type for the OraTune system
#[derive(Error, Debug)]
pub enum TunerError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Session error: {0}")]
    Session(#[from] SessionError),

    #[error("Evaluator contract violation: {0}")]
    ContractViolation(String),

    #[error("Report error: {0}")]
    Report(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type alias for OraTune operations
pub type TunerResult<T> = Result<T, TunerError>;
