//! Run results and the client-side run lifecycle.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Outcome of one execution-service run.
///
/// `passed` and `failed` are independent counts; no fixed total is assumed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RunResult {
    pub passed: u32,
    pub failed: u32,
    /// Reported line coverage (0 to 100). `None` when the service omitted it
    /// and lenient response parsing is configured.
    #[serde(default)]
    pub coverage_percent: Option<f64>,
    /// Service-computed score. Opaque display data.
    #[serde(default)]
    pub score: Option<f64>,
    /// Raw transcript from the run. Diagnostic only, never evaluated.
    pub output: String,
}

/// Rejection returned when a submit arrives while a run is in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("a run is already in flight")]
pub struct RunInFlight;

/// Client-side lifecycle of a run.
///
/// A single instance exists per session. `Done` and `Error` both accept a
/// new run; only `Running` refuses one. There is no cancellation: once
/// `Running`, only a settlement moves the state forward.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(tag = "phase", rename_all = "snake_case")]
pub enum RunState {
    #[default]
    Idle,
    Running,
    Done {
        result: RunResult,
    },
    Error {
        message: String,
    },
}

impl RunState {
    pub fn is_running(&self) -> bool {
        matches!(self, RunState::Running)
    }

    /// Result stored by the last completed run, if any.
    pub fn result(&self) -> Option<&RunResult> {
        match self {
            RunState::Done { result } => Some(result),
            _ => None,
        }
    }

    /// Start a new run, discarding any previous result or error message.
    ///
    /// Refused while a run is in flight; the caller must not issue the
    /// request in that case.
    pub fn try_begin(&mut self) -> Result<(), RunInFlight> {
        if self.is_running() {
            return Err(RunInFlight);
        }
        *self = RunState::Running;
        Ok(())
    }

    /// Settle the in-flight run with a result.
    ///
    /// Ignored (returns false) in any other state, so a stray or duplicate
    /// settlement can never attach a second result.
    pub fn settle_success(&mut self, result: RunResult) -> bool {
        if !self.is_running() {
            return false;
        }
        *self = RunState::Done { result };
        true
    }

    /// Settle the in-flight run with a failure message. No result is stored.
    ///
    /// Ignored (returns false) in any other state.
    pub fn settle_failure(&mut self, message: impl Into<String>) -> bool {
        if !self.is_running() {
            return false;
        }
        *self = RunState::Error {
            message: message.into(),
        };
        true
    }
}
