//! Test-only helpers for constructing missions, results and stub services.

use crate::core::mission::Mission;
use crate::core::run::RunResult;
use crate::io::service::{RunService, ServiceError};

/// Create a deterministic mission with the given id and no criteria.
pub fn mission(id: &str) -> Mission {
    Mission {
        id: id.to_string(),
        title: format!("{id} title"),
        description: format!("{id} description"),
        min_coverage: None,
        max_failed: None,
        min_passed: None,
        requires_property_keyword: None,
        reward_points: None,
    }
}

/// Create a deterministic run result with explicit counts and coverage.
pub fn run_result(passed: u32, failed: u32, coverage: f64) -> RunResult {
    RunResult {
        passed,
        failed,
        coverage_percent: Some(coverage),
        score: None,
        output: String::new(),
    }
}

/// Service stub returning a canned outcome on every call.
pub struct StubService {
    pub response: Result<RunResult, ServiceError>,
}

impl StubService {
    pub fn success(result: RunResult) -> Self {
        Self {
            response: Ok(result),
        }
    }

    pub fn failure(err: ServiceError) -> Self {
        Self { response: Err(err) }
    }
}

impl RunService for StubService {
    fn run(&self, _code: &str, _tests: &str) -> Result<RunResult, ServiceError> {
        self.response.clone()
    }
}
