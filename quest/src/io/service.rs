//! HTTP client for the remote execution service.
//!
//! The service is an opaque collaborator: it accepts `{ code, tests }` and
//! returns counts, coverage, a score and a transcript. Everything here is
//! transport and wire-format interpretation; no run semantics.

use std::time::Duration;

use anyhow::{Context, Result};
use serde::Deserialize;
use serde_json::json;
use thiserror::Error;
use tracing::debug;

use crate::core::run::RunResult;
use crate::io::config::ClientConfig;

/// Failure of one service call.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ServiceError {
    /// Transport failure before any response was received.
    #[error("network error: {0}")]
    Network(String),
    /// A response arrived but was non-success or not well-formed.
    #[error("{0}")]
    Protocol(String),
}

/// Transport seam for run submission, so orchestration can be driven by a
/// stub in tests.
pub trait RunService {
    fn run(&self, code: &str, tests: &str) -> Result<RunResult, ServiceError>;
}

/// Blocking client for the execution service HTTP API.
#[derive(Debug, Clone)]
pub struct ExecutionClient {
    http: reqwest::blocking::Client,
    base_url: String,
    strict: bool,
}

impl ExecutionClient {
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let http = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .context("build http client")?;
        Ok(Self {
            http,
            base_url: config.service_url.trim_end_matches('/').to_string(),
            strict: config.strict_results,
        })
    }

    /// Probe the service health endpoint.
    pub fn health(&self) -> Result<(), ServiceError> {
        let url = format!("{}/health", self.base_url);
        let response = self.http.get(&url).send().map_err(network_error)?;
        let status = response.status();
        if !status.is_success() {
            return Err(ServiceError::Protocol(format!("HTTP {}", status.as_u16())));
        }
        Ok(())
    }
}

impl RunService for ExecutionClient {
    fn run(&self, code: &str, tests: &str) -> Result<RunResult, ServiceError> {
        let url = format!("{}/run", self.base_url);
        debug!(url = %url, code_bytes = code.len(), tests_bytes = tests.len(), "submitting run");
        let response = self
            .http
            .post(&url)
            .json(&json!({ "code": code, "tests": tests }))
            .send()
            .map_err(network_error)?;
        let status = response.status().as_u16();
        let body = response.text().map_err(network_error)?;
        interpret_run_response(status, &body, self.strict)
    }
}

fn network_error(err: reqwest::Error) -> ServiceError {
    ServiceError::Network(err.to_string())
}

/// Response fields the service may return for a run. Which of them are
/// required depends on the strictness setting.
#[derive(Debug, Deserialize)]
struct RawRunResult {
    passed: Option<u32>,
    failed: Option<u32>,
    coverage_percent: Option<f64>,
    score: Option<f64>,
    output: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    detail: Option<String>,
}

/// Turn an HTTP status and body into a run result or a protocol error.
///
/// Non-2xx: the body's `detail` field is used verbatim when present and
/// non-empty, otherwise a generic `HTTP <status>` message is synthesized.
/// 2xx: `passed`, `failed` and `output` are always required;
/// `coverage_percent` and `score` are additionally required only under
/// strict interpretation (the observed service omits them at times).
pub fn interpret_run_response(
    status: u16,
    body: &str,
    strict: bool,
) -> Result<RunResult, ServiceError> {
    if !(200..300).contains(&status) {
        let detail = serde_json::from_str::<ErrorBody>(body)
            .ok()
            .and_then(|err| err.detail)
            .filter(|detail| !detail.is_empty())
            .unwrap_or_else(|| format!("HTTP {status}"));
        return Err(ServiceError::Protocol(detail));
    }

    let raw: RawRunResult = serde_json::from_str(body)
        .map_err(|err| ServiceError::Protocol(format!("malformed response body: {err}")))?;

    let passed = raw.passed.ok_or_else(|| missing_field("passed"))?;
    let failed = raw.failed.ok_or_else(|| missing_field("failed"))?;
    let output = raw.output.ok_or_else(|| missing_field("output"))?;
    if strict {
        if raw.coverage_percent.is_none() {
            return Err(missing_field("coverage_percent"));
        }
        if raw.score.is_none() {
            return Err(missing_field("score"));
        }
    }

    Ok(RunResult {
        passed,
        failed,
        coverage_percent: raw.coverage_percent,
        score: raw.score,
        output,
    })
}

fn missing_field(name: &str) -> ServiceError {
    ServiceError::Protocol(format!("response missing field '{name}'"))
}
