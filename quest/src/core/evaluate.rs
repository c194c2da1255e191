//! Mission evaluation: does a run result satisfy the active mission?

use serde::{Deserialize, Serialize};

use crate::core::mission::Mission;
use crate::core::run::RunResult;

/// Judgment of one run against one mission.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Verdict {
    /// No mission is active; there is nothing to judge.
    NoMission,
    Satisfied,
    Unsatisfied {
        /// One line per unmet criterion, in evaluation order.
        reasons: Vec<String>,
    },
}

/// Judge `result` against the present criteria of `mission`.
///
/// Conjunctive: every present criterion must hold. Absent criteria impose no
/// constraint, so a mission without any is satisfied by every result. Total
/// over its domain; evaluated fresh on every completed run.
pub fn evaluate(mission: Option<&Mission>, result: &RunResult, tests_source: &str) -> Verdict {
    let Some(mission) = mission else {
        return Verdict::NoMission;
    };

    let mut reasons = Vec::new();

    if let Some(min_coverage) = mission.min_coverage {
        match result.coverage_percent {
            Some(coverage) if coverage >= min_coverage => {}
            Some(coverage) => {
                reasons.push(format!("coverage {coverage}% < required {min_coverage}%"));
            }
            // A threshold cannot be met by data the service never reported.
            None => reasons.push(format!("coverage not reported (required {min_coverage}%)")),
        }
    }

    if let Some(max_failed) = mission.max_failed
        && result.failed > max_failed
    {
        reasons.push(format!(
            "failed tests {} > max allowed {max_failed}",
            result.failed
        ));
    }

    if let Some(min_passed) = mission.min_passed
        && result.passed < min_passed
    {
        reasons.push(format!(
            "passed tests {} < required {min_passed}",
            result.passed
        ));
    }

    if let Some(keyword) = &mission.requires_property_keyword
        && !tests_source.contains(keyword.as_str())
    {
        reasons.push(format!("missing required keyword: '{keyword}'"));
    }

    if reasons.is_empty() {
        Verdict::Satisfied
    } else {
        Verdict::Unsatisfied { reasons }
    }
}
