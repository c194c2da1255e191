//! Mission definitions: declarative pass/fail criteria plus display metadata.

use serde::{Deserialize, Serialize};

/// A mission from the catalog.
///
/// Every criterion field is independently optional. A mission that sets none
/// of them is satisfied by any run result. Unknown fields in the source
/// document are ignored so catalogs may carry extra display metadata.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Mission {
    /// Unique identifier, stable across catalog reloads.
    pub id: String,
    /// Display title.
    pub title: String,
    /// Display description.
    #[serde(default)]
    pub description: String,
    /// Minimum coverage percentage (0 to 100) the run must reach.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_coverage: Option<f64>,
    /// Maximum number of failed tests the run may have.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_failed: Option<u32>,
    /// Minimum number of passed tests the run must have.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_passed: Option<u32>,
    /// Substring that must appear in the submitted test source.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub requires_property_keyword: Option<String>,
    /// Points awarded on completion. Informational, never enforced.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reward_points: Option<u32>,
}

impl Mission {
    /// Check structural requirements that serde cannot express.
    pub fn validate(&self) -> Result<(), String> {
        if self.id.trim().is_empty() {
            return Err("id must be non-empty".to_string());
        }
        if let Some(min_coverage) = self.min_coverage
            && !(0.0..=100.0).contains(&min_coverage)
        {
            return Err(format!("min_coverage {min_coverage} outside 0..=100"));
        }
        if let Some(keyword) = &self.requires_property_keyword
            && keyword.is_empty()
        {
            return Err("requires_property_keyword must be non-empty".to_string());
        }
        Ok(())
    }

    /// Human-readable lines describing the mission's present criteria,
    /// in evaluation order, with the reward last.
    pub fn criteria_summary(&self) -> Vec<String> {
        let mut lines = Vec::new();
        if let Some(min_coverage) = self.min_coverage {
            lines.push(format!("coverage >= {min_coverage}%"));
        }
        if let Some(max_failed) = self.max_failed {
            lines.push(format!("failed tests <= {max_failed}"));
        }
        if let Some(min_passed) = self.min_passed {
            lines.push(format!("passed tests >= {min_passed}"));
        }
        if let Some(keyword) = &self.requires_property_keyword {
            lines.push(format!("tests contain \"{keyword}\""));
        }
        if let Some(points) = self.reward_points {
            lines.push(format!("reward: {points} points"));
        }
        lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::mission;

    #[test]
    fn parses_minimal_mission() {
        let input = r#"{ "id": "first-green", "title": "First green run" }"#;
        let mission: Mission = serde_json::from_str(input).expect("mission parses");
        assert_eq!(mission.id, "first-green");
        assert_eq!(mission.description, "");
        assert!(mission.min_coverage.is_none());
        assert!(mission.max_failed.is_none());
        assert!(mission.min_passed.is_none());
        assert!(mission.requires_property_keyword.is_none());
        assert!(mission.reward_points.is_none());
    }

    #[test]
    fn ignores_unknown_fields() {
        let input = r#"{
            "id": "m1",
            "title": "Title",
            "title_bg": "Заглавие",
            "min_coverage": 80
        }"#;
        let mission: Mission = serde_json::from_str(input).expect("mission parses");
        assert_eq!(mission.min_coverage, Some(80.0));
    }

    #[test]
    fn validate_rejects_blank_id() {
        let invalid = mission("  ");
        assert!(invalid.validate().is_err());
    }

    #[test]
    fn validate_rejects_out_of_range_coverage() {
        let mut invalid = mission("m1");
        invalid.min_coverage = Some(120.0);
        let err = invalid.validate().expect_err("coverage out of range");
        assert!(err.contains("min_coverage"));
    }

    #[test]
    fn validate_rejects_empty_keyword() {
        let mut invalid = mission("m1");
        invalid.requires_property_keyword = Some(String::new());
        assert!(invalid.validate().is_err());
    }

    #[test]
    fn criteria_summary_lists_present_criteria_only() {
        let mut m = mission("m1");
        m.min_coverage = Some(80.0);
        m.max_failed = Some(0);
        m.requires_property_keyword = Some("@given".to_string());
        m.reward_points = Some(50);

        let lines = m.criteria_summary();
        assert_eq!(
            lines,
            vec![
                "coverage >= 80%".to_string(),
                "failed tests <= 0".to_string(),
                "tests contain \"@given\"".to_string(),
                "reward: 50 points".to_string(),
            ]
        );
    }

    #[test]
    fn criteria_summary_empty_for_vacuous_mission() {
        assert!(mission("m1").criteria_summary().is_empty());
    }
}
