//! Ordered mission catalog and the current selection.

use thiserror::Error;

use crate::core::mission::Mission;

/// Failures when replacing the catalog contents.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CatalogError {
    /// The mission list was empty (or the source document had none).
    #[error("mission catalog is empty")]
    EmptyCatalog,
    #[error("duplicate mission id '{0}'")]
    DuplicateId(String),
    #[error("invalid mission '{id}': {reason}")]
    InvalidMission { id: String, reason: String },
}

/// Ordered mission list plus the current selection.
///
/// Order is meaningful: it is the display and selection order of the source
/// document. Ids are unique within a loaded catalog.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    missions: Vec<Mission>,
    selected: Option<usize>,
}

impl Catalog {
    /// Catalog with no missions and no selection.
    ///
    /// The degraded mode when no catalog could be loaded: runs stay
    /// possible, evaluation yields no verdict.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a catalog from `missions`, selecting the first by default.
    pub fn load(missions: Vec<Mission>) -> Result<Self, CatalogError> {
        if missions.is_empty() {
            return Err(CatalogError::EmptyCatalog);
        }
        for (index, mission) in missions.iter().enumerate() {
            mission
                .validate()
                .map_err(|reason| CatalogError::InvalidMission {
                    id: mission.id.clone(),
                    reason,
                })?;
            if missions[..index].iter().any(|other| other.id == mission.id) {
                return Err(CatalogError::DuplicateId(mission.id.clone()));
            }
        }
        Ok(Self {
            missions,
            selected: Some(0),
        })
    }

    /// Missions in display order.
    pub fn missions(&self) -> &[Mission] {
        &self.missions
    }

    /// Look up a mission by id.
    pub fn get(&self, id: &str) -> Option<&Mission> {
        self.missions.iter().find(|mission| mission.id == id)
    }

    /// Select the mission with `id`.
    ///
    /// Unknown ids are a silent no-op: the selection stays unchanged.
    /// Returns true only when the selection actually changed, so callers can
    /// tell an effective switch from a no-op or an idempotent re-select.
    pub fn select(&mut self, id: &str) -> bool {
        let Some(index) = self.missions.iter().position(|mission| mission.id == id) else {
            return false;
        };
        if self.selected == Some(index) {
            return false;
        }
        self.selected = Some(index);
        true
    }

    /// The currently selected mission, if any.
    pub fn current(&self) -> Option<&Mission> {
        self.selected.and_then(|index| self.missions.get(index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::mission;

    #[test]
    fn load_rejects_empty_list() {
        let err = Catalog::load(Vec::new()).expect_err("empty catalog");
        assert_eq!(err, CatalogError::EmptyCatalog);
    }

    #[test]
    fn load_selects_first_mission() {
        let catalog = Catalog::load(vec![mission("a"), mission("b")]).expect("catalog loads");
        assert_eq!(catalog.current().map(|m| m.id.as_str()), Some("a"));
    }

    #[test]
    fn load_rejects_duplicate_ids() {
        let err = Catalog::load(vec![mission("a"), mission("a")]).expect_err("duplicate id");
        assert_eq!(err, CatalogError::DuplicateId("a".to_string()));
    }

    #[test]
    fn load_rejects_invalid_mission() {
        let mut bad = mission("a");
        bad.min_coverage = Some(-5.0);
        let err = Catalog::load(vec![bad]).expect_err("invalid mission");
        assert!(matches!(err, CatalogError::InvalidMission { id, .. } if id == "a"));
    }

    #[test]
    fn select_switches_to_known_id() {
        let mut catalog = Catalog::load(vec![mission("a"), mission("b")]).expect("catalog loads");
        assert!(catalog.select("b"));
        assert_eq!(catalog.current().map(|m| m.id.as_str()), Some("b"));
    }

    #[test]
    fn select_unknown_id_is_a_no_op() {
        let mut catalog = Catalog::load(vec![mission("a"), mission("b")]).expect("catalog loads");
        assert!(!catalog.select("missing"));
        assert_eq!(catalog.current().map(|m| m.id.as_str()), Some("a"));
    }

    #[test]
    fn reselecting_current_id_is_idempotent() {
        let mut catalog = Catalog::load(vec![mission("a"), mission("b")]).expect("catalog loads");
        assert!(!catalog.select("a"));
        assert_eq!(catalog.current().map(|m| m.id.as_str()), Some("a"));
        assert_eq!(catalog.missions().len(), 2);
    }

    #[test]
    fn empty_catalog_has_no_selection() {
        let catalog = Catalog::empty();
        assert!(catalog.current().is_none());
        assert!(catalog.missions().is_empty());
    }
}
