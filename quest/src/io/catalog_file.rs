//! Mission catalog loading from `missions.json`.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::debug;

use crate::core::catalog::Catalog;
use crate::core::mission::Mission;

/// On-disk catalog document: `{ "missions": [...] }`.
///
/// A document without the `missions` key parses as an empty list; the
/// emptiness is then reported by [`Catalog::load`], not treated as a parse
/// failure.
#[derive(Debug, Deserialize)]
struct CatalogDocument {
    #[serde(default)]
    missions: Vec<Mission>,
}

/// Load and validate a mission catalog from `path`.
pub fn load_catalog(path: &Path) -> Result<Catalog> {
    let contents =
        fs::read_to_string(path).with_context(|| format!("read catalog {}", path.display()))?;
    let document: CatalogDocument = serde_json::from_str(&contents)
        .with_context(|| format!("parse catalog {}", path.display()))?;
    debug!(path = %path.display(), missions = document.missions.len(), "catalog parsed");
    let catalog = Catalog::load(document.missions)
        .with_context(|| format!("load catalog {}", path.display()))?;
    Ok(catalog)
}
