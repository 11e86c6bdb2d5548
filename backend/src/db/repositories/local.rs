//! In-memory substance catalog.
//!
//! Holds documented durations and dose thresholds keyed by substance and
//! route. Substance names are matched case-insensitively. The catalog can
//! be filled programmatically or loaded from a JSON file of the form
//!
//! ```json
//! { "substances": [
//!     { "name": "Caffeine",
//!       "roas": [ { "route": "oral",
//!                   "duration": { "onset": { "min": 5, "max": 10, "units": "minutes" } },
//!                   "dose": { "units": "mg", "common_min": 50, "strong_min": 150 } } ] } ] }
//! ```

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use parking_lot::RwLock;
use serde::Deserialize;

use crate::db::repository::{DurationLookup, SubstanceRepository};
use crate::error::{Result, TimelineError};
use crate::models::{AdministrationRoute, RoaDose, RoaDuration};

#[derive(Debug, Deserialize)]
struct CatalogFile {
    #[serde(default)]
    substances: Vec<SubstanceRecord>,
}

#[derive(Debug, Deserialize)]
struct SubstanceRecord {
    name: String,
    #[serde(default)]
    roas: Vec<RoaRecord>,
}

#[derive(Debug, Deserialize)]
struct RoaRecord {
    route: AdministrationRoute,
    #[serde(default)]
    duration: Option<RoaDuration>,
    #[serde(default)]
    dose: Option<RoaDose>,
}

#[derive(Debug, Clone, Default)]
struct RoaEntry {
    duration: Option<RoaDuration>,
    dose: Option<RoaDose>,
}

#[derive(Debug, Clone)]
struct SubstanceEntry {
    name: String,
    roas: HashMap<AdministrationRoute, RoaEntry>,
}

#[derive(Default)]
struct CatalogData {
    substances: HashMap<String, SubstanceEntry>,
    is_healthy: bool,
}

/// In-memory catalog implementing [`DurationLookup`].
#[derive(Clone)]
pub struct SubstanceCatalog {
    data: Arc<RwLock<CatalogData>>,
}

fn key(name: &str) -> String {
    name.trim().to_lowercase()
}

impl SubstanceCatalog {
    /// Create a new empty catalog.
    pub fn new() -> Self {
        Self {
            data: Arc::new(RwLock::new(CatalogData {
                is_healthy: true,
                ..Default::default()
            })),
        }
    }

    /// Parse a catalog from JSON text.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let de = &mut serde_json::Deserializer::from_str(json);
        let file: CatalogFile =
            serde_path_to_error::deserialize(de).map_err(TimelineError::from_path_error)?;

        let catalog = Self::new();
        for substance in file.substances {
            for roa in substance.roas {
                let mut data = catalog.data.write();
                let entry = Self::entry_mut(&mut data, &substance.name, roa.route);
                entry.duration = roa.duration;
                entry.dose = roa.dose;
            }
        }
        log::info!("Loaded substance catalog with {} substances", catalog.len());
        Ok(catalog)
    }

    /// Load a catalog from a JSON file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| TimelineError::CatalogIo {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&content)
    }

    fn entry_mut<'a>(
        data: &'a mut CatalogData,
        name: &str,
        route: AdministrationRoute,
    ) -> &'a mut RoaEntry {
        data.substances
            .entry(key(name))
            .or_insert_with(|| SubstanceEntry {
                name: name.trim().to_string(),
                roas: HashMap::new(),
            })
            .roas
            .entry(route)
            .or_default()
    }

    /// Set the documented durations for a substance and route.
    pub fn insert_duration(&self, name: &str, route: AdministrationRoute, duration: RoaDuration) {
        let mut data = self.data.write();
        Self::entry_mut(&mut data, name, route).duration = Some(duration);
    }

    /// Set the documented dose thresholds for a substance and route.
    pub fn insert_dose(&self, name: &str, route: AdministrationRoute, dose: RoaDose) {
        let mut data = self.data.write();
        Self::entry_mut(&mut data, name, route).dose = Some(dose);
    }

    /// Number of substances in the catalog.
    pub fn len(&self) -> usize {
        self.data.read().substances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Set the health status for testing failures.
    pub fn set_healthy(&self, healthy: bool) {
        self.data.write().is_healthy = healthy;
    }

    fn roa_entry(&self, name: &str, route: AdministrationRoute) -> Option<RoaEntry> {
        let data = self.data.read();
        data.substances
            .get(&key(name))
            .and_then(|substance| substance.roas.get(&route))
            .cloned()
    }
}

impl Default for SubstanceCatalog {
    fn default() -> Self {
        Self::new()
    }
}

impl DurationLookup for SubstanceCatalog {
    fn roa_duration(&self, substance_name: &str, route: AdministrationRoute) -> Option<RoaDuration> {
        self.roa_entry(substance_name, route).and_then(|entry| entry.duration)
    }

    fn roa_dose(&self, substance_name: &str, route: AdministrationRoute) -> Option<RoaDose> {
        self.roa_entry(substance_name, route).and_then(|entry| entry.dose)
    }
}

impl SubstanceRepository for SubstanceCatalog {
    fn health_check(&self) -> bool {
        self.data.read().is_healthy
    }

    fn substance_names(&self) -> Vec<String> {
        let data = self.data.read();
        let mut names: Vec<String> = data.substances.values().map(|s| s.name.clone()).collect();
        names.sort();
        names
    }
}
