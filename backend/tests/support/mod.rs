#![allow(dead_code)]

use std::collections::HashSet;
use std::sync::Mutex;

use chrono::{DateTime, TimeZone, Utc};
use journal_timeline::models::{AdministrationRoute, DurationRange, RoaDose, RoaDuration};
use journal_timeline::SubstanceCatalog;

static ENV_LOCK: Mutex<()> = Mutex::new(());

/// Runs `f` with environment variables temporarily modified.
///
/// Restores the variables on unwind and serializes access to the process
/// environment so parallel tests do not observe each other's changes.
///
/// `changes` is a list of `(key, value)` pairs:
/// - `Some(v)` sets the variable to `v`
/// - `None` removes the variable
pub fn with_scoped_env<F, R>(changes: &[(&str, Option<&str>)], f: F) -> R
where
    F: FnOnce() -> R,
{
    let _lock = ENV_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
    let _guard = ScopedEnv::new(changes);
    f()
}

struct ScopedEnv {
    snapshot: Vec<(String, Option<String>)>,
}

impl ScopedEnv {
    fn new(changes: &[(&str, Option<&str>)]) -> Self {
        let keys: HashSet<&str> = changes.iter().map(|(k, _)| *k).collect();
        let snapshot = keys
            .into_iter()
            .map(|k| (k.to_string(), std::env::var(k).ok()))
            .collect::<Vec<_>>();

        for (k, v) in changes {
            match v {
                Some(val) => std::env::set_var(k, val),
                None => std::env::remove_var(k),
            }
        }

        Self { snapshot }
    }
}

impl Drop for ScopedEnv {
    fn drop(&mut self) {
        for (k, v) in self.snapshot.drain(..) {
            match v {
                Some(val) => std::env::set_var(&k, val),
                None => std::env::remove_var(&k),
            }
        }
    }
}

/// A fixed instant on 2024-05-04 UTC.
pub fn at(hour: u32, minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 4, hour, minute, 0).unwrap()
}

/// Onset 30-60 min, comeup 60-120 min, peak 60-120 min, offset 60-120 min.
pub fn complete_duration() -> RoaDuration {
    RoaDuration {
        onset: Some(DurationRange::from_minutes(30.0, 60.0).unwrap()),
        comeup: Some(DurationRange::from_minutes(60.0, 120.0).unwrap()),
        peak: Some(DurationRange::from_minutes(60.0, 120.0).unwrap()),
        offset: Some(DurationRange::from_minutes(60.0, 120.0).unwrap()),
        ..Default::default()
    }
}

/// Catalog with complete oral MDMA data (plus dose thresholds) and smoked
/// cannabis missing its offset.
pub fn create_test_catalog() -> SubstanceCatalog {
    let catalog = SubstanceCatalog::new();
    catalog.insert_duration("MDMA", AdministrationRoute::Oral, complete_duration());
    catalog.insert_dose(
        "MDMA",
        AdministrationRoute::Oral,
        RoaDose {
            units: "mg".to_string(),
            light_min: Some(40.0),
            common_min: Some(75.0),
            strong_min: Some(140.0),
            heavy_min: Some(180.0),
        },
    );
    catalog.insert_duration(
        "Cannabis",
        AdministrationRoute::Smoked,
        RoaDuration {
            offset: None,
            ..complete_duration()
        },
    );
    catalog
}

pub const CATALOG_JSON: &str = r#"{
    "substances": [
        {
            "name": "Caffeine",
            "roas": [
                {
                    "route": "oral",
                    "duration": {
                        "onset": { "min": 5, "max": 10, "units": "minutes" },
                        "comeup": { "min": 10, "max": 20, "units": "minutes" },
                        "peak": { "min": 30, "max": 60, "units": "minutes" },
                        "offset": { "min": 1.5, "max": 2.5, "units": "hours" },
                        "total": { "min": 2.5, "max": 4, "units": "hours" }
                    },
                    "dose": { "units": "mg", "light_min": 10, "common_min": 50, "strong_min": 150, "heavy_min": 500 }
                }
            ]
        },
        {
            "name": "LSD",
            "roas": [
                {
                    "route": "sublingual",
                    "duration": {
                        "onset": { "min": 20, "max": 40, "units": "minutes" },
                        "comeup": { "min": 1, "max": 1.5, "units": "hours" },
                        "peak": { "min": 3, "max": 5, "units": "hours" },
                        "offset": { "min": 3, "max": 5, "units": "hours" }
                    }
                }
            ]
        },
        {
            "name": "Kratom",
            "roas": [
                {
                    "route": "oral",
                    "duration": {
                        "onset": { "min": 10, "max": 15, "units": "minutes" },
                        "peak": { "min": 1, "max": 2, "units": "hours" }
                    }
                }
            ]
        }
    ]
}"#;
