//! Lookup traits for documented substance data.
//!
//! The timeline engine never owns substance data. It asks a [`DurationLookup`]
//! for the durations of a `(substance, route)` pair and treats absence as
//! "cannot be drawn".

use crate::models::{AdministrationRoute, RoaDose, RoaDuration};

/// Source of documented duration (and optionally dose) data.
pub trait DurationLookup: Send + Sync {
    /// Documented durations for a substance taken by `route`, if any.
    fn roa_duration(&self, substance_name: &str, route: AdministrationRoute) -> Option<RoaDuration>;

    /// Documented dose thresholds for a substance taken by `route`, if any.
    fn roa_dose(&self, _substance_name: &str, _route: AdministrationRoute) -> Option<RoaDose> {
        None
    }
}

/// A lookup that can also enumerate its contents, used by the HTTP layer.
pub trait SubstanceRepository: DurationLookup {
    /// Check that the repository is usable.
    fn health_check(&self) -> bool;

    /// Display names of all known substances, sorted.
    fn substance_names(&self) -> Vec<String>;
}

impl<F> DurationLookup for F
where
    F: Fn(&str, AdministrationRoute) -> Option<RoaDuration> + Send + Sync,
{
    fn roa_duration(&self, substance_name: &str, route: AdministrationRoute) -> Option<RoaDuration> {
        self(substance_name, route)
    }
}
