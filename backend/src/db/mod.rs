//! Substance data access for the timeline engine.
//!
//! The engine depends only on the [`DurationLookup`] trait, so callers inject
//! whatever backs their substance data.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │  Timeline services (compute_timeline)                   │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │ DurationLookup
//! ┌───────────────────▼─────────────────────────────────────┐
//! │  SubstanceRepository (adds listing and health)          │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//!     ┌───────────────▼──────────────────────────────┐
//!     │  SubstanceCatalog (in-memory, JSON loadable) │
//!     └──────────────────────────────────────────────┘
//! ```

pub mod repositories;
pub mod repository;

pub use repositories::SubstanceCatalog;
pub use repository::{DurationLookup, SubstanceRepository};
