//! # Journal Timeline
//!
//! Effect-timeline engine for a substance journal.
//!
//! Given logged ingestions and the documented onset, comeup, peak and offset
//! ranges of each substance, the crate computes a normalized geometric model
//! of the effect curves: dose-weighted heights, dose-stretched peaks, inset
//! levels for concurrent peaks, and an hour axis. Rendering is left to the
//! caller; every coordinate in the model lies in the unit square.
//!
//! ## Architecture
//!
//! - [`models`]: duration ranges, journal entries and the drawable model
//! - [`services`]: the pure computation, entry point [`compute_timeline`]
//! - [`db`]: the duration lookup trait and an in-memory substance catalog
//! - [`config`]: TOML configuration with environment overrides
//! - [`http`]: Axum REST boundary (feature `http-server`)
//!
//! ## Example
//!
//! ```
//! use chrono::Utc;
//! use journal_timeline::{compute_timeline, SubstanceCatalog, TimelineInput, TimelineOptions};
//!
//! let catalog = SubstanceCatalog::new();
//! let model = compute_timeline(
//!     &TimelineInput::default(),
//!     &catalog,
//!     Utc::now(),
//!     &TimelineOptions::default(),
//! );
//! assert_eq!(model.total_width.value(), 7800.0);
//! ```

pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod services;

#[cfg(feature = "http-server")]
pub mod http;

pub use config::TimelineConfig;
pub use db::{DurationLookup, SubstanceCatalog, SubstanceRepository};
pub use error::{Result, TimelineError};
pub use services::{compute_timeline, TimelineInput, TimelineOptions, WatchFaceModel};
