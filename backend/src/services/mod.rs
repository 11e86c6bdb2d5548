//! Service layer for the timeline computation.
//!
//! Services are pure functions over the domain models. They take their
//! substance data through [`crate::db::DurationLookup`] and never touch I/O.
//!
//! - [`weights`]: vertical and horizontal dose weights
//! - [`layering`]: peak windows and inset levels
//! - [`geometry`]: line and around-shape curves for one ingestion
//! - [`axis`]: hour ticks
//! - [`timeline`]: assembly of the full [`crate::models::TimelineModel`]
//! - [`watch_face`]: dial angles derived from an assembled timeline

pub mod axis;
pub mod geometry;
pub mod layering;
pub mod timeline;
pub mod watch_face;
pub mod weights;

pub use axis::AxisOptions;
pub use timeline::{compute_timeline, TimelineInput, TimelineOptions};
pub use watch_face::{WatchFaceArc, WatchFaceModel};
