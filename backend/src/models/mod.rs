//! Domain types shared by the timeline services.
//!
//! - [`duration`]: documented duration ranges and their availability
//! - [`ingestion`]: journal entries consumed by the engine
//! - [`timeline`]: normalized geometry produced for renderers

pub mod duration;
pub mod ingestion;
pub mod timeline;

pub use duration::*;
pub use ingestion::*;
pub use timeline::*;
