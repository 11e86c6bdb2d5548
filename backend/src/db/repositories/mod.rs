//! Repository implementations.
//!
//! - `local`: in-memory catalog, loaded from JSON or filled programmatically

pub mod local;

pub use local::SubstanceCatalog;
