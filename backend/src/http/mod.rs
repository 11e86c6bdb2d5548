//! HTTP server module for the timeline engine.
//!
//! An axum-based REST boundary over the pure services. Handlers parse and
//! validate requests, run the computation and serialize the model; no
//! state is kept between requests apart from the substance catalog.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │  HTTP Layer (axum handlers)                              │
//! │  - Request parsing and validation                        │
//! │  - JSON serialization/deserialization                    │
//! │  - CORS, compression, error handling                     │
//! └───────────────────┬──────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼──────────────────────────────────────┐
//! │  Service Layer (services/)                               │
//! │  - compute_timeline                                      │
//! └───────────────────┬──────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼──────────────────────────────────────┐
//! │  Substance data (db/)                                    │
//! │  - SubstanceRepository / SubstanceCatalog                │
//! └──────────────────────────────────────────────────────────┘
//! ```

pub mod dto;
pub mod error;
pub mod handlers;
pub mod router;
pub mod state;

pub use router::create_router;
pub use state::AppState;
