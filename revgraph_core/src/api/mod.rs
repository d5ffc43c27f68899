//! Public data models produced from repository history.
//!
//! The structures in this module are serializable via `serde` so history can
//! be exported as the same JSON payload the renderer consumes.

/// Revision metadata and history rows.
pub mod repository;

pub use repository::{HistoryEntry, Revision, Signature};
