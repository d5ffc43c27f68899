//! Core library for laying out and rendering revision history graphs.
//!
//! The crate is layered around three primary responsibilities:
//! - validating row payloads and computing their pixel layout
//! - replaying a layout onto a pluggable drawing surface
//! - deriving row payloads from a git repository's history

#![warn(
    clippy::all,
    clippy::cargo,
    clippy::nursery,
    clippy::pedantic,
    missing_docs
)]
#![cfg_attr(
    not(test),
    deny(
        clippy::dbg_macro,
        clippy::expect_used,
        clippy::panic,
        clippy::print_stderr,
        clippy::print_stdout,
        clippy::todo,
        clippy::unwrap_used
    )
)]

/// Anchor table standing in for externally rendered rows.
pub mod anchors;
/// Public data models for history output.
pub mod api;
/// Renderer configuration.
pub mod config;
/// Lane assignment turning commit parentage into rows.
pub mod history;
/// Pixel layout of rows, edges and vertices.
pub mod layout;
/// Per-view graph renderer.
pub mod renderer;
/// Git repository access and history walking.
pub mod repository;
/// Surface backends and the render service.
pub mod surfaces;
/// Input validation for row payloads.
pub mod validate;

pub use anchors::AnchorTable;
pub use api::{HistoryEntry, Revision, Signature};
pub use config::RenderConfig;
pub use layout::{EdgePath, EdgePrimitive, GraphLayout, RowLayout, VertexPrimitive};
pub use renderer::{GraphRenderer, RenderSummary};
pub use revgraph_api::{ColorRef, Edge, Glyph, Palette, Rgb, Row, Vertex};

/// Common result type for the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by the core library.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A row payload failed validation.
    #[error("row {row} ({node}) is invalid: {reason}")]
    InvalidRow {
        /// Zero-based position of the row in the input.
        row: usize,
        /// Node identifier of the offending row.
        node: String,
        /// What was wrong with it.
        reason: String,
    },
    /// No external row element exists for a node.
    #[error("no row anchor found for node {node}")]
    MissingAnchor {
        /// Node identifier that failed to resolve.
        node: String,
    },
    /// An external row element reported an unusable height.
    #[error("row anchor for node {node} has invalid height {height}")]
    InvalidAnchorHeight {
        /// Node identifier of the anchor.
        node: String,
        /// Height reported by the anchor.
        height: f64,
    },
    /// Renderer configuration is unusable.
    #[error("invalid render configuration: {reason}")]
    InvalidConfig {
        /// What was wrong with it.
        reason: String,
    },
    /// The drawing surface rejected an operation.
    #[error("surface error: {source}")]
    Surface {
        /// Original error reported by the backend.
        #[from]
        source: revgraph_surface_api::SurfaceError,
    },
    /// Requested surface backend is unknown.
    #[error("surface backend '{backend}' is not registered")]
    BackendNotRegistered {
        /// Identifier that failed to resolve.
        backend: String,
    },
    /// Underlying git operation failed.
    #[error("git error: {source}")]
    Git {
        /// Original libgit2 error bubbled up by the core library.
        #[from]
        source: git2::Error,
    },
    /// Provided path does not correspond to a git repository.
    #[error("path does not reference a git repository: {path}")]
    NotARepository {
        /// Path that failed to resolve to a repository.
        path: String,
    },
    /// Bare repositories are currently unsupported.
    #[error("repository at {path} is bare and unsupported")]
    BareRepository {
        /// Path of the repository lacking a working tree.
        path: String,
    },
    /// Filesystem interaction failed.
    #[error("failed to access {path}: {source}")]
    Io {
        /// Filesystem path involved in the failed operation.
        path: String,
        /// Source I/O error returned by the standard library.
        #[source]
        source: std::io::Error,
    },
    /// A JSON payload could not be parsed.
    #[error("invalid JSON: {source}")]
    Json {
        /// Original parser error.
        #[from]
        source: serde_json::Error,
    },
}
