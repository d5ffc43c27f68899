use revgraph_api::Row;
use serde::{Deserialize, Serialize};

/// Identity of a commit shown in the graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Revision {
    /// Full object identifier (e.g., git SHA).
    pub oid: String,
    /// Optional human-friendly reference such as a branch name.
    #[serde(default)]
    pub reference: Option<String>,
    /// Optional summary line describing the revision.
    #[serde(default)]
    pub summary: Option<String>,
    /// Author information when available.
    #[serde(default)]
    pub author: Option<Signature>,
    /// Committer information when available.
    #[serde(default)]
    pub committer: Option<Signature>,
    /// Unix timestamp (seconds) associated with the revision.
    #[serde(default)]
    pub timestamp: Option<i64>,
}

/// Structured author/committer identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Signature {
    /// Display name for the individual.
    pub name: String,
    /// Optional email address.
    #[serde(default)]
    pub email: Option<String>,
}

/// One history row paired with the commit it was derived from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// Graph row for the commit.
    pub row: Row,
    /// Commit metadata for the text beside the row.
    pub revision: Revision,
}
