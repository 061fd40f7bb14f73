//! Repository listing data model (`svn list`)

use chrono::NaiveDateTime;

use super::NodeKind;

/// One entry of a repository directory listing
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RepositoryEntry {
    /// Entry name without the trailing `/`
    pub name: String,
    pub node_kind: NodeKind,
    /// Last changed revision (verbose/XML listings only)
    pub revision: Option<u64>,
    pub author: Option<String>,
    /// Size in bytes (files only)
    pub size: Option<u64>,
    /// Last modification time, as printed (no timezone in text mode)
    pub last_modified: Option<NaiveDateTime>,
    pub is_locked: bool,
}

impl RepositoryEntry {
    pub fn new(name: impl Into<String>, node_kind: NodeKind) -> Self {
        Self {
            name: name.into(),
            node_kind,
            ..Default::default()
        }
    }
}
