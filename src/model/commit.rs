//! Commit (log entry) data model

use chrono::{DateTime, Utc};

use super::NodeKind;

/// One revision from `svn log`
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CommitEntry {
    pub revision: u64,

    /// Author name (empty for `(no author)`)
    pub author: String,

    /// Commit time (Unix epoch when the date could not be read)
    pub timestamp: DateTime<Utc>,

    /// Full log message, lines joined with `\n`
    pub message: String,

    /// Paths touched by this revision (`svn log -v` only)
    pub changed_paths: Vec<ChangedPath>,
}

impl CommitEntry {
    /// First line of the message
    pub fn summary(&self) -> &str {
        self.message.lines().next().unwrap_or("")
    }

    /// Get a display string for the message
    pub fn display_summary(&self) -> &str {
        let summary = self.summary();
        if summary.is_empty() {
            "(no message)"
        } else {
            summary
        }
    }
}

/// One path touched by a commit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangedPath {
    pub path: String,
    pub action: ChangeAction,
    /// Kind of node, when the XML output reports it
    pub node_kind: NodeKind,
    /// Copy provenance: source path and revision
    pub copy_source: Option<(String, u64)>,
}

impl ChangedPath {
    pub fn new(path: impl Into<String>, action: ChangeAction) -> Self {
        Self {
            path: path.into(),
            action,
            node_kind: NodeKind::Unknown,
            copy_source: None,
        }
    }
}

/// What a commit did to a path
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChangeAction {
    Added,
    Deleted,
    #[default]
    Modified,
    Replaced,
}

impl ChangeAction {
    /// Map an action character; anything unknown is `Modified`
    pub fn from_char(c: char) -> Self {
        match c {
            'A' => Self::Added,
            'D' => Self::Deleted,
            'R' => Self::Replaced,
            _ => Self::Modified,
        }
    }

    pub fn as_char(self) -> char {
        match self {
            Self::Added => 'A',
            Self::Deleted => 'D',
            Self::Modified => 'M',
            Self::Replaced => 'R',
        }
    }
}
