//! Data models for svnlens
//!
//! This module contains UI-independent data structures representing
//! Subversion concepts like path statuses, revisions, diffs and listings.

mod commit;
mod diff;
mod file_status;
mod info;
mod list;

pub use commit::{ChangeAction, ChangedPath, CommitEntry};
pub use diff::{DiffLine, DiffLineKind, DiffResult};
pub use file_status::{FileStatus, NodeKind, StatusCode};
pub use info::{ConflictInfo, ItemInfo, LockInfo, Schedule};
pub use list::RepositoryEntry;
