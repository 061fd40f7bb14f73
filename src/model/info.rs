//! Item metadata data model (`svn info`)

use chrono::{DateTime, Utc};

use super::NodeKind;

/// Metadata for a single working-copy or repository item
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ItemInfo {
    pub path: String,
    pub name: String,
    pub node_kind: NodeKind,

    pub url: String,
    /// `^/`-prefixed URL relative to the repository root
    pub relative_url: String,
    pub repository_root_url: String,
    pub repository_uuid: String,
    /// Empty for repository URLs
    pub working_copy_root: String,

    pub revision: u64,
    pub last_changed_revision: u64,
    pub last_changed_author: String,
    pub last_changed_date: Option<DateTime<Utc>>,

    pub schedule: Schedule,
    /// Checkout depth (`infinity`, `empty`, ...)
    pub depth: String,
    pub checksum: String,

    pub lock: Option<LockInfo>,
    pub conflict: Option<ConflictInfo>,
    pub tree_conflict: Option<String>,
}

impl ItemInfo {
    /// Check if the record carries any data at all
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Lock details
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LockInfo {
    pub token: String,
    pub owner: String,
    pub comment: String,
    pub created: Option<DateTime<Utc>>,
}

/// Files left behind by a text conflict
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ConflictInfo {
    /// Base revision file before the operation
    pub old_file: Option<String>,
    /// Local working file
    pub working_file: Option<String>,
    /// Incoming revision file
    pub new_file: Option<String>,
    /// Rejected property changes
    pub property_file: Option<String>,
}

/// Pending operation recorded against a path
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Schedule {
    #[default]
    Normal,
    Add,
    Delete,
    Replace,
}

impl Schedule {
    pub fn from_word(word: &str) -> Self {
        match word.trim().to_ascii_lowercase().as_str() {
            "add" => Self::Add,
            "delete" => Self::Delete,
            "replace" => Self::Replace,
            _ => Self::Normal,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schedule_from_word() {
        assert_eq!(Schedule::from_word("add"), Schedule::Add);
        assert_eq!(Schedule::from_word("Delete"), Schedule::Delete);
        assert_eq!(Schedule::from_word("replace"), Schedule::Replace);
        assert_eq!(Schedule::from_word("normal"), Schedule::Normal);
        assert_eq!(Schedule::from_word("???"), Schedule::Normal);
    }

    #[test]
    fn test_item_info_is_empty() {
        assert!(ItemInfo::default().is_empty());
        let info = ItemInfo {
            revision: 3,
            ..Default::default()
        };
        assert!(!info.is_empty());
    }
}
