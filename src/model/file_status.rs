//! File status data model

use crate::state::Status;

/// Version-control state of one path, as reported by `svn status`
///
/// Each value has exactly one text-mode character and one XML word.
/// Both tables live here and are shared by every parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum StatusCode {
    /// No modifications (`normal` in XML output)
    #[default]
    None,
    Added,
    Deleted,
    Modified,
    Replaced,
    Conflicted,
    Ignored,
    Unversioned,
    Missing,
    Obstructed,
    Incomplete,
    External,
    Merged,
}

impl StatusCode {
    /// Every status code, in declaration order
    pub const ALL: [StatusCode; 13] = [
        StatusCode::None,
        StatusCode::Added,
        StatusCode::Deleted,
        StatusCode::Modified,
        StatusCode::Replaced,
        StatusCode::Conflicted,
        StatusCode::Ignored,
        StatusCode::Unversioned,
        StatusCode::Missing,
        StatusCode::Obstructed,
        StatusCode::Incomplete,
        StatusCode::External,
        StatusCode::Merged,
    ];

    /// Map a text-mode status column character
    ///
    /// Returns `None` for characters outside the table.
    pub fn from_char(c: char) -> Option<Self> {
        let code = match c {
            ' ' => Self::None,
            'A' => Self::Added,
            'C' => Self::Conflicted,
            'D' => Self::Deleted,
            'I' => Self::Ignored,
            'M' => Self::Modified,
            'R' => Self::Replaced,
            'X' => Self::External,
            '?' => Self::Unversioned,
            '!' => Self::Missing,
            '~' => Self::Obstructed,
            'L' => Self::Incomplete,
            'G' => Self::Merged,
            _ => return None,
        };
        Some(code)
    }

    /// Text-mode status column character
    pub fn as_char(self) -> char {
        match self {
            Self::None => ' ',
            Self::Added => 'A',
            Self::Conflicted => 'C',
            Self::Deleted => 'D',
            Self::Ignored => 'I',
            Self::Modified => 'M',
            Self::Replaced => 'R',
            Self::External => 'X',
            Self::Unversioned => '?',
            Self::Missing => '!',
            Self::Obstructed => '~',
            Self::Incomplete => 'L',
            Self::Merged => 'G',
        }
    }

    /// Map an XML status word (case-insensitive)
    ///
    /// Unknown words map to [`StatusCode::None`].
    pub fn from_word(word: &str) -> Self {
        match word.trim().to_ascii_lowercase().as_str() {
            "added" => Self::Added,
            "conflicted" => Self::Conflicted,
            "deleted" => Self::Deleted,
            "ignored" => Self::Ignored,
            "modified" => Self::Modified,
            "replaced" => Self::Replaced,
            "external" => Self::External,
            "unversioned" => Self::Unversioned,
            "missing" => Self::Missing,
            "obstructed" => Self::Obstructed,
            "incomplete" => Self::Incomplete,
            "merged" => Self::Merged,
            _ => Self::None,
        }
    }

    /// XML status word
    pub fn as_word(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Added => "added",
            Self::Conflicted => "conflicted",
            Self::Deleted => "deleted",
            Self::Ignored => "ignored",
            Self::Modified => "modified",
            Self::Replaced => "replaced",
            Self::External => "external",
            Self::Unversioned => "unversioned",
            Self::Missing => "missing",
            Self::Obstructed => "obstructed",
            Self::Incomplete => "incomplete",
            Self::Merged => "merged",
        }
    }
}

/// Kind of node a path refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum NodeKind {
    File,
    Directory,
    /// Not determinable from the command output alone
    #[default]
    Unknown,
}

impl NodeKind {
    /// Map the `kind` word used by svn XML output
    pub fn from_word(word: &str) -> Self {
        match word.trim().to_ascii_lowercase().as_str() {
            "file" => Self::File,
            "dir" | "directory" => Self::Directory,
            _ => Self::Unknown,
        }
    }

    pub fn is_dir(self) -> bool {
        self == Self::Directory
    }
}

/// Status of a single path in the working copy
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FileStatus {
    /// Path as printed by svn (absolute or working-copy relative)
    pub path: String,

    pub node_kind: NodeKind,

    /// Text status of the working copy item
    pub working_copy_status: StatusCode,

    /// Out-of-date status against the repository (`status -u`)
    pub repository_status: StatusCode,

    pub property_status: StatusCode,

    /// Working revision
    pub revision: Option<u64>,

    pub last_changed_revision: Option<u64>,

    pub last_changed_author: Option<String>,

    pub is_locked: bool,

    pub has_conflict: bool,

    /// Description of a tree conflict on this path, if any
    pub tree_conflict: Option<String>,

    /// Child entries (filled in by the tree builder only)
    pub children: Vec<FileStatus>,
}

impl FileStatus {
    /// Create a status record with every field at its default
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            ..Default::default()
        }
    }

    /// Working-copy state used for action gating
    ///
    /// A conflict flag wins over the item column, since a path with only a
    /// property or tree conflict still reports its text status as normal.
    /// Returns `None` for externals, which are not file states.
    pub fn status(&self) -> Option<Status> {
        if self.has_conflict {
            return Some(Status::Conflicted);
        }
        Status::from_code(self.working_copy_status)
    }

    /// Check if the item has any local change worth showing
    pub fn is_changed(&self) -> bool {
        self.working_copy_status != StatusCode::None
            || self.property_status != StatusCode::None
            || self.has_conflict
    }

    /// Final path component
    pub fn file_name(&self) -> &str {
        let trimmed = self.path.trim_end_matches(['/', '\\']);
        trimmed
            .rsplit(['/', '\\'])
            .next()
            .unwrap_or(trimmed)
    }

    /// Total number of nodes in this subtree, including self
    pub fn subtree_len(&self) -> usize {
        1 + self.children.iter().map(FileStatus::subtree_len).sum::<usize>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_code_char_round_trip() {
        for code in StatusCode::ALL {
            assert_eq!(StatusCode::from_char(code.as_char()), Some(code));
        }
    }

    #[test]
    fn test_status_code_word_round_trip() {
        for code in StatusCode::ALL {
            assert_eq!(StatusCode::from_word(code.as_word()), code);
        }
    }

    #[test]
    fn test_status_code_chars_are_unique() {
        let mut chars: Vec<char> = StatusCode::ALL.iter().map(|c| c.as_char()).collect();
        chars.sort_unstable();
        chars.dedup();
        assert_eq!(chars.len(), StatusCode::ALL.len());
    }

    #[test]
    fn test_status_code_word_is_case_insensitive() {
        assert_eq!(StatusCode::from_word("MODIFIED"), StatusCode::Modified);
        assert_eq!(StatusCode::from_word(" Unversioned "), StatusCode::Unversioned);
    }

    #[test]
    fn test_status_code_unknown_values() {
        assert_eq!(StatusCode::from_char('Z'), None);
        assert_eq!(StatusCode::from_word("normal"), StatusCode::None);
        assert_eq!(StatusCode::from_word("bogus"), StatusCode::None);
    }

    #[test]
    fn test_node_kind_from_word() {
        assert_eq!(NodeKind::from_word("file"), NodeKind::File);
        assert_eq!(NodeKind::from_word("dir"), NodeKind::Directory);
        assert_eq!(NodeKind::from_word("symlink"), NodeKind::Unknown);
    }

    #[test]
    fn test_file_name() {
        assert_eq!(FileStatus::new("src/main.rs").file_name(), "main.rs");
        assert_eq!(FileStatus::new("src\\lib\\").file_name(), "lib");
        assert_eq!(FileStatus::new("top").file_name(), "top");
    }

    #[test]
    fn test_status_conflict_flag_wins() {
        let mut file = FileStatus::new("a.txt");
        file.working_copy_status = StatusCode::None;
        assert_eq!(file.status(), Some(Status::Normal));

        file.has_conflict = true;
        assert_eq!(file.status(), Some(Status::Conflicted));
    }

    #[test]
    fn test_status_external_has_no_state() {
        let mut file = FileStatus::new("vendor");
        file.working_copy_status = StatusCode::External;
        assert_eq!(file.status(), None);
    }

    #[test]
    fn test_is_changed() {
        let mut file = FileStatus::new("a.txt");
        assert!(!file.is_changed());
        file.property_status = StatusCode::Modified;
        assert!(file.is_changed());
    }

    #[test]
    fn test_subtree_len() {
        let mut dir = FileStatus::new("a");
        dir.children.push(FileStatus::new("a/b"));
        dir.children.push(FileStatus::new("a/c"));
        dir.children[0].children.push(FileStatus::new("a/b/d"));
        assert_eq!(dir.subtree_len(), 4);
    }
}
