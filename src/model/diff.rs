//! Diff data model
//!
//! Represents parsed output from `svn diff`.

/// Parsed diff output
///
/// A binary diff carries a message and no lines.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct DiffResult {
    /// All diff lines (including headers)
    pub lines: Vec<DiffLine>,
    pub is_binary: bool,
    /// The marker line svn printed for a binary diff
    pub binary_message: Option<String>,
}

impl DiffResult {
    /// Create a binary result
    pub fn binary(message: impl Into<String>) -> Self {
        Self {
            lines: Vec::new(),
            is_binary: true,
            binary_message: Some(message.into()),
        }
    }

    /// Check if there are any added or deleted lines
    pub fn has_changes(&self) -> bool {
        self.is_binary
            || self
                .lines
                .iter()
                .any(|l| matches!(l.kind, DiffLineKind::Addition | DiffLineKind::Deletion))
    }

    /// Count lines of a given kind
    pub fn count(&self, kind: DiffLineKind) -> usize {
        self.lines.iter().filter(|l| l.kind == kind).count()
    }
}

/// A single line in the diff output
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffLine {
    pub kind: DiffLineKind,
    /// Content of the line; hunk lines drop their `+`/`-`/space marker
    pub content: String,
    pub original_line_no: Option<u32>,
    pub modified_line_no: Option<u32>,
}

impl DiffLine {
    /// Create a header line
    pub fn header(content: impl Into<String>) -> Self {
        Self::unnumbered(DiffLineKind::Header, content)
    }

    /// Create a context line
    pub fn context(
        original: Option<u32>,
        modified: Option<u32>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            kind: DiffLineKind::Context,
            content: content.into(),
            original_line_no: original,
            modified_line_no: modified,
        }
    }

    /// Create an added line
    pub fn addition(modified: Option<u32>, content: impl Into<String>) -> Self {
        Self {
            kind: DiffLineKind::Addition,
            content: content.into(),
            original_line_no: None,
            modified_line_no: modified,
        }
    }

    /// Create a deleted line
    pub fn deletion(original: Option<u32>, content: impl Into<String>) -> Self {
        Self {
            kind: DiffLineKind::Deletion,
            content: content.into(),
            original_line_no: original,
            modified_line_no: None,
        }
    }

    fn unnumbered(kind: DiffLineKind, content: impl Into<String>) -> Self {
        Self {
            kind,
            content: content.into(),
            original_line_no: None,
            modified_line_no: None,
        }
    }
}

/// Type of diff line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiffLineKind {
    /// Unchanged line
    Context,
    Addition,
    Deletion,
    /// `Index:`, `---`, `+++` and similar file-level lines
    Header,
    /// `@@ -a,b +c,d @@`
    HunkHeader,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diff_result_default() {
        let result = DiffResult::default();
        assert!(result.lines.is_empty());
        assert!(!result.is_binary);
        assert!(!result.has_changes());
    }

    #[test]
    fn test_binary_has_no_lines() {
        let result = DiffResult::binary("Binary files a and b differ");
        assert!(result.is_binary);
        assert!(result.lines.is_empty());
        assert!(result.has_changes());
    }

    #[test]
    fn test_count_by_kind() {
        let result = DiffResult {
            lines: vec![
                DiffLine::header("Index: a.txt"),
                DiffLine::addition(Some(1), "+x"),
                DiffLine::addition(Some(2), "+y"),
                DiffLine::deletion(Some(1), "-z"),
            ],
            ..Default::default()
        };
        assert_eq!(result.count(DiffLineKind::Addition), 2);
        assert_eq!(result.count(DiffLineKind::Deletion), 1);
        assert!(result.has_changes());
    }
}
