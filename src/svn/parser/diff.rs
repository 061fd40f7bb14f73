//! Diff output parser (svn diff)

use super::super::constants::markers;
use super::{BINARY_FILES_REGEX, HUNK_HEADER_REGEX, Parser};
use crate::model::{DiffLine, DiffLineKind, DiffResult};

/// Prefixes of file-level header lines
const HEADER_PREFIXES: &[&str] = &["Index:", "diff", "---", "+++", "Property changes on:"];

/// Running line counters inside a hunk
#[derive(Debug, Default, Clone, Copy)]
struct HunkCursor {
    original: Option<u32>,
    modified: Option<u32>,
}

impl HunkCursor {
    fn take_original(&mut self) -> Option<u32> {
        let current = self.original;
        self.original = current.map(|n| n.saturating_add(1));
        current
    }

    fn take_modified(&mut self) -> Option<u32> {
        let current = self.modified;
        self.modified = current.map(|n| n.saturating_add(1));
        current
    }
}

impl Parser {
    /// Parse unified diff output into DiffResult
    ///
    /// A binary marker anywhere in the output short-circuits to a binary
    /// result. Otherwise each line is classified in order: file header,
    /// hunk header, then by its first character. Unrecognized lines are
    /// context.
    ///
    /// Format:
    /// ```text
    /// Index: src/main.rs
    /// ===================================================================
    /// --- src/main.rs	(revision 41)
    /// +++ src/main.rs	(working copy)
    /// @@ -1,3 +1,4 @@
    ///  fn main() {
    /// +    init();
    ///      run();
    ///  }
    /// ```
    pub fn parse_diff(output: &str) -> DiffResult {
        if let Some(message) = find_binary_marker(output) {
            return DiffResult::binary(message);
        }

        let mut result = DiffResult::default();
        let mut cursor = HunkCursor::default();

        for line in output.lines() {
            let line = line.trim_end_matches('\r');

            if is_header(line) {
                cursor = HunkCursor::default();
                result.lines.push(DiffLine::header(line));
                continue;
            }

            if let Some(caps) = HUNK_HEADER_REGEX.captures(line) {
                cursor = HunkCursor {
                    original: caps[1].parse().ok(),
                    modified: caps[2].parse().ok(),
                };
                result.lines.push(DiffLine {
                    kind: DiffLineKind::HunkHeader,
                    content: line.to_string(),
                    original_line_no: cursor.original,
                    modified_line_no: cursor.modified,
                });
                continue;
            }

            result.lines.push(Self::parse_hunk_line(line, &mut cursor));
        }

        result
    }

    /// Classify a line by its leading character
    fn parse_hunk_line(line: &str, cursor: &mut HunkCursor) -> DiffLine {
        if let Some(rest) = line.strip_prefix('+') {
            DiffLine::addition(cursor.take_modified(), rest)
        } else if let Some(rest) = line.strip_prefix('-') {
            DiffLine::deletion(cursor.take_original(), rest)
        } else if let Some(rest) = line.strip_prefix(' ') {
            DiffLine::context(cursor.take_original(), cursor.take_modified(), rest)
        } else if line.is_empty() && cursor.original.is_some() {
            // Empty context line with its trailing space stripped
            DiffLine::context(cursor.take_original(), cursor.take_modified(), "")
        } else {
            // `\ No newline at end of file`, property change text, ...
            DiffLine::context(None, None, line)
        }
    }

    /// Build a position-aligned diff of two line sequences
    ///
    /// Lines are compared index by index, with no attempt at alignment: a
    /// differing pair becomes a deletion followed by an addition, and
    /// surplus lines on either side become pure deletions or additions.
    pub fn build_naive_diff<S: AsRef<str>>(original: &[S], modified: &[S]) -> DiffResult {
        let mut result = DiffResult::default();

        for i in 0..original.len().max(modified.len()) {
            let line_no = u32::try_from(i + 1).ok();
            let old: Option<&str> = original.get(i).map(AsRef::as_ref);
            let new: Option<&str> = modified.get(i).map(AsRef::as_ref);
            match (old, new) {
                (Some(old), Some(new)) if old == new => {
                    result.lines.push(DiffLine::context(line_no, line_no, old));
                }
                (old, new) => {
                    if let Some(old) = old {
                        result.lines.push(DiffLine::deletion(line_no, old));
                    }
                    if let Some(new) = new {
                        result.lines.push(DiffLine::addition(line_no, new));
                    }
                }
            }
        }

        result
    }
}

/// Find a line marking the whole diff as binary
fn find_binary_marker(output: &str) -> Option<String> {
    if let Some(m) = BINARY_FILES_REGEX.find(output) {
        return Some(m.as_str().trim_end().to_string());
    }
    output
        .lines()
        .map(str::trim)
        .find(|line| *line == markers::BINARY_MIME)
        .map(str::to_string)
}

fn is_header(line: &str) -> bool {
    HEADER_PREFIXES.iter().any(|prefix| line.starts_with(prefix))
        || (line.len() >= 3 && line.bytes().all(|b| b == b'='))
}
