//! Status output parser (svn status)

use std::path::Path;

use roxmltree::{Document, Node};

use super::super::constants::markers;
use super::xml::{self, child, child_text};
use super::{Parser, parse_revision};
use crate::model::{FileStatus, NodeKind, StatusCode};

/// Width of the fixed status prefix, including the separating space
const STATUS_PREFIX_WIDTH: usize = 8;

/// Auxiliary flag characters svn may print ahead of the path
const PATH_MARKERS: &[char] = &['+', '*', 'S', 'B', 'C', 'E', 'O'];

/// `status -u` layout: out-of-date marker, working revision, path
const UPDATE_MARKER_COLUMN: usize = 8;
const UPDATE_REVISION_COLUMN: usize = 10;
const UPDATE_REVISION_WIDTH: usize = 8;
const UPDATE_PATH_COLUMN: usize = 21;

/// Lock columns (column 5) that mean the path is locked
const LOCK_FLAGS: &[char] = &['K', 'O', 'T'];

impl Parser {
    /// Parse `svn status` text output
    ///
    /// Node kinds are only known for paths printed with a trailing
    /// separator; everything else is [`NodeKind::Unknown`].
    pub fn parse_status_text(output: &str) -> Vec<FileStatus> {
        Self::parse_status_lines(output, None)
    }

    /// Parse `svn status` text output, resolving node kinds on disk
    ///
    /// Relative paths are probed against `working_copy`. Paths that do not
    /// exist (deleted or missing items) resolve to [`NodeKind::File`].
    pub fn parse_status_text_in(output: &str, working_copy: &Path) -> Vec<FileStatus> {
        Self::parse_status_lines(output, Some(working_copy))
    }

    fn parse_status_lines(output: &str, probe_root: Option<&Path>) -> Vec<FileStatus> {
        output
            .lines()
            .filter_map(|line| Self::parse_status_line(line, probe_root))
            .collect()
    }

    /// Parse a single status line into FileStatus
    ///
    /// Layout:
    /// ```text
    /// M       src/main.rs
    /// ?       notes.txt
    ///  M      docs/
    /// A  +    copied.rs
    ///       C conflicted_dir
    /// ```
    /// Column 0 is the item status, column 1 the property status, columns
    /// 2..7 either a revision number or flag columns, and the path starts
    /// at column 8. `status -u` output carries extra fixed columns, see
    /// `split_update_columns`. Unknown status characters read as no change.
    pub(super) fn parse_status_line(line: &str, probe_root: Option<&Path>) -> Option<FileStatus> {
        let line = line.trim_end_matches('\r');
        if [
            markers::STATUS_AGAINST,
            markers::EXTERNAL_STATUS,
            markers::CHANGELIST,
        ]
        .iter()
        .any(|prefix| line.starts_with(prefix))
            || line.trim_start().starts_with('>')
        {
            return None;
        }

        let columns: Vec<char> = line.chars().take(STATUS_PREFIX_WIDTH).collect();
        if columns.len() < STATUS_PREFIX_WIDTH || columns[7] != ' ' {
            return None;
        }
        let (path_start, _) = line.char_indices().nth(STATUS_PREFIX_WIDTH)?;

        let mut status = FileStatus::new(String::new());
        status.working_copy_status = status_column(columns[0], line);
        status.property_status = status_column(columns[1], line);

        let field: String = columns[2..7].iter().collect();
        let field = field.trim();
        if !field.is_empty() && field.chars().all(|c| c.is_ascii_digit()) {
            status.revision = field.parse().ok();
        } else if field != "-" {
            status.is_locked = columns[2] == 'L' || LOCK_FLAGS.contains(&columns[5]);
            if columns[6] == 'C' {
                status.tree_conflict = Some("tree conflict".to_string());
            }
        }

        let (rest, out_of_date) = match split_update_columns(line) {
            Some((out_of_date, revision, path)) => {
                status.revision = status.revision.or(revision);
                (path, out_of_date)
            }
            None => strip_path_markers(&line[path_start..]),
        };
        if out_of_date {
            status.repository_status = StatusCode::Modified;
        }

        let path = rest.trim();
        if path.is_empty() {
            return None;
        }
        status.path = path.to_string();
        status.node_kind = infer_node_kind(path, probe_root);

        Some(finish_status(status))
    }

    /// Parse `svn status --xml` output
    ///
    /// Malformed XML yields an empty list.
    pub fn parse_status_xml(output: &str) -> Vec<FileStatus> {
        xml::parse_document(output)
            .map(|doc| Self::parse_status_structured(&doc))
            .unwrap_or_default()
    }

    /// Parse an `svn status --xml` document
    pub fn parse_status_structured(doc: &Document) -> Vec<FileStatus> {
        doc.descendants()
            .filter(|n| n.has_tag_name("entry"))
            .filter_map(Self::parse_status_entry)
            .collect()
    }

    /// Parse one `<entry path="...">` element
    fn parse_status_entry(entry: Node) -> Option<FileStatus> {
        let path = entry.attribute("path").map(str::trim).filter(|p| !p.is_empty());
        let Some(path) = path else {
            tracing::debug!("skipping status entry without a path");
            return None;
        };

        let mut status = FileStatus::new(path);

        if let Some(wc) = child(entry, "wc-status") {
            status.working_copy_status = StatusCode::from_word(wc.attribute("item").unwrap_or(""));
            status.property_status = StatusCode::from_word(wc.attribute("props").unwrap_or(""));
            status.revision = wc.attribute("revision").and_then(parse_revision);
            if wc.attribute("tree-conflicted") == Some("true") {
                status.tree_conflict = Some("tree conflict".to_string());
            }
            if let Some(commit) = child(wc, "commit") {
                status.last_changed_revision = commit.attribute("revision").and_then(parse_revision);
                status.last_changed_author = child_text(commit, "author").map(str::to_string);
            }
            status.is_locked |= child(wc, "lock").is_some();
        }

        if let Some(repos) = child(entry, "repos-status") {
            status.repository_status =
                StatusCode::from_word(repos.attribute("item").unwrap_or(""));
            status.is_locked |= child(repos, "lock").is_some();
        }

        if let Some(tree_conflict) = entry.descendants().find(|n| n.has_tag_name("tree-conflict")) {
            status.tree_conflict = Some(describe_tree_conflict(tree_conflict));
        }
        status.has_conflict = entry.descendants().any(|n| n.has_tag_name("conflict"));

        status.node_kind = match entry.attribute("kind").map(NodeKind::from_word) {
            Some(kind) if kind != NodeKind::Unknown => kind,
            _ => infer_node_kind(path, None),
        };

        Some(finish_status(status))
    }
}

/// Infer the node kind of a status path
///
/// A trailing separator means a directory. Otherwise, with a probe root the
/// filesystem decides (not found means file); without one the kind is
/// unknown.
pub fn infer_node_kind(path: &str, probe_root: Option<&Path>) -> NodeKind {
    if path.ends_with(['/', '\\']) {
        return NodeKind::Directory;
    }

    match probe_root {
        Some(root) if root.join(path).is_dir() => NodeKind::Directory,
        Some(_) => NodeKind::File,
        None => NodeKind::Unknown,
    }
}

/// Derive flags that both formats compute the same way
fn finish_status(mut status: FileStatus) -> FileStatus {
    status.has_conflict |= status.working_copy_status == StatusCode::Conflicted
        || status.property_status == StatusCode::Conflicted
        || status.tree_conflict.is_some();
    status
}

/// Strip single-character flag markers that are followed by whitespace
///
/// Returns the remainder and whether the out-of-date marker `*` was seen.
fn strip_path_markers(rest: &str) -> (&str, bool) {
    let mut rest = rest;
    let mut out_of_date = false;

    loop {
        let trimmed = rest.trim_start();
        let mut chars = trimmed.chars();
        match (chars.next(), chars.next()) {
            (Some(marker), Some(next)) if PATH_MARKERS.contains(&marker) && next.is_whitespace() => {
                out_of_date |= marker == '*';
                rest = &trimmed[marker.len_utf8()..];
            }
            _ => return (trimmed, out_of_date),
        }
    }
}

/// Split the fixed `status -u` columns off a line
///
/// ```text
/// M       *       44   src/main.rs
/// ?                    new file.txt
/// ```
/// Column 8 is the out-of-date marker, columns 10..18 the right-aligned
/// working revision (blank or `-` when there is none) and the path starts
/// at column 21. Returns `None` for lines without that layout.
fn split_update_columns(line: &str) -> Option<(bool, Option<u64>, &str)> {
    let (path_start, _) = line.char_indices().nth(UPDATE_PATH_COLUMN)?;
    let head: Vec<char> = line.chars().take(UPDATE_PATH_COLUMN).collect();

    let out_of_date = match head[UPDATE_MARKER_COLUMN] {
        '*' => true,
        ' ' => false,
        _ => return None,
    };
    let revision_end = UPDATE_REVISION_COLUMN + UPDATE_REVISION_WIDTH;
    if head[UPDATE_MARKER_COLUMN + 1] != ' ' || head[revision_end..].iter().any(|&c| c != ' ') {
        return None;
    }

    let field: String = head[UPDATE_REVISION_COLUMN..revision_end].iter().collect();
    let revision = match field.trim_start() {
        "" | "-" => None,
        digits if digits.chars().all(|c| c.is_ascii_digit()) => digits.parse().ok(),
        _ => return None,
    };

    Some((out_of_date, revision, &line[path_start..]))
}

/// Map a status column, treating characters svn may add later as no change
fn status_column(c: char, line: &str) -> StatusCode {
    StatusCode::from_char(c).unwrap_or_else(|| {
        tracing::debug!(column = %c, line, "unknown status character");
        StatusCode::None
    })
}

/// Summarize a `<tree-conflict>` element
fn describe_tree_conflict(node: Node) -> String {
    match (
        node.attribute("reason"),
        node.attribute("action"),
        node.attribute("operation"),
    ) {
        (Some(reason), Some(action), Some(operation)) => {
            format!("local {reason}, incoming {action} upon {operation}")
        }
        _ => "tree conflict".to_string(),
    }
}
