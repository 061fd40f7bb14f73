//! Log output parser (svn log)

use roxmltree::{Document, Node};

use super::super::constants::markers;
use super::date::parse_svn_date;
use super::xml::{self, child, child_text};
use super::{CHANGED_PATH_REGEX, Parser, parse_revision};
use crate::model::{ChangeAction, ChangedPath, CommitEntry, NodeKind};

/// Author placeholder printed for revisions without `svn:author`
const NO_AUTHOR: &str = "(no author)";

/// Header fields of one text log entry
struct LogHeader<'a> {
    revision: u64,
    author: &'a str,
    date: &'a str,
    /// Message line count, when the header carries one (not with `-q`)
    line_count: Option<usize>,
}

impl Parser {
    /// Parse `svn log` text output (with or without `-v`)
    ///
    /// Format:
    /// ```text
    /// ------------------------------------------------------------------------
    /// r100 | alice | 2024-01-10 12:00:00 +0000 (Wed, 10 Jan 2024) | 1 line
    /// Changed paths:
    ///    M /trunk/src/main.rs
    ///    A /branches/b1 (from /trunk:99)
    ///
    /// Fix the build
    /// ------------------------------------------------------------------------
    /// ```
    ///
    /// Entries are returned in the order svn printed them.
    pub fn parse_log_text(output: &str) -> Vec<CommitEntry> {
        let lines: Vec<&str> = output.lines().map(|l| l.trim_end_matches('\r')).collect();
        let mut entries = Vec::new();
        let mut i = 0;

        while i < lines.len() {
            let Some(header) = Self::parse_log_header(lines[i]) else {
                i += 1;
                continue;
            };
            i += 1;

            let mut changed_paths = Vec::new();
            let mut message_lines = Vec::new();

            if lines.get(i).is_some_and(|l| l.trim() == markers::CHANGED_PATHS) {
                i += 1;
                while let Some(line) = lines.get(i) {
                    if line.trim().is_empty() || is_separator(line) {
                        break;
                    }
                    match Self::parse_changed_path(line.trim_start()) {
                        Some(path) => changed_paths.push(path),
                        None => message_lines.push(*line),
                    }
                    i += 1;
                }
            }

            // Blank line between the header block and the message
            if lines.get(i).is_some_and(|l| l.trim().is_empty()) {
                i += 1;
            }

            // The declared line count holds only if a separator (or the end
            // of output) follows the counted lines. Otherwise the count is off
            // (bare CRs in the message, for instance) and the message runs to
            // the next separator that precedes another entry.
            let end = header
                .line_count
                .map(|count| i + count)
                .filter(|&end| end <= lines.len() && lines.get(end).is_none_or(|l| is_separator(l)))
                .unwrap_or_else(|| Self::find_entry_end(&lines, i));
            message_lines.extend_from_slice(&lines[i..end]);
            i = end;

            entries.push(commit_entry(
                header.revision,
                header.author,
                header.date,
                join_message(&message_lines),
                changed_paths,
            ));
        }

        entries
    }

    /// Parse the `r<rev> | <author> | <date> | <n> line(s)` header
    fn parse_log_header(line: &str) -> Option<LogHeader<'_>> {
        let rest = line.strip_prefix('r')?;
        let fields: Vec<&str> = rest.split(" | ").collect();
        if fields.len() != 3 && fields.len() != 4 {
            return None;
        }

        let revision = fields[0].trim().parse().ok()?;
        let line_count = fields.get(3).and_then(|f| {
            let (count, unit) = f.trim().split_once(' ')?;
            matches!(unit, "line" | "lines")
                .then(|| count.parse::<usize>().ok())
                .flatten()
        });
        if fields.len() == 4 && line_count.is_none() {
            return None;
        }

        Some(LogHeader {
            revision,
            author: fields[1].trim(),
            date: fields[2].trim(),
            line_count,
        })
    }

    /// Index of the separator closing the entry whose message starts at `start`
    ///
    /// A dashed line only closes the entry when it is followed by the end of
    /// output, a blank line or another entry header.
    fn find_entry_end(lines: &[&str], start: usize) -> usize {
        (start..lines.len())
            .find(|&j| {
                is_separator(lines[j])
                    && lines.get(j + 1).is_none_or(|next| {
                        next.trim().is_empty() || Self::parse_log_header(next).is_some()
                    })
            })
            .unwrap_or(lines.len())
    }

    /// Parse a changed-path line like `A /branches/b1 (from /trunk:99)`
    pub(super) fn parse_changed_path(line: &str) -> Option<ChangedPath> {
        let caps = CHANGED_PATH_REGEX.captures(line.trim_end())?;
        let action = caps[1].chars().next().map(ChangeAction::from_char)?;
        let mut changed = ChangedPath::new(&caps[2], action);

        if let (Some(from_path), Some(from_rev)) = (caps.get(3), caps.get(4)) {
            changed.copy_source = from_rev
                .as_str()
                .parse()
                .ok()
                .map(|rev| (from_path.as_str().to_string(), rev));
        }

        Some(changed)
    }

    /// Parse `svn log --xml` output
    ///
    /// Malformed XML yields an empty list.
    pub fn parse_log_xml(output: &str) -> Vec<CommitEntry> {
        xml::parse_document(output)
            .map(|doc| Self::parse_log_structured(&doc))
            .unwrap_or_default()
    }

    /// Parse an `svn log --xml` document
    ///
    /// Only top-level `<logentry>` elements are entries; entries nested by
    /// `-g` (merge history) are ignored. Entries without a readable
    /// revision are skipped.
    pub fn parse_log_structured(doc: &Document) -> Vec<CommitEntry> {
        doc.root_element()
            .children()
            .filter(|n| n.has_tag_name("logentry"))
            .filter_map(Self::parse_log_entry)
            .collect()
    }

    fn parse_log_entry(entry: Node) -> Option<CommitEntry> {
        let Some(revision) = entry.attribute("revision").and_then(parse_revision) else {
            tracing::debug!("skipping logentry without a revision");
            return None;
        };

        let changed_paths = child(entry, "paths")
            .map(|paths| {
                paths
                    .children()
                    .filter(|n| n.has_tag_name("path"))
                    .filter_map(parse_path_element)
                    .collect()
            })
            .unwrap_or_default();

        let message = child(entry, "msg")
            .and_then(|n| n.text())
            .unwrap_or("")
            .trim_end()
            .to_string();

        Some(commit_entry(
            revision,
            child_text(entry, "author").unwrap_or(""),
            child_text(entry, "date").unwrap_or(""),
            message,
            changed_paths,
        ))
    }
}

/// Build a CommitEntry from fields both formats share
fn commit_entry(
    revision: u64,
    author: &str,
    date: &str,
    message: String,
    changed_paths: Vec<ChangedPath>,
) -> CommitEntry {
    let author = if author == NO_AUTHOR { "" } else { author };
    CommitEntry {
        revision,
        author: author.to_string(),
        timestamp: parse_svn_date(date).unwrap_or_default(),
        message,
        changed_paths,
    }
}

/// Parse one `<path action="M" kind="file">/trunk/a</path>` element
fn parse_path_element(node: Node) -> Option<ChangedPath> {
    let path = node.text().map(str::trim).filter(|p| !p.is_empty())?;
    let action = node
        .attribute("action")
        .and_then(|a| a.chars().next())
        .map(ChangeAction::from_char)
        .unwrap_or_default();

    let mut changed = ChangedPath::new(path, action);
    changed.node_kind = node
        .attribute("kind")
        .map(NodeKind::from_word)
        .unwrap_or_default();

    if let (Some(from_path), Some(from_rev)) = (
        node.attribute("copyfrom-path"),
        node.attribute("copyfrom-rev").and_then(parse_revision),
    ) {
        changed.copy_source = Some((from_path.to_string(), from_rev));
    }

    Some(changed)
}

/// A line made only of dashes
fn is_separator(line: &str) -> bool {
    let line = line.trim_end();
    line.len() >= 3 && line.bytes().all(|b| b == b'-')
}

/// Join message lines, dropping leading and trailing blank lines
fn join_message(lines: &[&str]) -> String {
    let start = lines.iter().position(|l| !l.trim().is_empty());
    let end = lines.iter().rposition(|l| !l.trim().is_empty());
    match (start, end) {
        (Some(start), Some(end)) => lines[start..=end].join("\n"),
        _ => String::new(),
    }
}
