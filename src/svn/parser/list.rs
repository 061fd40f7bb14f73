//! List output parser (svn list)

use chrono::{Datelike, Local, NaiveDate, NaiveDateTime};
use roxmltree::{Document, Node};

use super::date::parse_svn_date;
use super::xml::{self, child, child_text};
use super::{LIST_VERBOSE_REGEX, Parser, parse_revision};
use crate::model::{NodeKind, RepositoryEntry};

/// Month abbreviations as printed by `svn list -v`
const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

impl Parser {
    /// Parse `svn list` text output, verbose or plain
    ///
    /// Dates printed with a time and no year are placed in the current
    /// local year.
    pub fn parse_list_text(output: &str) -> Vec<RepositoryEntry> {
        Self::parse_list_text_with_year(output, Local::now().year())
    }

    /// Parse `svn list` text output with an explicit "current" year
    ///
    /// Formats:
    /// ```text
    ///      42 alice              2048 Jan 10 12:00 main.rs
    ///      40 bob                     Mar 02  2023 docs/
    /// plain-name.txt
    /// subdir/
    /// ```
    pub fn parse_list_text_with_year(output: &str, current_year: i32) -> Vec<RepositoryEntry> {
        output
            .lines()
            .filter_map(|line| Self::parse_list_line(line, current_year))
            .collect()
    }

    fn parse_list_line(line: &str, current_year: i32) -> Option<RepositoryEntry> {
        let line = line.trim_end_matches('\r');
        if line.trim().is_empty() {
            return None;
        }

        if line.trim_start().starts_with(|c: char| c.is_ascii_digit())
            && let Some(entry) = Self::parse_list_verbose(line, current_year)
        {
            return Some(entry);
        }

        Some(named_entry(line.trim()))
    }

    fn parse_list_verbose(line: &str, current_year: i32) -> Option<RepositoryEntry> {
        let caps = LIST_VERBOSE_REGEX.captures(line)?;

        let mut entry = named_entry(caps[8].trim());
        entry.revision = caps[1].parse().ok();
        entry.author = Some(caps[2].to_string());
        entry.is_locked = caps.get(3).is_some();
        entry.size = caps.get(4).and_then(|m| m.as_str().parse().ok());
        if entry.node_kind == NodeKind::Unknown {
            entry.node_kind = NodeKind::File;
        }
        entry.last_modified = parse_list_date(&caps[5], &caps[6], &caps[7], current_year);

        Some(entry)
    }

    /// Parse `svn list --xml` output
    pub fn parse_list_xml(output: &str) -> Vec<RepositoryEntry> {
        xml::parse_document(output)
            .map(|doc| Self::parse_list_structured(&doc))
            .unwrap_or_default()
    }

    /// Parse an `svn list --xml` document
    pub fn parse_list_structured(doc: &Document) -> Vec<RepositoryEntry> {
        doc.descendants()
            .filter(|n| n.has_tag_name("entry"))
            .filter_map(Self::parse_list_entry)
            .collect()
    }

    fn parse_list_entry(node: Node) -> Option<RepositoryEntry> {
        let Some(name) = child_text(node, "name") else {
            tracing::debug!("skipping list entry without a name");
            return None;
        };

        let kind = node
            .attribute("kind")
            .map(NodeKind::from_word)
            .unwrap_or_default();
        let mut entry = RepositoryEntry::new(name.trim_end_matches('/'), kind);

        entry.size = child_text(node, "size").and_then(|s| s.parse().ok());
        entry.is_locked = child(node, "lock").is_some();
        if let Some(commit) = child(node, "commit") {
            entry.revision = commit.attribute("revision").and_then(parse_revision);
            entry.author = child_text(commit, "author").map(str::to_string);
            entry.last_modified = child_text(commit, "date")
                .and_then(parse_svn_date)
                .map(|dt| dt.naive_utc());
        }

        Some(entry)
    }
}

/// Entry from a bare name; a trailing `/` marks a directory
fn named_entry(name: &str) -> RepositoryEntry {
    match name.strip_suffix('/') {
        Some(dir) => RepositoryEntry::new(dir, NodeKind::Directory),
        None => RepositoryEntry::new(name, NodeKind::File),
    }
}

/// Build a timestamp from the `Mon DD HH:MM` / `Mon DD YYYY` columns
fn parse_list_date(month: &str, day: &str, tail: &str, current_year: i32) -> Option<NaiveDateTime> {
    let month = MONTHS
        .iter()
        .position(|m| m.eq_ignore_ascii_case(month))
        .and_then(|i| u32::try_from(i + 1).ok())?;
    let day: u32 = day.parse().ok()?;

    let (year, hour, minute) = match tail.split_once(':') {
        Some((hour, minute)) => (current_year, hour.parse().ok()?, minute.parse().ok()?),
        None => (tail.parse().ok()?, 0, 0),
    };

    NaiveDate::from_ymd_opt(year, month, day)?.and_hms_opt(hour, minute, 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_month_table_is_complete() {
        assert_eq!(MONTHS.len(), 12);
        assert_eq!(
            parse_list_date("Dec", "31", "1999", 2024),
            NaiveDate::from_ymd_opt(1999, 12, 31).and_then(|d| d.and_hms_opt(0, 0, 0))
        );
    }

    #[test]
    fn test_parse_list_date_with_time() {
        assert_eq!(
            parse_list_date("jan", "5", "09:30", 2024),
            NaiveDate::from_ymd_opt(2024, 1, 5).and_then(|d| d.and_hms_opt(9, 30, 0))
        );
    }

    #[test]
    fn test_parse_list_date_invalid() {
        assert_eq!(parse_list_date("Foo", "5", "09:30", 2024), None);
        assert_eq!(parse_list_date("Feb", "30", "2023", 2024), None);
        assert_eq!(parse_list_date("Feb", "3", "25:99", 2024), None);
    }
}
