//! Info output parser (svn info)
//!
//! Text lines and XML elements are both mapped onto [`InfoField`] and
//! applied through one setter, so every field is read the same way in
//! either format.

use roxmltree::{Document, Node};

use super::date::parse_svn_date;
use super::xml::{self, descend};
use super::{LOCK_COMMENT_REGEX, Parser, parse_revision};
use crate::model::{ConflictInfo, ItemInfo, LockInfo, NodeKind, Schedule};

/// A single `svn info` field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum InfoField {
    Path,
    Name,
    WorkingCopyRoot,
    Url,
    RelativeUrl,
    RepositoryRoot,
    RepositoryUuid,
    Revision,
    NodeKind,
    Schedule,
    Depth,
    Checksum,
    LastChangedAuthor,
    LastChangedRevision,
    LastChangedDate,
    LockToken,
    LockOwner,
    LockCreated,
    LockComment,
    ConflictOld,
    ConflictWorking,
    ConflictNew,
    ConflictProperties,
    TreeConflict,
}

/// Text-mode keys (`Key: value`)
const TEXT_FIELDS: &[(&str, InfoField)] = &[
    ("Path", InfoField::Path),
    ("Name", InfoField::Name),
    ("Working Copy Root Path", InfoField::WorkingCopyRoot),
    ("URL", InfoField::Url),
    ("Relative URL", InfoField::RelativeUrl),
    ("Repository Root", InfoField::RepositoryRoot),
    ("Repository UUID", InfoField::RepositoryUuid),
    ("Revision", InfoField::Revision),
    ("Node Kind", InfoField::NodeKind),
    ("Schedule", InfoField::Schedule),
    ("Depth", InfoField::Depth),
    ("Checksum", InfoField::Checksum),
    ("Last Changed Author", InfoField::LastChangedAuthor),
    ("Last Changed Rev", InfoField::LastChangedRevision),
    ("Last Changed Date", InfoField::LastChangedDate),
    ("Lock Token", InfoField::LockToken),
    ("Lock Owner", InfoField::LockOwner),
    ("Lock Created", InfoField::LockCreated),
    ("Conflict Previous Base File", InfoField::ConflictOld),
    ("Conflict Previous Working File", InfoField::ConflictWorking),
    ("Conflict Current Base File", InfoField::ConflictNew),
    ("Conflict Properties File", InfoField::ConflictProperties),
    ("Tree conflict", InfoField::TreeConflict),
];

/// XML element paths below `<entry>`
const XML_FIELDS: &[(&[&str], InfoField)] = &[
    (&["url"], InfoField::Url),
    (&["relative-url"], InfoField::RelativeUrl),
    (&["repository", "root"], InfoField::RepositoryRoot),
    (&["repository", "uuid"], InfoField::RepositoryUuid),
    (&["wc-info", "wcroot-abspath"], InfoField::WorkingCopyRoot),
    (&["wc-info", "schedule"], InfoField::Schedule),
    (&["wc-info", "depth"], InfoField::Depth),
    (&["wc-info", "checksum"], InfoField::Checksum),
    (&["commit", "author"], InfoField::LastChangedAuthor),
    (&["commit", "date"], InfoField::LastChangedDate),
    (&["lock", "token"], InfoField::LockToken),
    (&["lock", "owner"], InfoField::LockOwner),
    (&["lock", "comment"], InfoField::LockComment),
    (&["lock", "created"], InfoField::LockCreated),
    (&["conflict", "prev-base-file"], InfoField::ConflictOld),
    (&["conflict", "prev-wc-file"], InfoField::ConflictWorking),
    (&["conflict", "cur-base-file"], InfoField::ConflictNew),
    (&["conflict", "prop-file"], InfoField::ConflictProperties),
];

impl Parser {
    /// Parse `svn info` text output for a single item
    ///
    /// Returns the first record, or a default record for empty input.
    pub fn parse_info_text(output: &str) -> ItemInfo {
        Self::parse_info_text_all(output)
            .into_iter()
            .next()
            .unwrap_or_default()
    }

    /// Parse `svn info` text output for any number of items
    ///
    /// Records are separated by blank lines.
    ///
    /// Format:
    /// ```text
    /// Path: src/main.rs
    /// Name: main.rs
    /// URL: https://svn.example.com/repo/trunk/src/main.rs
    /// Revision: 42
    /// Node Kind: file
    /// Lock Comment (1 line):
    /// editing
    /// ```
    pub fn parse_info_text_all(output: &str) -> Vec<ItemInfo> {
        let lines: Vec<&str> = output.lines().map(|l| l.trim_end_matches('\r')).collect();
        let mut records = Vec::new();
        let mut current = ItemInfo::default();
        let mut i = 0;

        while i < lines.len() {
            let line = lines[i];
            i += 1;

            if line.trim().is_empty() {
                if !current.is_empty() {
                    records.push(finish_info(std::mem::take(&mut current)));
                }
                continue;
            }

            if let Some(caps) = LOCK_COMMENT_REGEX.captures(line) {
                let count: usize = caps[1].parse().unwrap_or(0);
                let end = (i + count).min(lines.len());
                apply_field(&mut current, InfoField::LockComment, &lines[i..end].join("\n"));
                i = end;
                continue;
            }

            let Some((key, value)) = line.split_once(':') else {
                continue;
            };
            if let Some((_, field)) = TEXT_FIELDS.iter().find(|(k, _)| *k == key.trim()) {
                apply_field(&mut current, *field, value.trim());
            }
        }

        if !current.is_empty() {
            records.push(finish_info(current));
        }
        records
    }

    /// Parse `svn info --xml` output for a single item
    pub fn parse_info_xml(output: &str) -> ItemInfo {
        xml::parse_document(output)
            .map(|doc| Self::parse_info_structured(&doc))
            .unwrap_or_default()
    }

    /// Parse an `svn info --xml` document, returning the first entry
    pub fn parse_info_structured(doc: &Document) -> ItemInfo {
        Self::parse_info_structured_all(doc)
            .into_iter()
            .next()
            .unwrap_or_default()
    }

    /// Parse every `<entry>` of an `svn info --xml` document
    pub fn parse_info_structured_all(doc: &Document) -> Vec<ItemInfo> {
        doc.descendants()
            .filter(|n| n.has_tag_name("entry"))
            .map(Self::parse_info_entry)
            .collect()
    }

    fn parse_info_entry(entry: Node) -> ItemInfo {
        let mut info = ItemInfo::default();

        for (attr, field) in [
            ("path", InfoField::Path),
            ("kind", InfoField::NodeKind),
            ("revision", InfoField::Revision),
        ] {
            if let Some(value) = entry.attribute(attr) {
                apply_field(&mut info, field, value);
            }
        }

        for (names, field) in XML_FIELDS {
            if let Some(node) = descend(entry, names) {
                apply_field(&mut info, *field, node.text().unwrap_or("").trim());
            }
        }

        // Newer svn describes conflicts with <version> children only
        if descend(entry, &["conflict"]).is_some() {
            conflict(&mut info);
        }

        if let Some(commit) = descend(entry, &["commit"])
            && let Some(revision) = commit.attribute("revision")
        {
            apply_field(&mut info, InfoField::LastChangedRevision, revision);
        }

        if let Some(tree_conflict) = descend(entry, &["tree-conflict"]) {
            let description = match (
                tree_conflict.attribute("reason"),
                tree_conflict.attribute("action"),
                tree_conflict.attribute("operation"),
            ) {
                (Some(reason), Some(action), Some(operation)) => {
                    format!("local {reason}, incoming {action} upon {operation}")
                }
                _ => "tree conflict".to_string(),
            };
            apply_field(&mut info, InfoField::TreeConflict, &description);
        }

        finish_info(info)
    }
}

/// Set one field, leaving it at its default when the value does not parse
fn apply_field(info: &mut ItemInfo, field: InfoField, value: &str) {
    match field {
        InfoField::Path => info.path = value.to_string(),
        InfoField::Name => info.name = value.to_string(),
        InfoField::WorkingCopyRoot => info.working_copy_root = value.to_string(),
        InfoField::Url => info.url = value.to_string(),
        InfoField::RelativeUrl => info.relative_url = value.to_string(),
        InfoField::RepositoryRoot => info.repository_root_url = value.to_string(),
        InfoField::RepositoryUuid => info.repository_uuid = value.to_string(),
        InfoField::Revision => {
            if let Some(revision) = parse_revision(value) {
                info.revision = revision;
            }
        }
        InfoField::NodeKind => info.node_kind = NodeKind::from_word(value),
        InfoField::Schedule => info.schedule = Schedule::from_word(value),
        InfoField::Depth => info.depth = value.to_string(),
        InfoField::Checksum => info.checksum = value.to_string(),
        InfoField::LastChangedAuthor => info.last_changed_author = value.to_string(),
        InfoField::LastChangedRevision => {
            if let Some(revision) = parse_revision(value) {
                info.last_changed_revision = revision;
            }
        }
        InfoField::LastChangedDate => info.last_changed_date = parse_svn_date(value),
        InfoField::LockToken => lock(info).token = value.to_string(),
        InfoField::LockOwner => lock(info).owner = value.to_string(),
        InfoField::LockCreated => lock(info).created = parse_svn_date(value),
        InfoField::LockComment => lock(info).comment = value.to_string(),
        InfoField::ConflictOld => conflict(info).old_file = non_empty(value),
        InfoField::ConflictWorking => conflict(info).working_file = non_empty(value),
        InfoField::ConflictNew => conflict(info).new_file = non_empty(value),
        InfoField::ConflictProperties => conflict(info).property_file = non_empty(value),
        InfoField::TreeConflict => info.tree_conflict = non_empty(value),
    }
}

fn lock(info: &mut ItemInfo) -> &mut LockInfo {
    info.lock.get_or_insert_with(LockInfo::default)
}

fn conflict(info: &mut ItemInfo) -> &mut ConflictInfo {
    info.conflict.get_or_insert_with(ConflictInfo::default)
}

fn non_empty(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

/// Fill in the name of file entries that only carry a path
fn finish_info(mut info: ItemInfo) -> ItemInfo {
    if info.name.is_empty() && info.node_kind == NodeKind::File {
        let trimmed = info.path.trim_end_matches(['/', '\\']);
        info.name = trimmed.rsplit(['/', '\\']).next().unwrap_or(trimmed).to_string();
    }
    info
}
