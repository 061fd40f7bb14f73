//! Status tree builder
//!
//! Rebuilds a directory hierarchy from the flat, unordered list svn prints.
//! Paths are compared as normalized keys: `\` becomes `/`, trailing
//! separators are dropped, and case is folded.
//!
//! The hierarchy is a heuristic. An entry is a child of whichever entry's
//! path equals its parent directory, and a top-level node iff its parent
//! directory is the root. If that finds no top-level node at all, the input
//! comes back as a flat list rather than being lost.

use std::collections::HashMap;
use std::fmt::Write as _;
use std::path::Path;

use crate::model::{FileStatus, NodeKind};

/// Build a tree from flat status records
///
/// Returns the top-level nodes in input order; descendants hang off
/// [`FileStatus::children`]. Duplicate paths keep their first occurrence.
/// Any node that receives children is marked as a directory.
pub fn build(flat: &[FileStatus], root: &Path) -> Vec<FileStatus> {
    if flat.is_empty() {
        return Vec::new();
    }

    let root_key = path_key(&root.to_string_lossy());
    let keys: Vec<String> = flat.iter().map(|f| path_key(&f.path)).collect();
    let parents: Vec<String> = keys
        .iter()
        .map(|k| parent_key(k).unwrap_or_else(|| root_key.clone()))
        .collect();

    // First occurrence wins for each path
    let mut first_index: HashMap<&str, usize> = HashMap::new();
    for (i, key) in keys.iter().enumerate() {
        first_index.entry(key.as_str()).or_insert(i);
    }
    let is_first = |i: usize| first_index.get(keys[i].as_str()) == Some(&i);

    let mut groups: HashMap<&str, Vec<usize>> = HashMap::new();
    for (i, parent) in parents.iter().enumerate() {
        if is_first(i) && *parent != keys[i] {
            groups.entry(parent.as_str()).or_default().push(i);
        }
    }

    let top_level: Vec<usize> = (0..flat.len())
        .filter(|&i| is_first(i) && parents[i] == root_key && keys[i] != root_key)
        .collect();

    if top_level.is_empty() {
        tracing::debug!(
            entries = flat.len(),
            root = %root.display(),
            "no entry sits directly under the root, returning flat list"
        );
        return flat
            .iter()
            .map(|f| FileStatus {
                children: Vec::new(),
                ..f.clone()
            })
            .collect();
    }

    let arena = Arena {
        flat,
        keys: &keys,
        groups: &groups,
    };
    let mut visited = vec![false; flat.len()];
    top_level
        .into_iter()
        .filter_map(|i| arena.assemble(i, &mut visited))
        .collect()
}

/// Index over the flat input used to wire children by lookup
struct Arena<'a> {
    flat: &'a [FileStatus],
    keys: &'a [String],
    groups: &'a HashMap<&'a str, Vec<usize>>,
}

impl Arena<'_> {
    /// Clone entry `i` with its subtree attached
    ///
    /// Each entry is placed at most once. Parentless entries are grouped
    /// under the root key, which can close a loop when the root itself is
    /// below them.
    fn assemble(&self, i: usize, visited: &mut [bool]) -> Option<FileStatus> {
        if std::mem::replace(&mut visited[i], true) {
            return None;
        }

        let mut node = FileStatus {
            children: Vec::new(),
            ..self.flat[i].clone()
        };

        if let Some(children) = self.groups.get(self.keys[i].as_str()) {
            node.children = children
                .iter()
                .filter_map(|&c| self.assemble(c, visited))
                .collect();
            if !node.children.is_empty() {
                node.node_kind = NodeKind::Directory;
            }
        }

        Some(node)
    }
}

/// Normalize a path for comparison
pub fn path_key(path: &str) -> String {
    let unified = path.trim().replace('\\', "/").to_lowercase();
    let trimmed = unified.trim_end_matches('/');
    if trimmed.is_empty() && unified.starts_with('/') {
        "/".to_string()
    } else {
        trimmed.to_string()
    }
}

/// Parent directory of a normalized key, if it has one
fn parent_key(key: &str) -> Option<String> {
    let (parent, _) = key.rsplit_once('/')?;
    if parent.is_empty() {
        // "/name" sits directly under the filesystem root
        return (key != "/").then(|| "/".to_string());
    }
    Some(parent.to_string())
}

/// Render a tree as an indented outline, one node per line
///
/// Each line shows the item and property status columns followed by the
/// node's file name, indented two spaces per level.
pub fn outline(nodes: &[FileStatus]) -> String {
    fn walk(out: &mut String, nodes: &[FileStatus], depth: usize) {
        for node in nodes {
            let suffix = if node.node_kind.is_dir() { "/" } else { "" };
            let _ = writeln!(
                out,
                "{}{} {}{}{}",
                node.working_copy_status.as_char(),
                node.property_status.as_char(),
                "  ".repeat(depth),
                node.file_name(),
                suffix
            );
            walk(out, &node.children, depth + 1);
        }
    }

    let mut out = String::new();
    walk(&mut out, nodes, 0);
    out
}
