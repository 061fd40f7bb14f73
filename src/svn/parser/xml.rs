//! Helpers for walking svn `--xml` documents

use roxmltree::{Document, Node};

/// Parse an XML document, logging and discarding malformed input
pub(super) fn parse_document(output: &str) -> Option<Document<'_>> {
    let trimmed = output.trim();
    if trimmed.is_empty() {
        return None;
    }

    match Document::parse(trimmed) {
        Ok(doc) => Some(doc),
        Err(err) => {
            tracing::debug!(%err, "discarding malformed svn XML output");
            None
        }
    }
}

/// First direct child element with the given tag name
pub(super) fn child<'a, 'input>(node: Node<'a, 'input>, name: &str) -> Option<Node<'a, 'input>> {
    node.children().find(|n| n.has_tag_name(name))
}

/// Follow a chain of child element names
pub(super) fn descend<'a, 'input>(
    node: Node<'a, 'input>,
    names: &[&str],
) -> Option<Node<'a, 'input>> {
    names.iter().try_fold(node, |current, name| child(current, name))
}

/// Trimmed text of a direct child element, if present and non-empty
pub(super) fn child_text<'a>(node: Node<'a, '_>, name: &str) -> Option<&'a str> {
    child(node, name).and_then(|n| n.text()).map(str::trim).filter(|t| !t.is_empty())
}
