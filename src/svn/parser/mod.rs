//! svn output parser
//!
//! Parses the output from svn commands into structured data. Every command
//! family has a text entry point and an XML (`--xml`) entry point that share
//! their field mapping.
//!
//! Parsers never fail: a malformed line or element is skipped, and empty or
//! unreadable input produces an empty or default value.

mod date;
mod diff;
mod info;
mod list;
mod log;
mod status;
mod xml;


pub use roxmltree::Document;
pub use status::infer_node_kind;

use regex::Regex;
use std::sync::LazyLock;

/// Regex for a unified diff hunk header
/// Format: `@@ -<start>[,<count>] +<start>[,<count>] @@`
///
/// Groups:
/// 1. original start line
/// 2. modified start line
static HUNK_HEADER_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^@@ -(\d+)(?:,\d+)? \+(\d+)(?:,\d+)? @@").expect("Invalid hunk header regex")
});

/// Regex for the whole-output binary marker emitted by diff tools
/// Example: `Binary files a/logo.png and b/logo.png differ`
static BINARY_FILES_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^Binary files? .* differ\r?$").expect("Invalid binary files regex")
});

/// Regex for a changed-path line in `svn log -v`
/// Example: `A /branches/b1 (from /trunk:120)`
///
/// Groups:
/// 1. action character
/// 2. path
/// 3. copy source path (optional)
/// 4. copy source revision (optional)
static CHANGED_PATH_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([ADMR]) (/.*?)(?: \(from (.+):r?(\d+)\))?$")
        .expect("Invalid changed path regex")
});

/// Regex for the multi-line lock comment header in `svn info`
/// Example: `Lock Comment (2 lines):`
static LOCK_COMMENT_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^Lock Comment \((\d+) lines?\):").expect("Invalid lock comment regex")
});

/// Regex for a verbose `svn list -v` line
/// Format: `<rev> <author> [O] [<size>] <Mon> <day> <HH:MM|year> <name>`
///
/// Groups:
/// 1. revision
/// 2. author
/// 3. lock marker (optional)
/// 4. size (optional)
/// 5. month name
/// 6. day
/// 7. time or year
/// 8. name
static LIST_VERBOSE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^\s*(\d+)\s+(\S+)\s+(?:(O)\s+)?(?:(\d+)\s+)?([A-Za-z]{3})\s+(\d{1,2})\s+(\d{1,2}:\d{2}|\d{4})\s+(.+)$",
    )
    .expect("Invalid list verbose regex")
});

/// Parser for svn command output
pub struct Parser;

/// Parse a revision number, tolerating an `r` prefix
fn parse_revision(value: &str) -> Option<u64> {
    let value = value.trim();
    value.strip_prefix('r').unwrap_or(value).parse().ok()
}
