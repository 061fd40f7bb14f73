//! Property-based tests for svn output parsers
//!
//! Uses proptest to verify parsers handle arbitrary input without panicking.
//! Reference: https://lib.rs/crates/proptest

use std::path::Path;

use proptest::prelude::*;
use svnlens::model::{FileStatus, NodeKind, StatusCode};
use svnlens::state::{self, Action, Status};
use svnlens::svn::parser::Parser;
use svnlens::tree;

// =============================================================================
// Strategy generators for realistic-ish svn output
// =============================================================================

/// Generate a working-copy relative path (no whitespace, no leading marker)
fn file_path_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9_.][a-zA-Z0-9_/.-]{0,40}".prop_map(|s| s.to_string())
}

/// Generate a status code that has a text column character
fn status_code_strategy() -> impl Strategy<Value = StatusCode> {
    prop::sample::select(StatusCode::ALL.to_vec())
}

fn state_strategy() -> impl Strategy<Value = Status> {
    prop::sample::select(Status::ALL.to_vec())
}

fn action_strategy() -> impl Strategy<Value = Action> {
    prop::sample::select(Action::ALL.to_vec())
}

// =============================================================================
// Robustness tests: parsers should never panic on arbitrary input
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(1000))]

    /// Status parsers should not panic on arbitrary input
    #[test]
    fn status_parser_does_not_panic(input in ".*") {
        let _ = Parser::parse_status_text(&input);
        let _ = Parser::parse_status_xml(&input);
    }

    /// Log parsers should not panic on arbitrary input
    #[test]
    fn log_parser_does_not_panic(input in ".*") {
        let _ = Parser::parse_log_text(&input);
        let _ = Parser::parse_log_xml(&input);
    }

    /// Diff parser should not panic on arbitrary input
    #[test]
    fn diff_parser_does_not_panic(input in ".*") {
        let _ = Parser::parse_diff(&input);
    }

    /// Info parsers should not panic on arbitrary input
    #[test]
    fn info_parser_does_not_panic(input in ".*") {
        let _ = Parser::parse_info_text_all(&input);
        let _ = Parser::parse_info_xml(&input);
    }

    /// List parsers should not panic on arbitrary input
    #[test]
    fn list_parser_does_not_panic(input in ".*") {
        let _ = Parser::parse_list_text_with_year(&input, 2024);
        let _ = Parser::parse_list_xml(&input);
    }

    /// Multi-line input built from svn-looking fragments
    #[test]
    fn parsers_handle_fragment_soup(
        lines in prop::collection::vec(
            prop::sample::select(vec![
                "------------------------------------------------------------------------",
                "r12 | alice | 2024-01-10 12:00:00 +0000 (Wed, 10 Jan 2024) | 3 lines",
                "Changed paths:",
                "   M /trunk/a.txt",
                "@@ -1,2 +1,3 @@",
                "+added",
                "-removed",
                "Lock Comment (9 lines):",
                "     42 alice              2048 Jan 10 12:00 main.rs",
                "M       src/main.rs",
                "",
            ]),
            0..30,
        ),
    ) {
        let input = lines.join("\n");
        let _ = Parser::parse_status_text(&input);
        let _ = Parser::parse_log_text(&input);
        let _ = Parser::parse_diff(&input);
        let _ = Parser::parse_info_text_all(&input);
        let _ = Parser::parse_list_text_with_year(&input, 2024);
    }
}

// =============================================================================
// Idempotence: the same input always gives the same result
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(300))]

    #[test]
    fn parsers_are_idempotent(input in "\\PC{0,200}") {
        prop_assert_eq!(Parser::parse_status_text(&input), Parser::parse_status_text(&input));
        prop_assert_eq!(Parser::parse_log_text(&input), Parser::parse_log_text(&input));
        prop_assert_eq!(Parser::parse_diff(&input), Parser::parse_diff(&input));
        prop_assert_eq!(Parser::parse_info_text_all(&input), Parser::parse_info_text_all(&input));
        prop_assert_eq!(
            Parser::parse_list_text_with_year(&input, 2024),
            Parser::parse_list_text_with_year(&input, 2024)
        );
    }
}

// =============================================================================
// Structured input tests: parsers handle well-formed input correctly
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    /// A well-formed status line keeps its codes and path
    #[test]
    fn status_line_round_trip(
        item in status_code_strategy(),
        props in status_code_strategy(),
        path in file_path_strategy(),
    ) {
        let line = format!("{}{}      {}\n", item.as_char(), props.as_char(), path);
        let files = Parser::parse_status_text(&line);

        prop_assert_eq!(files.len(), 1);
        prop_assert_eq!(&files[0].path, &path);
        prop_assert_eq!(files[0].working_copy_status, item);
        prop_assert_eq!(files[0].property_status, props);
    }

    /// The XML word for every code parses back to the same code
    #[test]
    fn status_word_round_trip(code in status_code_strategy()) {
        prop_assert_eq!(StatusCode::from_word(code.as_word()), code);
        prop_assert_eq!(StatusCode::from_word(&code.as_word().to_uppercase()), code);
    }

    /// A log header with a message of known length parses to one entry
    #[test]
    fn log_entry_round_trip(
        revision in 1u64..1_000_000,
        author in "[a-z]{1,12}",
        message in prop::collection::vec("[a-zA-Z0-9 .,]{1,40}", 1..5),
    ) {
        let message: Vec<String> = message.into_iter().map(|l| l.trim().to_string()).collect();
        prop_assume!(message.iter().all(|l| !l.is_empty()));

        let separator = "-".repeat(72);
        let output = format!(
            "{separator}\nr{revision} | {author} | 2024-01-10 12:00:00 +0000 (Wed, 10 Jan 2024) | {} lines\n\n{}\n{separator}\n",
            message.len(),
            message.join("\n"),
        );
        let entries = Parser::parse_log_text(&output);

        prop_assert_eq!(entries.len(), 1);
        prop_assert_eq!(entries[0].revision, revision);
        prop_assert_eq!(&entries[0].author, &author);
        prop_assert_eq!(entries[0].message.clone(), message.join("\n"));
    }

    /// Line numbers in a hunk of pure additions count up from the header
    #[test]
    fn diff_addition_numbers(start in 1u32..10_000, count in 1usize..20) {
        let mut output = format!("@@ -{start},0 +{start},{count} @@\n");
        for i in 0..count {
            output.push_str(&format!("+line {i}\n"));
        }
        let result = Parser::parse_diff(&output);

        for (i, line) in result.lines.iter().skip(1).enumerate() {
            prop_assert_eq!(line.modified_line_no, Some(start + i as u32));
            prop_assert_eq!(line.original_line_no, None);
        }
    }
}

// =============================================================================
// Tree builder and state machine invariants
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(300))]

    /// The tree never holds more nodes than the input and only directories
    /// have children
    #[test]
    fn tree_build_is_bounded(paths in prop::collection::vec(file_path_strategy(), 0..25)) {
        let flat: Vec<FileStatus> = paths.iter().map(FileStatus::new).collect();
        let nodes = tree::build(&flat, Path::new("."));

        let total: usize = nodes.iter().map(FileStatus::subtree_len).sum();
        prop_assert!(total <= flat.len());

        fn check(nodes: &[FileStatus]) -> bool {
            nodes.iter().all(|n| {
                (n.children.is_empty() || n.node_kind == NodeKind::Directory) && check(&n.children)
            })
        }
        prop_assert!(check(&nodes));
    }

    /// Predicates agree with the transition table
    #[test]
    fn state_predicates_match_table(status in state_strategy(), action in action_strategy()) {
        prop_assert_eq!(
            state::valid_actions(status).contains(action),
            state::next_state(status, action).is_some()
        );
        prop_assert_eq!(
            state::can_delete(status),
            state::is_valid_transition(status, Action::Delete)
        );
        prop_assert_eq!(
            state::can_revert(status),
            state::is_valid_transition(status, Action::Revert)
        );
        if state::can_commit(status) {
            prop_assert!(state::is_valid_transition(status, Action::Commit));
        }
    }
}
