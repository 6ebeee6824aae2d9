//! Property-based tests for git output parsers
//!
//! Uses proptest to verify parsers handle arbitrary input without
//! panicking and that the documented invariants hold under generated
//! inputs.

use proptest::prelude::*;

use funchost::model::{ChangeSetDetail, ChangeType, FileDiff};
use funchost::scm::StringReader;
use funchost::scm::parser::Parser;

// =============================================================================
// Strategy generators
// =============================================================================

/// Generate a file path (no tabs or newlines, reasonable length)
fn file_path_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9_/.-]{1,50}".prop_map(|s| s.to_string())
}

/// Generate a supported porcelain status code
fn status_code_strategy() -> impl Strategy<Value = &'static str> {
    prop_oneof![
        Just("A"),
        Just("AM"),
        Just("M"),
        Just("MM"),
        Just("D"),
        Just("R"),
        Just("??"),
    ]
}

fn expected_change_type(code: &str) -> ChangeType {
    match code {
        "A" | "AM" => ChangeType::Added,
        "M" | "MM" => ChangeType::Modified,
        "D" => ChangeType::Deleted,
        "R" => ChangeType::Renamed,
        "??" => ChangeType::Untracked,
        _ => unreachable!("unsupported code in strategy"),
    }
}

// =============================================================================
// Robustness tests: parsers should never panic on arbitrary input
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(1000))]

    /// Status parser should not panic on arbitrary input
    #[test]
    fn status_parser_does_not_panic(input in ".*") {
        // Driving the iterator may yield errors, never a panic
        for _ in Parser::parse_status(&input) {}
    }

    /// Log parser should not panic on arbitrary input
    #[test]
    fn log_parser_does_not_panic(input in ".*") {
        for _ in Parser::parse_log(&input) {}
    }

    /// Show parser should not panic on arbitrary input, in either mode
    #[test]
    fn show_parser_does_not_panic(input in ".*") {
        let mut reader = StringReader::new(&input);
        let _ = Parser::parse_show(&mut reader, true);
        let mut reader = StringReader::new(&input);
        let _ = Parser::parse_show(&mut reader, false);
    }

    /// name-status population should not panic on arbitrary input
    #[test]
    fn name_status_does_not_panic(input in ".*") {
        let mut detail = ChangeSetDetail::default();
        detail.file_entry("anchor.txt");
        let _ = Parser::parse_name_status(&input, &mut detail);
    }

    /// The reader always makes progress and consumes exactly the input
    #[test]
    fn reader_consumes_whole_input(input in ".*") {
        let mut reader = StringReader::new(&input);
        let mut consumed = 0usize;
        while !reader.done() {
            let line = reader.read_line();
            prop_assert!(!line.is_empty(), "read_line must make progress");
            consumed += line.len();
        }
        prop_assert_eq!(consumed, input.len());
    }
}

// =============================================================================
// Structured input tests
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    /// Every supported status code round-trips through a porcelain line
    #[test]
    fn status_line_round_trips(
        code in status_code_strategy(),
        path in file_path_strategy(),
    ) {
        let line = format!("{} {}\n", code, path);
        let statuses: Vec<_> = Parser::parse_status(&line)
            .collect::<Result<_, _>>()
            .unwrap();

        prop_assert_eq!(statuses.len(), 1);
        prop_assert_eq!(&statuses[0].path, &path);
        prop_assert_eq!(statuses[0].status, expected_change_type(code));
    }

    /// The binary flag is the OR of all interleaved diffs for a path
    #[test]
    fn binary_flag_is_monotonic(flags in prop::collection::vec(any::<bool>(), 1..10)) {
        let mut detail = ChangeSetDetail::default();
        for flag in &flags {
            let mut diff = FileDiff {
                file_name: "file.bin".to_string(),
                binary: *flag,
                lines: Vec::new(),
            };
            detail.merge_file_diff(&mut diff);
        }

        let expected = flags.iter().any(|f| *f);
        prop_assert_eq!(detail.file("file.bin").unwrap().binary, expected);
    }

    /// Numstat rows preserve first-encounter ordering
    #[test]
    fn summary_preserves_row_order(paths in prop::collection::hash_set("[a-z]{1,8}\\.txt", 1..8)) {
        let paths: Vec<String> = paths.into_iter().collect();
        let mut output = String::new();
        for path in &paths {
            output.push_str(&format!("1\t0\t{}\n", path));
        }
        output.push('\n');

        let mut reader = StringReader::new(&output);
        let detail = Parser::parse_show(&mut reader, false).unwrap();

        let parsed: Vec<&str> = detail.files().map(|(p, _)| p).collect();
        let expected: Vec<&str> = paths.iter().map(String::as_str).collect();
        prop_assert_eq!(parsed, expected);
    }
}
