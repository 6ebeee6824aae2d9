//! Git output parser
//!
//! Parses porcelain status, log, show, and diff output into the typed
//! change-set model. The parsers are tolerant of loosely structured
//! text: unknown commit-header keys are ignored, footer clauses may be
//! absent, and merge output is deduplicated while scanning.

mod log;
mod show;
mod status;

pub use log::LogEntries;
pub use status::StatusLines;


use regex::Regex;
use std::sync::LazyLock;

use crate::model::ChangeSetDetail;
use crate::scm::constants::markers;

/// Regex for the shortstat footer line
/// Format: ` N files changed[, N insertions(+)][, N deletions(-)]`
/// Either of the last two clauses may be missing; singular forms occur
/// for counts of one.
static SUMMARY_FOOTER_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^\s*(\d+) files? changed(?:, (\d+) insertions?\(\+\))?(?:, (\d+) deletions?\(-\))?",
    )
    .expect("Invalid summary footer regex")
});

/// Parser for git command output
pub struct Parser;

impl Parser {
    /// True iff the line is a bare line feed (optionally CR LF)
    ///
    /// Blank lines terminate commit headers, message blocks, and the
    /// numstat summary section.
    pub(super) fn is_single_newline(line: &str) -> bool {
        line == "\n" || line == "\r\n"
    }

    /// True iff the line starts a commit block
    pub(super) fn is_commit_header(line: &str) -> bool {
        line.starts_with(markers::COMMIT_HEADER)
    }

    /// Recognize the shortstat footer and fill the detail totals
    ///
    /// Returns whether the line matched; unmatched lines are left for
    /// the caller to ignore. Missing clauses read as zero.
    pub(super) fn parse_summary_footer(line: &str, detail: &mut ChangeSetDetail) -> bool {
        let Some(caps) = SUMMARY_FOOTER_REGEX.captures(line) else {
            return false;
        };

        let count = |idx: usize| -> u32 {
            caps.get(idx)
                .and_then(|m| m.as_str().parse().ok())
                .unwrap_or(0)
        };

        detail.files_changed = count(1);
        detail.insertions = count(2);
        detail.deletions = count(3);
        true
    }
}
