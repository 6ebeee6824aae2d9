//! Log output parser (commit blocks)

use chrono::DateTime;

use crate::model::ChangeSet;
use crate::scm::{ScmError, StringReader};

use super::Parser;

/// Fixed author-date format emitted by git (`Mon Jan 2 15:04:05 2006 -0700`)
///
/// The driver forces the invariant locale so the weekday and month
/// abbreviations are always English.
const DATE_FORMAT: &str = "%a %b %e %H:%M:%S %Y %z";

impl Parser {
    /// Parse `log --all` output into a lazy sequence of change sets
    pub fn parse_log(output: &str) -> LogEntries<'_> {
        LogEntries {
            reader: StringReader::new(output),
        }
    }

    /// Parse one commit block
    ///
    /// Layout:
    /// ```text
    /// commit <hash> [(from <hash>)]
    /// Author: Name <email>
    /// Date:   Mon Jan 2 15:04:05 2006 -0700
    ///
    ///     message lines
    ///
    /// ```
    /// The merge-parent suffix on the first line is intentionally
    /// ignored. Unknown header keys are skipped. Message lines are
    /// concatenated without separators.
    pub fn parse_commit(reader: &mut StringReader<'_>) -> Result<ChangeSet, ScmError> {
        reader.skip_whitespace();

        // "commit <hash>", rest of the line discarded
        let word = reader.read_until_whitespace();
        if word != "commit" {
            return Err(ScmError::ParseError(format!(
                "expected commit header, found: {}",
                word
            )));
        }
        reader.skip_whitespace();
        let id = reader.read_until_whitespace().to_string();
        reader.read_line();

        let mut author_name = String::new();
        let mut author_email = String::new();
        let mut timestamp = None;

        // Header lines until a blank line
        while !reader.done() {
            let line = reader.read_line();
            if Self::is_single_newline(line) {
                break;
            }

            let Some((key, value)) = line.split_once(':') else {
                continue;
            };
            let value = value.trim();

            match key.trim() {
                "Author" => {
                    let (name, email) = parse_author(value);
                    author_name = name;
                    author_email = email;
                }
                "Date" => {
                    let parsed = DateTime::parse_from_str(value, DATE_FORMAT).map_err(|e| {
                        ScmError::ParseError(format!("bad commit date '{}': {}", value, e))
                    })?;
                    timestamp = Some(parsed);
                }
                _ => {}
            }
        }

        // Message lines until the next blank line, concatenated with no
        // separator between them
        let mut message = String::new();
        while !reader.done() {
            let line = reader.read_line();
            if Self::is_single_newline(line) {
                break;
            }
            message.push_str(line.trim_end_matches(['\n', '\r']));
        }

        let timestamp = timestamp
            .ok_or_else(|| ScmError::ParseError(format!("commit {} has no Date header", id)))?;

        Ok(ChangeSet {
            id,
            author_name,
            author_email,
            message,
            timestamp,
        })
    }
}

/// Split an `Author` header value of the form `Name <email>`
///
/// The name is everything before `<`, trimmed; the email everything up
/// to `>`. Either part may be empty.
fn parse_author(value: &str) -> (String, String) {
    match value.split_once('<') {
        Some((name, rest)) => {
            let email = rest.split_once('>').map(|(e, _)| e).unwrap_or(rest);
            (name.trim().to_string(), email.trim().to_string())
        }
        None => (value.trim().to_string(), String::new()),
    }
}

/// Lazy iterator over commit blocks in `log` output
pub struct LogEntries<'a> {
    reader: StringReader<'a>,
}

impl Iterator for LogEntries<'_> {
    type Item = Result<ChangeSet, ScmError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.reader.skip_whitespace();
        if self.reader.done() {
            return None;
        }
        Some(Parser::parse_commit(&mut self.reader))
    }
}
