//! Status output parser (status --porcelain)

use crate::model::{ChangeType, FileStatus};
use crate::scm::{ScmError, StringReader};

use super::Parser;

impl Parser {
    /// Parse `status --porcelain` output
    ///
    /// Returns a lazy sequence over the input; each non-empty line
    /// yields one file status or an error for codes outside the
    /// accepted set.
    pub fn parse_status(output: &str) -> StatusLines<'_> {
        StatusLines {
            reader: StringReader::new(output),
        }
    }
}

/// Lazy iterator over porcelain status lines
pub struct StatusLines<'a> {
    reader: StringReader<'a>,
}

impl Iterator for StatusLines<'_> {
    type Item = Result<FileStatus, ScmError>;

    fn next(&mut self) -> Option<Self::Item> {
        while !self.reader.done() {
            let line = self.reader.read_line();
            let line = line.trim_end_matches(['\n', '\r']);
            if line.trim().is_empty() {
                continue;
            }

            return Some(parse_status_line(line));
        }
        None
    }
}

/// Parse one porcelain line: status code token, then the path
///
/// Leading whitespace is significant to git (` M` vs `M `) but not to
/// the change-type table, so it is skipped before tokenizing.
fn parse_status_line(line: &str) -> Result<FileStatus, ScmError> {
    let mut reader = StringReader::new(line);
    reader.skip_whitespace();
    let code = reader.read_until_whitespace();
    let path = reader.read_to_end().trim();

    match ChangeType::from_porcelain_code(code) {
        Some(status) => Ok(FileStatus {
            path: path.to_string(),
            status,
        }),
        None => Err(ScmError::UnsupportedStatus(code.to_string())),
    }
}
