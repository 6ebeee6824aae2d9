//! Show/diff output parser (show -m -p --numstat --shortstat)

use crate::model::{ChangeSetDetail, ChangeType, FileDiff, FileInfo, LineDiff};
use crate::scm::constants::markers;
use crate::scm::{ScmError, StringReader};

use super::Parser;

impl Parser {
    /// Parse `show` output (or staged `diff` output) into a detail
    ///
    /// With `include_change_set` the input starts with a commit block;
    /// without it the detail represents a working-tree diff and carries
    /// no change set. The summary section (numstat rows and shortstat
    /// footer) is parsed first, then the per-file diff chunks.
    pub fn parse_show(
        reader: &mut StringReader<'_>,
        include_change_set: bool,
    ) -> Result<ChangeSetDetail, ScmError> {
        let mut detail = if include_change_set {
            ChangeSetDetail::with_change_set(Self::parse_commit(reader)?)
        } else {
            ChangeSetDetail::default()
        };

        Self::parse_summary(reader, &mut detail);
        Self::parse_diff_and_populate(reader, &mut detail)?;
        Ok(detail)
    }

    /// Parse the numstat/shortstat summary section
    ///
    /// Rows are `insertions<TAB>deletions<TAB>path`; a `-` count marks
    /// a binary file with zero counts. Lines without a tab are offered
    /// to the footer recognizer and otherwise ignored. A blank line
    /// ends the section.
    pub(super) fn parse_summary(reader: &mut StringReader<'_>, detail: &mut ChangeSetDetail) {
        while !reader.done() {
            let line = reader.read_line();
            if Self::is_single_newline(line) {
                break;
            }

            if line.contains('\t') {
                let mut fields = line.trim_end_matches(['\n', '\r']).splitn(3, '\t');
                let insertions = fields.next().unwrap_or_default().trim();
                let deletions = fields.next().unwrap_or_default().trim();
                let path = fields.next().unwrap_or_default().trim();

                let binary = insertions == "-" || deletions == "-";
                let info = FileInfo {
                    insertions: if binary {
                        0
                    } else {
                        insertions.parse().unwrap_or(0)
                    },
                    deletions: if binary {
                        0
                    } else {
                        deletions.parse().unwrap_or(0)
                    },
                    binary,
                    ..Default::default()
                };
                detail.insert_file(path, info);
            } else {
                Self::parse_summary_footer(line, detail);
            }
        }
    }

    /// Parse the diff section and merge each file diff into the detail
    ///
    /// Chunks are delimited by `diff --git` header lines. Binary is
    /// sticky per path and diff lines accumulate in source order.
    pub(super) fn parse_diff_and_populate(
        reader: &mut StringReader<'_>,
        detail: &mut ChangeSetDetail,
    ) -> Result<(), ScmError> {
        let mut merge: Option<ChangeSetDetail> = None;
        let mut chunk = String::new();

        loop {
            let done = reader.done();
            let line = if done { "" } else { reader.read_line() };

            if (done || line.starts_with(markers::DIFF_HEADER)) && !chunk.is_empty() {
                if let Some(mut diff) = Self::parse_diff_chunk(&chunk, &mut merge)? {
                    detail.merge_file_diff(&mut diff);
                }
                chunk.clear();
            }
            if done {
                break;
            }
            chunk.push_str(line);
        }

        Ok(())
    }

    /// Parse one buffered diff chunk into a file diff
    ///
    /// Returns `Ok(None)` when the chunk belongs to a merge parent whose
    /// path is already accounted for. An embedded commit header switches
    /// the scan into merge mode: the nested commit block and its summary
    /// are parsed into the merge context and scanning continues.
    fn parse_diff_chunk(
        chunk: &str,
        merge: &mut Option<ChangeSetDetail>,
    ) -> Result<Option<FileDiff>, ScmError> {
        let mut reader = StringReader::new(chunk);

        // Header: diff --git a/<path> b/<path>. A chunk without a
        // parseable header carries nothing to attribute; skip it.
        let header = reader.read_line();
        let Some(file_name) = header
            .strip_prefix(markers::DIFF_HEADER)
            .and_then(|rest| rest.strip_prefix("a/"))
            .and_then(|rest| rest.split_whitespace().next())
            .map(str::to_string)
        else {
            return Ok(None);
        };

        // Merge parents repeat files; the first occurrence wins
        if let Some(seen) = merge
            && seen.contains_file(&file_name)
        {
            return Ok(None);
        }

        let mut diff = FileDiff::new(file_name);

        // Scan past the extended headers until the first hunk
        while !reader.done() {
            let line = reader.read_line();
            if line.trim_end_matches(['\n', '\r']) == markers::BINARY_PATCH {
                diff.binary = true;
                reader.read_to_end();
                return Ok(Some(diff));
            }
            if line.starts_with(markers::HUNK_HEADER) {
                reader.put_back(line.len());
                break;
            }
        }

        // Hunk body: signs classify lines; an embedded commit header
        // starts a merge-parent block
        while !reader.done() {
            let line = reader.read_line();

            if Self::is_commit_header(line) {
                reader.put_back(line.len());
                Self::parse_merge_parent(&mut reader, merge)?;
                continue;
            }

            let text = line.trim_end_matches(['\n', '\r']);
            let kind = if text.starts_with('+') {
                ChangeType::Added
            } else if text.starts_with('-') {
                ChangeType::Deleted
            } else {
                ChangeType::None
            };
            diff.lines.push(LineDiff::new(kind, text));
        }

        Ok(Some(diff))
    }

    /// Parse an embedded commit block plus summary into the merge context
    ///
    /// The nested change set is extracted once; later embedded blocks
    /// only extend the file map used for deduplication.
    fn parse_merge_parent(
        reader: &mut StringReader<'_>,
        merge: &mut Option<ChangeSetDetail>,
    ) -> Result<(), ScmError> {
        let change_set = Self::parse_commit(reader)?;
        let context = merge.get_or_insert_default();
        if context.change_set.is_none() {
            context.change_set = Some(change_set);
        }
        Self::parse_summary(reader, context);
        Ok(())
    }

    /// Apply `--name-status` output to a parsed detail
    ///
    /// Each row is `code<TAB>path`; rows for unknown paths are ignored,
    /// codes outside the accepted set fail the parse.
    pub fn parse_name_status(output: &str, detail: &mut ChangeSetDetail) -> Result<(), ScmError> {
        for line in output.lines() {
            if !line.contains('\t') {
                continue;
            }
            let mut fields = line.splitn(2, '\t');
            let code = fields.next().unwrap_or_default().trim();
            let path = fields.next().unwrap_or_default().trim();

            if !detail.contains_file(path) {
                continue;
            }
            let status = ChangeType::from_porcelain_code(code)
                .ok_or_else(|| ScmError::UnsupportedStatus(code.to_string()))?;
            if let Some(info) = detail.file_mut(path) {
                info.status = status;
            }
        }
        Ok(())
    }
}
