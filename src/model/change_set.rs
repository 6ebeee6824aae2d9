//! Change set data model
//!
//! A change set is one commit's identity and metadata; a change set
//! detail adds the per-file summary and accumulated diff lines.

use chrono::{DateTime, FixedOffset};

use super::{ChangeType, FileDiff, LineDiff};

/// Identity and metadata of a single commit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeSet {
    /// Commit hash
    pub id: String,

    /// Author name
    pub author_name: String,

    /// Author email
    pub author_email: String,

    /// Commit message
    pub message: String,

    /// Author date
    pub timestamp: DateTime<FixedOffset>,
}

/// Per-file summary within a change set detail
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileInfo {
    /// Lines added
    pub insertions: u32,

    /// Lines removed
    pub deletions: u32,

    /// Binary file; once set it never clears within a change set
    pub binary: bool,

    /// Kind of change for the file
    pub status: ChangeType,

    /// Accumulated diff lines in source order
    pub diff_lines: Vec<LineDiff>,
}

/// A commit (or working diff) plus its per-file summary and diff lines
///
/// File ordering equals the order in which each path was first
/// encountered in the summary section.
#[derive(Debug, Clone, Default)]
pub struct ChangeSetDetail {
    /// The commit this detail was derived from; absent for a
    /// working-tree diff
    pub change_set: Option<ChangeSet>,

    /// Footer total: files changed
    pub files_changed: u32,

    /// Footer total: insertions
    pub insertions: u32,

    /// Footer total: deletions
    pub deletions: u32,

    files: Vec<(String, FileInfo)>,
}

impl ChangeSetDetail {
    /// Create a detail attached to a commit
    pub fn with_change_set(change_set: ChangeSet) -> Self {
        Self {
            change_set: Some(change_set),
            ..Default::default()
        }
    }

    /// Does the detail already contain this path?
    pub fn contains_file(&self, path: &str) -> bool {
        self.files.iter().any(|(p, _)| p == path)
    }

    /// Look up a file's summary
    pub fn file(&self, path: &str) -> Option<&FileInfo> {
        self.files.iter().find(|(p, _)| p == path).map(|(_, f)| f)
    }

    /// Mutable lookup
    pub fn file_mut(&mut self, path: &str) -> Option<&mut FileInfo> {
        self.files
            .iter_mut()
            .find(|(p, _)| p == path)
            .map(|(_, f)| f)
    }

    /// Insert a file summary, appending at the end of the ordering
    ///
    /// An existing entry for the same path is replaced in place.
    pub fn insert_file(&mut self, path: impl Into<String>, info: FileInfo) {
        let path = path.into();
        match self.file_mut(&path) {
            Some(existing) => *existing = info,
            None => self.files.push((path, info)),
        }
    }

    /// Get or create a file summary, preserving first-encounter order
    pub fn file_entry(&mut self, path: &str) -> &mut FileInfo {
        let idx = match self.files.iter().position(|(p, _)| p == path) {
            Some(idx) => idx,
            None => {
                self.files.push((path.to_string(), FileInfo::default()));
                self.files.len() - 1
            }
        };
        &mut self.files[idx].1
    }

    /// Iterate files in first-encounter order
    pub fn files(&self) -> impl Iterator<Item = (&str, &FileInfo)> {
        self.files.iter().map(|(p, f)| (p.as_str(), f))
    }

    /// Number of files in the detail
    pub fn file_count(&self) -> usize {
        self.files.len()
    }

    /// Merge one file diff into the detail
    ///
    /// Binary is sticky in both directions: the stored flag becomes the
    /// OR of all inputs, and the diff passed in is updated to the merged
    /// value so the returned object stays consistent with the detail.
    /// Diff lines are appended in source order.
    pub fn merge_file_diff(&mut self, diff: &mut FileDiff) {
        let info = self.file_entry(&diff.file_name);
        info.binary |= diff.binary;
        diff.binary = info.binary;
        info.diff_lines.extend(diff.lines.iter().cloned());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_entry_preserves_order() {
        let mut detail = ChangeSetDetail::default();
        detail.file_entry("b.txt");
        detail.file_entry("a.txt");
        detail.file_entry("b.txt");

        let paths: Vec<&str> = detail.files().map(|(p, _)| p).collect();
        assert_eq!(paths, vec!["b.txt", "a.txt"]);
    }

    #[test]
    fn test_merge_binary_is_sticky() {
        let mut detail = ChangeSetDetail::default();

        let mut binary = FileDiff {
            file_name: "img.png".to_string(),
            binary: true,
            lines: Vec::new(),
        };
        detail.merge_file_diff(&mut binary);

        let mut text = FileDiff::new("img.png");
        detail.merge_file_diff(&mut text);

        assert!(detail.file("img.png").unwrap().binary);
        assert!(text.binary, "merged diff must reflect the sticky flag");
    }

    #[test]
    fn test_merge_appends_lines_in_order() {
        let mut detail = ChangeSetDetail::default();

        let mut first = FileDiff {
            file_name: "a.txt".to_string(),
            binary: false,
            lines: vec![LineDiff::new(ChangeType::Added, "+one")],
        };
        detail.merge_file_diff(&mut first);

        let mut second = FileDiff {
            file_name: "a.txt".to_string(),
            binary: false,
            lines: vec![LineDiff::new(ChangeType::Deleted, "-two")],
        };
        detail.merge_file_diff(&mut second);

        let info = detail.file("a.txt").unwrap();
        assert_eq!(info.diff_lines.len(), 2);
        assert_eq!(info.diff_lines[0].text, "+one");
        assert_eq!(info.diff_lines[1].text, "-two");
    }

    #[test]
    fn test_insert_file_replaces_in_place() {
        let mut detail = ChangeSetDetail::default();
        detail.insert_file(
            "a.txt",
            FileInfo {
                insertions: 1,
                ..Default::default()
            },
        );
        detail.insert_file(
            "b.txt",
            FileInfo {
                insertions: 2,
                ..Default::default()
            },
        );
        detail.insert_file(
            "a.txt",
            FileInfo {
                insertions: 9,
                ..Default::default()
            },
        );

        let paths: Vec<&str> = detail.files().map(|(p, _)| p).collect();
        assert_eq!(paths, vec!["a.txt", "b.txt"]);
        assert_eq!(detail.file("a.txt").unwrap().insertions, 9);
    }
}
