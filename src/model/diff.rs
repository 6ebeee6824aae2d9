//! Diff data model
//!
//! Represents parsed per-file patch output from `show` and `diff`.

use super::ChangeType;

/// A single line in a file diff
///
/// The text keeps the leading sign character exactly as emitted by the
/// tool, so callers can re-render the patch without reconstruction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineDiff {
    /// `Added`, `Deleted`, or `None` (context)
    pub kind: ChangeType,

    /// Raw line text including the leading `+`/`-`/space
    pub text: String,
}

impl LineDiff {
    /// Create a line diff from a raw patch line
    pub fn new(kind: ChangeType, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }
}

/// Patch content for one file within a change set or working diff
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileDiff {
    /// Path relative to the repository root
    pub file_name: String,

    /// True when the tool emitted a binary patch for this file, or an
    /// earlier record for the same file in the same change set did
    pub binary: bool,

    /// Ordered diff lines; empty when `binary` is true
    pub lines: Vec<LineDiff>,
}

impl FileDiff {
    /// Create an empty diff for a file
    pub fn new(file_name: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
            binary: false,
            lines: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_diff_new() {
        let diff = FileDiff::new("src/main.rs");
        assert_eq!(diff.file_name, "src/main.rs");
        assert!(!diff.binary);
        assert!(diff.lines.is_empty());
    }

    #[test]
    fn test_line_diff_keeps_sign() {
        let line = LineDiff::new(ChangeType::Added, "+let x = 1;");
        assert_eq!(line.kind, ChangeType::Added);
        assert_eq!(line.text, "+let x = 1;");
    }
}
