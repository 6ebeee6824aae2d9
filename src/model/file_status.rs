//! File status data model

/// Kind of change recorded for a file or diff line
///
/// `None` represents context lines in a diff (no change on that line).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChangeType {
    /// File or line was added
    Added,

    /// File or line was deleted
    Deleted,

    /// File was modified
    Modified,

    /// File was renamed
    Renamed,

    /// File is not tracked by the repository
    Untracked,

    /// No change (diff context line)
    #[default]
    None,
}

impl ChangeType {
    /// Map a porcelain status code to a change type
    ///
    /// Returns `None` for codes outside the accepted set; the caller
    /// decides whether that is fatal.
    pub fn from_porcelain_code(code: &str) -> Option<Self> {
        match code {
            "A" | "AM" => Some(ChangeType::Added),
            "M" | "MM" => Some(ChangeType::Modified),
            "D" => Some(ChangeType::Deleted),
            "R" => Some(ChangeType::Renamed),
            "??" => Some(ChangeType::Untracked),
            _ => None,
        }
    }
}

/// Status of a single file as reported by `status --porcelain`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileStatus {
    /// Path relative to the repository root
    pub path: String,

    /// Kind of change
    pub status: ChangeType,
}
