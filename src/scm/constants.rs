//! Git-specific constants
//!
//! Centralized definitions for git command names, flags, and special
//! output markers the parser keys on.

/// git command binary name
pub const GIT_COMMAND: &str = "git";

/// Minimum supported git version
pub const MIN_GIT_VERSION: &str = "1.7.0";

/// git subcommands
pub mod commands {
    pub const ADD: &str = "add";
    pub const BRANCH: &str = "branch";
    pub const CHECKOUT: &str = "checkout";
    pub const COMMIT: &str = "commit";
    pub const CONFIG: &str = "config";
    pub const DIFF: &str = "diff";
    pub const INIT: &str = "init";
    pub const LOG: &str = "log";
    pub const REV_PARSE: &str = "rev-parse";
    pub const RM: &str = "rm";
    pub const SHOW: &str = "show";
    pub const STATUS: &str = "status";
}

/// git command flags
pub mod flags {
    /// Machine-readable status output
    pub const PORCELAIN: &str = "--porcelain";
    /// Walk every ref, not just HEAD
    pub const ALL: &str = "--all";
    /// Per-file insertion/deletion counts
    pub const NUMSTAT: &str = "--numstat";
    /// Footer totals line
    pub const SHORTSTAT: &str = "--shortstat";
    /// Status letter per file instead of a patch
    pub const NAME_STATUS: &str = "--name-status";
    /// Show merge commits against each parent
    pub const MERGE_PARENTS: &str = "-m";
    /// Emit a patch
    pub const PATCH: &str = "-p";
    /// Limit to the index
    pub const STAGED: &str = "--staged";
    /// Never invoke an external diff helper
    pub const NO_EXT_DIFF: &str = "--no-ext-diff";
    /// Discard local modifications on checkout
    pub const FORCE: &str = "--force";
    /// Keep the file on disk when removing from the index
    pub const CACHED: &str = "--cached";
    /// Show version
    pub const VERSION: &str = "--version";
}

/// Special output markers
pub mod markers {
    /// Start of a per-file diff chunk
    pub const DIFF_HEADER: &str = "diff --git ";
    /// Start of a commit block
    pub const COMMIT_HEADER: &str = "commit ";
    /// Binary patch body
    pub const BINARY_PATCH: &str = "GIT binary patch";
    /// Hunk header prefix
    pub const HUNK_HEADER: &str = "@@";
    /// Commit output indicating there was nothing to commit
    pub const WORKING_DIR_CLEAN: &str = "working directory clean";
    /// Version output prefix (e.g., "git version 2.39.2")
    pub const VERSION_PREFIX: &str = "git version ";
}
