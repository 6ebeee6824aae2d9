//! Filesystem abstraction for the hosting layer
//!
//! The manager goes through this trait so tests can run against a
//! temporary directory and the enclosing service can interpose its own
//! sandboxing. `_safe` operations swallow errors by contract.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Filesystem surface used by the function manager
pub trait Filesystem {
    /// Does a file exist at this path?
    fn exists(&self, path: &Path) -> bool;

    /// Does a directory exist at this path?
    fn directory_exists(&self, path: &Path) -> bool;

    /// Create the directory (and parents) if missing
    fn ensure_directory(&self, path: &Path) -> io::Result<()>;

    /// Remove a directory tree
    ///
    /// With `ignore_errors` all failures (including a missing path) are
    /// swallowed; otherwise they propagate.
    fn delete_directory_safe(&self, path: &Path, ignore_errors: bool) -> io::Result<()>;

    /// Remove everything inside a directory, keeping the directory
    ///
    /// Per-entry failures are swallowed.
    fn delete_directory_contents_safe(&self, path: &Path);

    /// Remove a file, swallowing failures
    fn delete_file_safe(&self, path: &Path);

    /// Immediate subdirectories, in directory-iteration order
    fn get_directories(&self, path: &Path) -> io::Result<Vec<PathBuf>>;

    /// Files matching a `*`-style pattern
    ///
    /// `top_only` limits the walk to the directory itself.
    fn get_files(&self, path: &Path, pattern: &str, top_only: bool) -> io::Result<Vec<PathBuf>>;

    /// Read a file as UTF-8 text
    fn read_all_text(&self, path: &Path) -> io::Result<String>;

    /// Write a file as UTF-8 text, replacing any existing content
    fn write_all_text(&self, path: &Path, content: &str) -> io::Result<()>;
}

/// Production filesystem over `std::fs`
#[derive(Debug, Clone, Default)]
pub struct StdFilesystem;

impl Filesystem for StdFilesystem {
    fn exists(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn directory_exists(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn ensure_directory(&self, path: &Path) -> io::Result<()> {
        fs::create_dir_all(path)
    }

    fn delete_directory_safe(&self, path: &Path, ignore_errors: bool) -> io::Result<()> {
        match fs::remove_dir_all(path) {
            Ok(()) => Ok(()),
            Err(_) if ignore_errors => Ok(()),
            Err(e) => Err(e),
        }
    }

    fn delete_directory_contents_safe(&self, path: &Path) {
        let Ok(entries) = fs::read_dir(path) else {
            return;
        };
        for entry in entries.flatten() {
            let target = entry.path();
            if target.is_dir() {
                let _ = fs::remove_dir_all(&target);
            } else {
                let _ = fs::remove_file(&target);
            }
        }
    }

    fn delete_file_safe(&self, path: &Path) {
        let _ = fs::remove_file(path);
    }

    fn get_directories(&self, path: &Path) -> io::Result<Vec<PathBuf>> {
        let mut dirs = Vec::new();
        for entry in fs::read_dir(path)? {
            let entry = entry?;
            if entry.file_type()?.is_dir() {
                dirs.push(entry.path());
            }
        }
        Ok(dirs)
    }

    fn get_files(&self, path: &Path, pattern: &str, top_only: bool) -> io::Result<Vec<PathBuf>> {
        let mut files = Vec::new();
        let mut pending = vec![path.to_path_buf()];
        while let Some(dir) = pending.pop() {
            for entry in fs::read_dir(&dir)? {
                let entry = entry?;
                let target = entry.path();
                if entry.file_type()?.is_dir() {
                    if !top_only {
                        pending.push(target);
                    }
                } else if matches_pattern(&target, pattern) {
                    files.push(target);
                }
            }
        }
        Ok(files)
    }

    fn read_all_text(&self, path: &Path) -> io::Result<String> {
        fs::read_to_string(path)
    }

    fn write_all_text(&self, path: &Path, content: &str) -> io::Result<()> {
        fs::write(path, content)
    }
}

/// Match a file name against a single-`*` glob (`*`, `*.json`, `run.*`)
fn matches_pattern(path: &Path, pattern: &str) -> bool {
    if pattern == "*" {
        return true;
    }
    let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
        return false;
    };
    match pattern.split_once('*') {
        Some((prefix, suffix)) => {
            name.len() >= prefix.len() + suffix.len()
                && name.starts_with(prefix)
                && name.ends_with(suffix)
        }
        None => name == pattern,
    }
}
