//! Function metadata manager
//!
//! Owns the on-disk layout of hosted functions: one directory per
//! function under the functions root, each holding a `function.json`
//! configuration document next to the user's source files, plus
//! auxiliary sample-data, secrets, and log locations.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::warn;

use crate::model::FunctionEnvelope;

use super::{Filesystem, HostError, OperationsClient};

/// Per-function configuration document name
const FUNCTION_CONFIG_FILE: &str = "function.json";

/// Host-level configuration document name; its presence enables the
/// function host feature
const HOST_CONFIG_FILE: &str = "host.json";

/// Operations path the trigger aggregate is posted to
const SET_TRIGGERS_PATH: &str = "/operations/settriggers";

/// Environment paths the manager is constructed with
#[derive(Debug, Clone)]
pub struct HostPaths {
    /// Root every virtual-filesystem URI is computed against
    pub site_root: PathBuf,

    /// Directory holding one subdirectory per function
    pub functions_root: PathBuf,

    /// Root for sample-data and secrets artifacts
    pub data_root: PathBuf,

    /// Root for per-function log directories
    pub log_root: PathBuf,

    /// Public base URL of the site (no trailing slash required)
    pub app_base_url: String,
}

/// Write payload for create-or-update
///
/// Either a full set of files (the configuration document among them)
/// or just a configuration object to be written as `function.json`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FunctionPayload {
    /// Configuration document; defaults to an empty object
    pub config: Option<Value>,

    /// File name to text content; replaces the directory contents
    pub files: Option<BTreeMap<String, String>>,
}

/// Manager over the on-disk function layout
pub struct FunctionManager<F, O> {
    paths: HostPaths,
    fs: F,
    operations: O,
}

impl<F: Filesystem, O: OperationsClient> FunctionManager<F, O> {
    /// Create a manager over the given environment
    pub fn new(paths: HostPaths, fs: F, operations: O) -> Self {
        Self {
            paths,
            fs,
            operations,
        }
    }

    /// Enumerate all functions with a readable configuration
    ///
    /// Directories missing `function.json`, or whose document does not
    /// parse as a JSON object, are silently omitted. Order follows
    /// directory iteration.
    pub fn list(&self) -> Result<Vec<FunctionEnvelope>, HostError> {
        let mut envelopes = Vec::new();
        for dir in self.fs.get_directories(&self.paths.functions_root)? {
            let Some(name) = dir.file_name().and_then(|n| n.to_str()) else {
                continue;
            };
            if let Ok(envelope) = self.read_envelope(name) {
                envelopes.push(envelope);
            }
        }
        Ok(envelopes)
    }

    /// Get one function's envelope
    ///
    /// A missing or invalid configuration document surfaces as
    /// [`HostError::NotFound`], matching the wire behavior of the
    /// enclosing service.
    pub fn get(&self, name: &str) -> Result<FunctionEnvelope, HostError> {
        self.read_envelope(name)
            .map_err(|_| HostError::NotFound(name.to_string()))
    }

    /// Create or replace a function on disk and return its fresh envelope
    pub fn create_or_update(
        &self,
        name: &str,
        payload: FunctionPayload,
    ) -> Result<FunctionEnvelope, HostError> {
        let dir = self.function_dir(name);
        self.fs.ensure_directory(&dir)?;

        if let Some(files) = payload.files {
            self.fs.delete_directory_contents_safe(&dir);
            for (file_name, content) in &files {
                self.fs.write_all_text(&dir.join(file_name), content)?;
            }
        } else {
            let config = payload.config.unwrap_or_else(|| Value::Object(Map::new()));
            self.fs.write_all_text(
                &dir.join(FUNCTION_CONFIG_FILE),
                &serde_json::to_string_pretty(&config)?,
            )?;
        }

        self.get(name)
    }

    /// Delete a function and its auxiliary artifacts
    ///
    /// Failure on the function directory propagates; auxiliary cleanup
    /// is best-effort.
    pub fn delete(&self, name: &str) -> Result<(), HostError> {
        self.fs
            .delete_directory_safe(&self.function_dir(name), false)?;

        self.fs.delete_file_safe(&self.test_data_path(name));
        self.fs.delete_file_safe(&self.secrets_path(name));
        let _ = self.fs.delete_directory_safe(&self.log_dir(name), true);
        Ok(())
    }

    /// Read the host-level configuration; an absent file is the empty
    /// object
    pub fn host_config(&self) -> Result<Value, HostError> {
        let path = self.host_config_path();
        if !self.fs.exists(&path) {
            return Ok(Value::Object(Map::new()));
        }
        let text = self.fs.read_all_text(&path)?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Write the host-level configuration
    pub fn put_host_config(&self, config: &Value) -> Result<(), HostError> {
        self.fs.write_all_text(
            &self.host_config_path(),
            &serde_json::to_string_pretty(config)?,
        )?;
        Ok(())
    }

    /// Discover trigger bindings and post them to the operations
    /// endpoint
    ///
    /// Without a host configuration the feature is off and nothing is
    /// enumerated. A failure on one function skips that function only.
    /// Nothing is posted when no triggers exist.
    pub async fn sync_triggers(&self) -> Result<(), HostError> {
        if !self.fs.exists(&self.host_config_path()) {
            return Ok(());
        }

        let mut triggers = Vec::new();
        for envelope in self.list()? {
            if envelope.is_disabled() {
                continue;
            }
            match trigger_bindings(&envelope) {
                Ok(bindings) => triggers.extend(bindings),
                Err(e) => {
                    warn!(function = %envelope.name, error = %e, "skipping function during trigger sync");
                }
            }
        }

        if triggers.is_empty() {
            return Ok(());
        }

        self.operations
            .post(SET_TRIGGERS_PATH, &Value::Array(triggers))
            .await
    }

    /// Read one envelope from disk, building its href set
    fn read_envelope(&self, name: &str) -> Result<FunctionEnvelope, HostError> {
        let dir = self.function_dir(name);
        let config_path = dir.join(FUNCTION_CONFIG_FILE);
        if !self.fs.exists(&config_path) {
            return Err(HostError::NotFound(name.to_string()));
        }

        let text = self.fs.read_all_text(&config_path)?;
        let config: Value = serde_json::from_str(&text).map_err(|_| HostError::InvalidConfig {
            name: name.to_string(),
        })?;
        if !config.is_object() {
            return Err(HostError::InvalidConfig {
                name: name.to_string(),
            });
        }

        let script_path = self.primary_script_path(name, &config)?;
        let script_href = if script_path == dir {
            self.vfs_uri(&script_path, true)
        } else {
            self.vfs_uri(&script_path, false)
        };

        Ok(FunctionEnvelope {
            name: name.to_string(),
            href: format!(
                "{}/api/functions/{}",
                self.paths.app_base_url.trim_end_matches('/'),
                name
            ),
            script_root_href: self.vfs_uri(&dir, true),
            script_href,
            config_href: self.vfs_uri(&config_path, false),
            test_data_href: self.vfs_uri(&self.test_data_path(name), false),
            secrets_file_href: self.vfs_uri(&self.secrets_path(name), false),
            config,
        })
    }

    /// Pick the function's primary script file
    ///
    /// With a single source file the answer is that file. Otherwise a
    /// file named `run.*` wins, then `index.js`, then the file named by
    /// `config.source`, and finally the directory itself.
    fn primary_script_path(&self, name: &str, config: &Value) -> Result<PathBuf, HostError> {
        let dir = self.function_dir(name);
        let mut files = self.fs.get_files(&dir, "*", true)?;
        files.retain(|f| {
            f.file_name()
                .and_then(|n| n.to_str())
                .is_none_or(|n| n != FUNCTION_CONFIG_FILE)
        });

        match files.len() {
            0 => Ok(dir),
            1 => Ok(files.remove(0)),
            _ => {
                let by_name = |candidate: &dyn Fn(&str) -> bool| {
                    files
                        .iter()
                        .find(|f| {
                            f.file_name()
                                .and_then(|n| n.to_str())
                                .is_some_and(candidate)
                        })
                        .cloned()
                };

                if let Some(run) = by_name(&|n: &str| n.starts_with("run.")) {
                    return Ok(run);
                }
                if let Some(index) = by_name(&|n: &str| n == "index.js") {
                    return Ok(index);
                }
                if let Some(source) = config.get("source").and_then(Value::as_str)
                    && !has_parent_traversal(source)
                {
                    return Ok(dir.join(source));
                }
                Ok(dir)
            }
        }
    }

    /// Compute the virtual-filesystem URI for a path under the site root
    ///
    /// Directories carry a trailing slash so the namespace distinguishes
    /// them from files.
    fn vfs_uri(&self, path: &Path, is_directory: bool) -> String {
        let relative = path.strip_prefix(&self.paths.site_root).unwrap_or(path);
        let relative = relative.to_string_lossy().replace('\\', "/");
        format!(
            "{}/api/vfs/{}{}",
            self.paths.app_base_url.trim_end_matches('/'),
            relative,
            if is_directory { "/" } else { "" }
        )
    }

    fn function_dir(&self, name: &str) -> PathBuf {
        self.paths.functions_root.join(name)
    }

    fn host_config_path(&self) -> PathBuf {
        self.paths.functions_root.join(HOST_CONFIG_FILE)
    }

    fn test_data_path(&self, name: &str) -> PathBuf {
        self.paths
            .data_root
            .join("functions")
            .join("sampledata")
            .join(format!("{}.dat", name))
    }

    fn secrets_path(&self, name: &str) -> PathBuf {
        self.paths
            .data_root
            .join("functions")
            .join("secrets")
            .join(format!("{}.json", name))
    }

    fn log_dir(&self, name: &str) -> PathBuf {
        self.paths
            .log_root
            .join("functions")
            .join("function")
            .join(name)
    }
}

/// Extract the trigger input bindings of one function
///
/// A `bindings` or `bindings.input` member of the wrong shape fails the
/// function; missing members read as no bindings. A binding is a
/// trigger when its `type` string ends in `Trigger`, case-insensitive.
fn trigger_bindings(envelope: &FunctionEnvelope) -> Result<Vec<Value>, HostError> {
    let invalid = || HostError::InvalidConfig {
        name: envelope.name.clone(),
    };

    let bindings = match envelope.config.get("bindings") {
        None => return Ok(Vec::new()),
        Some(Value::Object(bindings)) => bindings,
        Some(_) => return Err(invalid()),
    };
    let input = match bindings.get("input") {
        None => return Ok(Vec::new()),
        Some(Value::Array(input)) => input,
        Some(_) => return Err(invalid()),
    };

    Ok(input
        .iter()
        .filter(|binding| {
            binding
                .get("type")
                .and_then(Value::as_str)
                .is_some_and(|t| t.to_ascii_lowercase().ends_with("trigger"))
        })
        .cloned()
        .collect())
}

/// True when any path segment is a parent-directory reference
fn has_parent_traversal(source: &str) -> bool {
    source
        .split(['/', '\\'])
        .any(|segment| segment.contains(".."))
}
