//! TestSite helper for function-manager integration tests.
//!
//! Provides a temporary site layout (functions root, data root, log
//! root) and a recording operations client.

use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use serde_json::Value;
use tempfile::TempDir;

use funchost::host::{FunctionManager, HostError, HostPaths, OperationsClient, StdFilesystem};

/// Operations client that records every post instead of sending it.
#[derive(Clone, Default)]
pub struct RecordingOperations {
    posts: Arc<Mutex<Vec<(String, Value)>>>,
}

impl RecordingOperations {
    /// All posts made so far, as (path, body) pairs.
    pub fn posts(&self) -> Vec<(String, Value)> {
        self.posts.lock().expect("posts lock poisoned").clone()
    }
}

impl OperationsClient for RecordingOperations {
    async fn post(&self, path: &str, body: &Value) -> Result<(), HostError> {
        self.posts
            .lock()
            .expect("posts lock poisoned")
            .push((path.to_string(), body.clone()));
        Ok(())
    }
}

/// A temporary site layout for testing the function manager.
pub struct TestSite {
    dir: TempDir,
    pub operations: RecordingOperations,
}

impl TestSite {
    /// Create an empty site with functions, data, and log roots.
    pub fn new() -> Self {
        let dir = TempDir::new().expect("Failed to create temp directory");
        for sub in ["functions", "data", "logs"] {
            std::fs::create_dir_all(dir.path().join(sub)).expect("Failed to create site root");
        }
        Self {
            dir,
            operations: RecordingOperations::default(),
        }
    }

    /// Environment paths rooted at this site.
    pub fn paths(&self) -> HostPaths {
        HostPaths {
            site_root: self.dir.path().to_path_buf(),
            functions_root: self.dir.path().join("functions"),
            data_root: self.dir.path().join("data"),
            log_root: self.dir.path().join("logs"),
            app_base_url: "http://site.example".to_string(),
        }
    }

    /// Build a manager over the real filesystem and the recording client.
    pub fn manager(&self) -> FunctionManager<StdFilesystem, RecordingOperations> {
        FunctionManager::new(self.paths(), StdFilesystem, self.operations.clone())
    }

    /// Write the host-level configuration document.
    pub fn write_host_config(&self, content: &str) {
        std::fs::write(self.dir.path().join("functions").join("host.json"), content)
            .expect("Failed to write host.json");
    }

    /// Write one function's configuration document.
    pub fn write_function_config(&self, name: &str, content: &str) {
        self.write_function_file(name, "function.json", content);
    }

    /// Write a file inside a function directory.
    pub fn write_function_file(&self, name: &str, file: &str, content: &str) {
        let dir = self.dir.path().join("functions").join(name);
        std::fs::create_dir_all(&dir).expect("Failed to create function directory");
        std::fs::write(dir.join(file), content).expect("Failed to write function file");
    }

    /// Absolute path of a function directory.
    pub fn function_dir(&self, name: &str) -> PathBuf {
        self.dir.path().join("functions").join(name)
    }

    /// Absolute path of an auxiliary artifact under the data root.
    pub fn data_path(&self, rel: &str) -> PathBuf {
        self.dir.path().join("data").join(rel)
    }
}

impl Default for TestSite {
    fn default() -> Self {
        Self::new()
    }
}
