//! Function hosting layer
//!
//! Enumerates hosted functions on disk, exposes CRUD over their layout,
//! and synchronizes trigger bindings to the runtime's operations
//! endpoint.

mod fs;
mod manager;
mod operations;

pub use fs::{Filesystem, StdFilesystem};
pub use manager::{FunctionManager, FunctionPayload, HostPaths};
pub use operations::{HttpOperationsClient, OperationsClient};

use std::io;
use thiserror::Error;

/// Errors from the function hosting layer
#[derive(Error, Debug)]
pub enum HostError {
    #[error("function '{0}' not found")]
    NotFound(String),

    #[error("invalid configuration for function '{name}'")]
    InvalidConfig { name: String },

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("operations endpoint returned status {status}")]
    Operations { status: u16 },
}
