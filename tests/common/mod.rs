//! Common test utilities for integration tests.
//!
//! This module provides helpers for creating temporary repositories and
//! site layouts.
//!
//! Note: Each integration test file compiles as a separate crate,
//! so not all helpers are used in every test file. We suppress
//! dead_code warnings at the module level.

#![allow(dead_code)]
#![allow(unused_imports)]

pub mod test_repo;
pub mod test_site;

pub use test_repo::TestRepo;
pub use test_site::{RecordingOperations, TestSite};

/// Is a usable git binary on PATH?
///
/// Tests that drive the real executable bail out early when it is
/// missing instead of failing the suite.
pub fn git_available() -> bool {
    std::process::Command::new("git")
        .arg("--version")
        .output()
        .map(|o| o.status.success())
        .unwrap_or(false)
}
