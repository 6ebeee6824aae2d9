//! Funchost - source-control and function-metadata core
//!
//! Library backing a site-deployment runtime that hosts user functions
//! and keeps their deployment history in a local git repository.
//!
//! This library provides:
//! - [`model`]: Domain models (change sets, file diffs, function envelopes)
//! - [`scm`]: Git command execution and output parsing
//! - [`host`]: Function enumeration, CRUD, and trigger synchronization

pub mod host;
pub mod model;
pub mod scm;
