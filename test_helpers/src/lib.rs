//! Test helpers shared across crates.
//!
//! This crate provides temporary application trees for exercising path
//! resolution and file loading, plus a guard for tests that change the
//! working directory.

pub mod cwd;
pub mod tree;

pub use tree::AppTree;
