//! Common test utilities for asset-manager CLI tests.
//!
//! This module provides:
//! - `TestEnv`: Isolated project with a public directory and vendor tree
//! - Fixtures: module configuration sources

#![allow(dead_code)]

pub mod env;
pub mod fixtures;

pub use env::*;
pub use fixtures::*;
