//! Common test utilities for claude-plugins CLI tests.
//!
//! This module provides:
//! - `TestEnv`: Isolated project directory with staged npm packages
//! - `TestResult`: Captured CLI output with assertion helpers

pub mod env;

pub use env::*;
