//! Common test utilities and helpers
//!
//! This module provides shared utilities for the integration tests:
//! - Configuration and app fixtures
//! - A scripted HTTP client standing in for GitHub
//! - Request/response helpers for driving the router
//! - Custom assertion macros

#![allow(dead_code)]

pub mod assertions;
pub mod fixtures;
pub mod mock_server;

// Re-export commonly used utilities
pub use fixtures::*;
pub use mock_server::*;
