//! Integration tests for certcheck
//!
//! These tests verify the interaction between multiple components. Remote
//! lookups run against a scripted session or a local mock server.

pub mod config_tests;
pub mod session_tests;
pub mod storage_tests;
