//! CLI integration tests for md2backlog.
//!
//! These tests execute the compiled binary and verify:
//! - Stdin/stdout handling
//! - File input and output
//! - Configuration files and override flags
//! - Exit codes and error messages

mod common;
mod config;
mod convert;
