//! Apprig - run the build commands of configured app targets
//!
//! This library reads an `apprig.toml` describing app targets, runs each
//! target's user-provided build command, and checks that the expected app
//! binary exists afterwards.
//!
//! # Architecture
//!
//! The crate is organized into several modules:
//!
//! - [`cli`] - Command-line interface parsing and output formatting
//! - [`core`] - Business logic (configuration, target resolution, orchestration)
//! - [`infra`] - Infrastructure layer (processes, filesystem)
//! - [`config`] - Configuration constants
//! - [`error`] - Error types and handling

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod infra;
