//! Core business logic module
//!
//! This module contains all business logic for apprig.
//! Process execution and filesystem access are injected from [`crate::infra`].
//!
//! # Submodules
//!
//! - [`config`] - Configuration document (apprig.toml) parsing
//! - [`resolver`] - Configuration selection and target resolution
//! - [`builder`] - Build orchestration logic

pub mod builder;
pub mod config;
pub mod resolver;
