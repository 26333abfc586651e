//! Error types for apprig
//!
//! Domain-specific error types using thiserror.

use std::path::PathBuf;
use thiserror::Error;

/// Configuration loading and target resolution errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// No config file discovered
    #[error(
        "No apprig.toml found in '{dir}' or any parent directory. Use --config-path to point at one"
    )]
    NotFound { dir: PathBuf },

    /// Config file could not be read
    #[error("Failed to read config file '{path}'")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Config file is not valid TOML or does not match the schema
    #[error("Failed to parse config file '{path}'")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// `extends` is not a string
    #[error("Config file '{path}' has an invalid 'extends' value: expected string, got {found}")]
    InvalidExtends { path: PathBuf, found: String },

    /// `extends` chain loops back on itself
    #[error("Config file '{path}' extends '{extends}', which is already part of the extends chain")]
    ExtendsCycle { path: PathBuf, extends: PathBuf },

    /// No `[configurations]` defined
    #[error("Config file '{path}' defines no configurations")]
    NoConfigurations { path: PathBuf },

    /// Several configurations and none selected
    #[error(
        "Cannot determine which configuration to use from '{path}'. Select one with --configuration: {}",
        available.join(", ")
    )]
    AmbiguousConfiguration {
        path: PathBuf,
        available: Vec<String>,
    },

    /// Selected configuration does not exist
    #[error(
        "Configuration '{name}' not found in '{path}'. Available configurations: {}",
        available.join(", ")
    )]
    ConfigurationNotFound {
        name: String,
        path: PathBuf,
        available: Vec<String>,
    },

    /// Configuration names no app at all
    #[error("Configuration '{configuration}' must reference its apps with either 'app' or 'apps'")]
    NoAppReference { configuration: String },

    /// Configuration uses both `app` and `apps`
    #[error("Configuration '{configuration}' sets both 'app' and 'apps' (only one allowed)")]
    ConflictingAppReference { configuration: String },

    /// Configuration references an app missing from `[apps]`
    #[error("Configuration '{configuration}' references unknown app '{app}'")]
    UnknownApp { configuration: String, app: String },

    /// Configuration references the same app twice
    #[error("Configuration '{configuration}' references app '{app}' more than once")]
    DuplicateApp { configuration: String, app: String },
}

/// Failure of a user-provided shell command
#[derive(Error, Debug)]
pub enum CommandFailure {
    /// The shell could not be started
    #[error("Failed to launch `{command}`")]
    Launch {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// Non-zero exit status
    #[error("`{command}` exited with code {code}")]
    Exit { command: String, code: i32 },

    /// Killed before it could exit
    #[error("`{command}` was terminated by a signal")]
    Signal { command: String },
}

/// Build errors
#[derive(Error, Debug)]
pub enum BuildError {
    /// The app's build command failed or could not be launched
    #[error("Build command for app '{target}' failed")]
    BuildFailed {
        target: String,
        #[source]
        source: CommandFailure,
    },

    /// The app has no build command and silent mode is off
    #[error(
        "App '{target}' in configuration '{configuration}' ({config_path}) has no build command. \
         Add a 'build' entry for it or pass --silent to skip apps without one"
    )]
    MissingBuildCommand {
        target: String,
        configuration: String,
        config_path: PathBuf,
    },
}

/// Top-level apprig error type
#[derive(Error, Debug)]
pub enum ApprigError {
    /// Configuration error
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Build error
    #[error(transparent)]
    Build(#[from] BuildError),
}
