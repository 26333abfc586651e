//! Target resolution
//!
//! Turns the selection flags (config path, configuration name) into the
//! ordered list of app targets to build. The build orchestrator only ever sees
//! the result; it never touches the configuration document itself.

use std::path::{Path, PathBuf};

use crate::core::config::{self, ConfigFile, ConfigurationEntry};
use crate::error::{BuildError, ConfigError};

/// One app target, ready to build
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetDescriptor {
    /// App name, unique within a run
    pub name: String,
    /// Shell command that builds the app
    pub build_command: Option<String>,
    /// Expected location of the build artifact
    pub artifact_path: Option<PathBuf>,
}

impl TargetDescriptor {
    /// Create a descriptor with neither command nor artifact
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            build_command: None,
            artifact_path: None,
        }
    }

    /// Set the build command
    #[must_use]
    pub fn with_build_command(mut self, command: impl Into<String>) -> Self {
        self.build_command = Some(command.into());
        self
    }

    /// Set the artifact path
    #[must_use]
    pub fn with_artifact_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.artifact_path = Some(path.into());
        self
    }
}

/// Builds domain errors that point back at the resolved configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorBuilder {
    config_path: PathBuf,
    configuration: String,
}

impl ErrorBuilder {
    pub fn new(config_path: impl Into<PathBuf>, configuration: impl Into<String>) -> Self {
        Self {
            config_path: config_path.into(),
            configuration: configuration.into(),
        }
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    pub fn configuration(&self) -> &str {
        &self.configuration
    }

    /// Error for an app that has no build command
    pub fn missing_build_command(&self, target: &str) -> BuildError {
        BuildError::MissingBuildCommand {
            target: target.to_string(),
            configuration: self.configuration.clone(),
            config_path: self.config_path.clone(),
        }
    }
}

/// Output of a resolver: targets in build order plus their error factory
#[derive(Debug, Clone)]
pub struct ResolvedTargets {
    pub targets: Vec<TargetDescriptor>,
    pub errors: ErrorBuilder,
}

/// Selection inputs for a resolver
#[derive(Debug, Clone, Default)]
pub struct ResolveOptions {
    /// Explicit config file; discovered from `cwd` when absent
    pub config_path: Option<PathBuf>,
    /// Configuration name; inferred when the document has only one
    pub configuration: Option<String>,
    /// Directory relative paths and discovery start from
    pub cwd: PathBuf,
}

/// Source of the targets to build
pub trait TargetResolver {
    fn resolve(&self, options: &ResolveOptions) -> Result<ResolvedTargets, ConfigError>;
}

/// Resolves targets from an `apprig.toml` on disk
#[derive(Debug, Default, Clone, Copy)]
pub struct FileTargetResolver;

impl TargetResolver for FileTargetResolver {
    fn resolve(&self, options: &ResolveOptions) -> Result<ResolvedTargets, ConfigError> {
        let config_path = match &options.config_path {
            Some(path) => options.cwd.join(path),
            None => config::discover(&options.cwd).ok_or_else(|| ConfigError::NotFound {
                dir: options.cwd.clone(),
            })?,
        };

        tracing::debug!("Using config file: {}", config_path.display());

        let file = ConfigFile::load(&config_path)?;
        resolve_targets(&file, &config_path, options.configuration.as_deref())
    }
}

/// Select a configuration from a loaded document and expand it into targets
pub fn resolve_targets(
    file: &ConfigFile,
    config_path: &Path,
    requested: Option<&str>,
) -> Result<ResolvedTargets, ConfigError> {
    let (name, entry) = select_configuration(file, config_path, requested)?;
    tracing::debug!("Selected configuration: {name}");

    let mut targets: Vec<TargetDescriptor> = Vec::new();
    for app_name in entry.app_names(name)? {
        let app = file
            .apps
            .get(app_name)
            .ok_or_else(|| ConfigError::UnknownApp {
                configuration: name.to_string(),
                app: app_name.to_string(),
            })?;

        if targets.iter().any(|target| target.name == app_name) {
            return Err(ConfigError::DuplicateApp {
                configuration: name.to_string(),
                app: app_name.to_string(),
            });
        }

        targets.push(TargetDescriptor {
            name: app_name.to_string(),
            build_command: app.build_command().map(str::to_string),
            artifact_path: app.binary_path.clone(),
        });
    }

    Ok(ResolvedTargets {
        targets,
        errors: ErrorBuilder::new(config_path, name),
    })
}

fn select_configuration<'a>(
    file: &'a ConfigFile,
    config_path: &Path,
    requested: Option<&str>,
) -> Result<(&'a str, &'a ConfigurationEntry), ConfigError> {
    let available = || file.configurations.keys().cloned().collect::<Vec<_>>();

    if let Some(requested) = requested {
        return file
            .configurations
            .get_key_value(requested)
            .map(|(name, entry)| (name.as_str(), entry))
            .ok_or_else(|| ConfigError::ConfigurationNotFound {
                name: requested.to_string(),
                path: config_path.to_path_buf(),
                available: available(),
            });
    }

    let mut entries = file.configurations.iter();
    match (entries.next(), entries.next()) {
        (Some((name, entry)), None) => Ok((name.as_str(), entry)),
        (None, _) => Err(ConfigError::NoConfigurations {
            path: config_path.to_path_buf(),
        }),
        (Some(_), Some(_)) => Err(ConfigError::AmbiguousConfiguration {
            path: config_path.to_path_buf(),
            available: available(),
        }),
    }
}
