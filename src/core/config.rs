//! Configuration document (apprig.toml) parsing
//!
//! The document declares app targets under `[apps]` and named selections of
//! those apps under `[configurations]`. A document may set `extends` to the
//! path of another document; tables are merged deeply, with the extending
//! document taking precedence.
//!
//! Table order is preserved throughout, so apps are built in the order the
//! configuration lists them.

use indexmap::IndexMap;
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::config::defaults::CONFIG_FILE_NAMES;
use crate::error::ConfigError;

/// The whole configuration document
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    /// App targets by name
    #[serde(default)]
    pub apps: IndexMap<String, AppConfig>,

    /// Named selections of apps
    #[serde(default)]
    pub configurations: IndexMap<String, ConfigurationEntry>,
}

/// One app target as written in the document
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct AppConfig {
    /// Shell command that builds the app
    #[serde(default)]
    pub build: Option<String>,

    /// Where the build is expected to leave the app binary or bundle
    #[serde(default)]
    pub binary_path: Option<PathBuf>,
}

impl AppConfig {
    /// The build command, with an empty string treated as unset
    pub fn build_command(&self) -> Option<&str> {
        self.build.as_deref().filter(|command| !command.is_empty())
    }
}

/// A named configuration: which apps it builds
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ConfigurationEntry {
    /// Single app reference
    #[serde(default)]
    pub app: Option<String>,

    /// Multiple app references, built in this order
    #[serde(default)]
    pub apps: Vec<String>,
}

impl ConfigurationEntry {
    /// Referenced app names in build order
    ///
    /// `configuration` is only used for error messages.
    pub fn app_names(&self, configuration: &str) -> Result<Vec<&str>, ConfigError> {
        match (&self.app, self.apps.is_empty()) {
            (Some(_), false) => Err(ConfigError::ConflictingAppReference {
                configuration: configuration.to_string(),
            }),
            (Some(app), true) => Ok(vec![app.as_str()]),
            (None, false) => Ok(self.apps.iter().map(String::as_str).collect()),
            (None, true) => Err(ConfigError::NoAppReference {
                configuration: configuration.to_string(),
            }),
        }
    }
}

impl ConfigFile {
    /// Load a config file, resolving its `extends` chain
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let root = path.canonicalize().unwrap_or_else(|_| path.to_path_buf());
        let mut chain = vec![root];
        let table = load_table(path, &mut chain)?;

        toml::Value::Table(table)
            .try_into()
            .map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })
    }

    /// Parse a config document from a TOML string (no `extends` support)
    pub fn from_toml(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }
}

/// Find a config file in `start_dir` or the nearest ancestor that has one
pub fn discover(start_dir: &Path) -> Option<PathBuf> {
    start_dir
        .ancestors()
        .flat_map(|dir| CONFIG_FILE_NAMES.iter().map(move |name| dir.join(name)))
        .find(|candidate| candidate.is_file())
}

/// Read one document and merge it over everything it extends.
///
/// `chain` holds the canonical paths already on the extends chain.
fn load_table(path: &Path, chain: &mut Vec<PathBuf>) -> Result<toml::Table, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let mut table: toml::Table = toml::from_str(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    let extends = match table.remove("extends") {
        None => return Ok(table),
        Some(toml::Value::String(extends)) => extends,
        Some(other) => {
            return Err(ConfigError::InvalidExtends {
                path: path.to_path_buf(),
                found: other.type_str().to_string(),
            })
        }
    };

    let base_dir = path.parent().unwrap_or(Path::new("."));
    let base_path = base_dir.join(&extends);
    let canonical = base_path
        .canonicalize()
        .unwrap_or_else(|_| base_path.clone());

    if chain.contains(&canonical) {
        return Err(ConfigError::ExtendsCycle {
            path: path.to_path_buf(),
            extends: base_path,
        });
    }
    chain.push(canonical);

    tracing::debug!("{} extends {}", path.display(), base_path.display());

    let mut merged = load_table(&base_path, chain)?;
    merge_tables(&mut merged, &table);
    Ok(merged)
}

/// Deep-merge `overrides` into `base`; nested tables merge, anything else is replaced
fn merge_tables(base: &mut toml::Table, overrides: &toml::Table) {
    for (key, override_value) in overrides {
        match (base.get_mut(key), override_value) {
            (Some(toml::Value::Table(base_table)), toml::Value::Table(override_table)) => {
                merge_tables(base_table, override_table);
            }
            _ => {
                base.insert(key.clone(), override_value.clone());
            }
        }
    }
}
