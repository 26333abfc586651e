//! CLI command implementations
//!
//! Each command is implemented in its own submodule.

pub mod build;

use anyhow::Result;
use clap::Subcommand;
use std::path::PathBuf;

use crate::config::defaults::CONFIGURATION_ENV;

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the build command of every app in the selected configuration
    Build {
        /// Config file path. If not supplied, apprig.toml or .apprig.toml is
        /// searched for in the current directory and its parents
        #[arg(short = 'C', long, value_name = "PATH")]
        config_path: Option<PathBuf>,

        /// Configuration to build. Defaults to the only configuration when
        /// the config file defines exactly one
        #[arg(short, long, value_name = "NAME", env = CONFIGURATION_ENV)]
        configuration: Option<String>,

        /// Do not fail if an app has no build command
        #[arg(short, long)]
        silent: bool,
    },
}

impl Commands {
    /// Execute the command
    pub fn run(self, quiet: bool) -> Result<()> {
        match self {
            Self::Build {
                config_path,
                configuration,
                silent,
            } => {
                let current_dir = std::env::current_dir()?;
                let options = build::BuildOptions {
                    config_path,
                    configuration,
                    silent,
                };
                build::execute(&current_dir, options, quiet)
            }
        }
    }
}
