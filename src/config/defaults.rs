//! Default configuration values

/// Config file names searched for, in order, in each directory
pub const CONFIG_FILE_NAMES: &[&str] = &["apprig.toml", ".apprig.toml"];

/// Environment variable selecting the configuration when `--configuration` is absent
pub const CONFIGURATION_ENV: &str = "APPRIG_CONFIGURATION";

/// Default log level when neither `RUST_LOG` nor `-v`/`-q` is given
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Minimum proptest iterations
pub const MIN_PROPTEST_ITERATIONS: u32 = 100;
