use crate::error::ConfigError;
use std::path::Path;

// Declare the modules that make up this crate.
pub mod error;
pub mod logging;
pub mod settings;

// Re-export the core types to provide a clean public API.
pub use logging::init_logging;
pub use settings::{
    Config, DataConfig, LoggingConfig, ReportConfig, StrategyOverrides, StrategyParams,
    DEFAULT_TRIM_OFFSET,
};

/// Prefix for environment overrides, e.g. `MOM_STRATEGY__LONG_THRESHOLD=0.7`.
pub const ENV_PREFIX: &str = "MOM";

/// Loads the application configuration from a TOML file.
///
/// Environment variables prefixed with `MOM_` are layered on top of the file,
/// with `__` separating nested keys. The result is validated before it is
/// returned.
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    let builder = config::Config::builder()
        .add_source(config::File::from(path))
        .add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    // Attempt to deserialize the entire configuration into our `Config` struct
    let config = builder.try_deserialize::<Config>()?;
    config.validate()?;
    Ok(config)
}
