//! Configuration file loading for biznisweb-mcp
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. Environment: `BIZNISWEB_API_URL`, `BIZNISWEB_API_TOKEN`, ...
//! 2. `--config <path>` specified file
//! 3. Project root: `./biznisweb.toml`
//! 4. XDG config: `$XDG_CONFIG_HOME/biznisweb-mcp/config.toml`
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{
    AppConfig, ConfigValidationError, DEFAULT_API_URL, DEFAULT_LANG_CODE, DEFAULT_TIMEOUT_SECONDS,
    FileApiConfig, FileConfig, FileLoggingConfig, FileStatisticsConfig,
};
pub use loader::ConfigLoader;
