//! Configuration file loader with multi-source merging

use super::file_config::FileConfig;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use std::path::PathBuf;

/// Prefix of configuration environment variables.
pub const ENV_PREFIX: &str = "BIZNISWEB_";

const PROJECT_CONFIG_FILE: &str = "biznisweb.toml";

/// Configuration loader that handles file discovery and merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from all sources with proper priority
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (`BIZNISWEB_API_TOKEN` → `api.token`)
    /// 2. Explicit config path (if provided)
    /// 3. Project root: `./biznisweb.toml`
    /// 4. XDG config: `$XDG_CONFIG_HOME/biznisweb-mcp/config.toml`
    /// 5. Default values
    pub fn load(config_path: Option<&PathBuf>) -> Result<FileConfig, Box<figment::Error>> {
        let mut figment = Self::defaults();

        if let Some(global_path) = Self::global_config_path()
            && global_path.exists()
        {
            figment = figment.merge(Toml::file(&global_path));
        }

        if let Some(project_path) = Self::project_config_path() {
            figment = figment.merge(Toml::file(project_path));
        }

        // Explicit config path (highest priority for files)
        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        Self::with_env(figment).extract().map_err(Box::new)
    }

    /// Load defaults plus environment only (for --no-config)
    pub fn load_defaults() -> Result<FileConfig, Box<figment::Error>> {
        Self::with_env(Self::defaults()).extract().map_err(Box::new)
    }

    fn defaults() -> Figment {
        Figment::new().merge(Serialized::defaults(FileConfig::default()))
    }

    /// `BIZNISWEB_API_URL` → `api.url`, `BIZNISWEB_LOGGING_INVOCATION_LOG` →
    /// `logging.invocation_log`: only the first underscore separates the
    /// section from the key.
    fn with_env(figment: Figment) -> Figment {
        figment.merge(Env::prefixed(ENV_PREFIX).map(|key| env_key(key.as_str()).into()))
    }

    /// Get the global config file path
    ///
    /// Returns XDG_CONFIG_HOME/biznisweb-mcp/config.toml if set,
    /// otherwise the platform config directory.
    pub fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("biznisweb-mcp").join("config.toml"))
    }

    /// Get the project-level config file path (if it exists)
    pub fn project_config_path() -> Option<PathBuf> {
        let path = PathBuf::from(PROJECT_CONFIG_FILE);
        path.exists().then_some(path)
    }

    /// Print the config file locations being used (for debugging)
    ///
    /// Goes to stderr: stdout belongs to the protocol.
    pub fn print_config_sources(config_path: Option<&PathBuf>) {
        eprintln!("Configuration sources (in priority order):");

        let env_keys: Vec<String> = std::env::vars()
            .map(|(key, _)| key)
            .filter(|key| key.starts_with(ENV_PREFIX))
            .collect();
        if env_keys.is_empty() {
            eprintln!("  [     ] Env:      {}*", ENV_PREFIX);
        } else {
            eprintln!("  [FOUND] Env:      {}", env_keys.join(", "));
        }

        if let Some(path) = config_path {
            let mark = if path.exists() { "FOUND" } else { "MISSING" };
            eprintln!("  [{:<5}] Explicit: {}", mark, path.display());
        }

        match Self::project_config_path() {
            Some(path) => eprintln!("  [FOUND] Project:  {}", path.display()),
            None => eprintln!("  [     ] Project:  ./{}", PROJECT_CONFIG_FILE),
        }

        if let Some(path) = Self::global_config_path() {
            if path.exists() {
                eprintln!("  [FOUND] Global:   {}", path.display());
            } else {
                eprintln!("  [     ] Global:   {}", path.display());
            }
        }

        eprintln!("  [     ] Default:  built-in defaults");
    }
}

/// Figment key path of a prefix-stripped, lowercased variable name.
fn env_key(name: &str) -> String {
    name.replacen('_', ".", 1)
}
