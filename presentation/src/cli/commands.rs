//! CLI command definitions

use clap::Parser;
use std::path::PathBuf;

/// CLI arguments for biznisweb-mcp
#[derive(Parser, Debug)]
#[command(name = "biznisweb-mcp")]
#[command(author, version, about = "MCP server exposing the BizniWeb GraphQL API as tools")]
#[command(long_about = r#"
biznisweb-mcp serves the BizniWeb e-shop GraphQL API as MCP tools over stdio.
An MCP client launches it and exchanges newline-delimited JSON-RPC on
stdin/stdout. Logs go to stderr.

Configuration is loaded from (lowest to highest priority):
1. Built-in defaults
2. ~/.config/biznisweb-mcp/config.toml   Global config
3. ./biznisweb.toml                      Project-level config
4. --config <path>                       Explicit config file
5. BIZNISWEB_* environment variables (a .env file is read first)

Environment:
  BIZNISWEB_API_TOKEN     API token (required to serve)
  BIZNISWEB_API_URL       GraphQL endpoint URL
  BIZNISWEB_API_LANG_CODE Default language for product tools

Example:
  biznisweb-mcp --list-tools
  BIZNISWEB_API_TOKEN=... biznisweb-mcp -vv
"#)]
pub struct Cli {
    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,

    /// Print the tool schemas as JSON and exit
    #[arg(long)]
    pub list_tools: bool,
}

impl Cli {
    /// Log filter directive for the verbosity level.
    pub fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["biznisweb-mcp"]).unwrap();
        assert_eq!(cli.verbose, 0);
        assert!(cli.config.is_none());
        assert!(!cli.list_tools);
        assert_eq!(cli.log_level(), "warn");
    }

    #[test]
    fn test_flags() {
        let cli = Cli::try_parse_from([
            "biznisweb-mcp",
            "-vv",
            "--config",
            "/etc/bw.toml",
            "--no-config",
            "--list-tools",
        ])
        .unwrap();
        assert_eq!(cli.log_level(), "debug");
        assert_eq!(cli.config, Some(PathBuf::from("/etc/bw.toml")));
        assert!(cli.no_config);
        assert!(cli.list_tools);
        assert!(!cli.show_config);
    }

    #[test]
    fn test_rejects_positional_arguments() {
        assert!(Cli::try_parse_from(["biznisweb-mcp", "what"]).is_err());
    }
}
