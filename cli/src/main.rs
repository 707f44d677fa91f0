//! CLI entrypoint for biznisweb-mcp
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, anyhow};
use biznisweb_application::{AdapterConfig, InvokeToolUseCase, ToolSchemaPort};
use biznisweb_infrastructure::{
    ConfigLoader, FileConfig, HttpGraphQlGateway, JsonSchemaToolConverter, JsonlInvocationLogger,
    SystemClock, biznisweb_tool_spec,
};
use biznisweb_presentation::{Cli, McpServer};
use clap::Parser;
use std::sync::Arc;
use tokio::io::BufReader;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

const INSTRUCTIONS: &str = "Read-only access to a BizniWeb e-shop: orders, products, \
warehouse items, invoices, companies and reference lists. Dates are YYYY-MM-DD.";

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    // stdout carries the protocol; logs go to stderr
    let filter = if cli.verbose == 0 {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cli.log_level()))
    } else {
        EnvFilter::new(cli.log_level())
    };
    let (writer, _guard) = tracing_appender::non_blocking(std::io::stderr());
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(false)
        .with_writer(writer)
        .init();

    if cli.show_config {
        ConfigLoader::print_config_sources(cli.config.as_ref());
        return Ok(());
    }

    let file_config = load_config(&cli)?;

    if cli.list_tools {
        let spec = biznisweb_tool_spec(&file_config.api.lang_code);
        let tools = JsonSchemaToolConverter.all_tools_schema(&spec);
        println!("{}", serde_json::to_string_pretty(&tools)?);
        return Ok(());
    }

    let config = file_config
        .to_app_config()
        .context("Invalid configuration")?;

    info!(url = %config.api_url, "Starting biznisweb-mcp");

    // === Dependency Injection ===
    let spec = Arc::new(biznisweb_tool_spec(&config.lang_code));
    let gateway = Arc::new(HttpGraphQlGateway::new(
        config.api_url.clone(),
        config.api_token.clone(),
        config.timeout,
    )?);
    let adapter_config =
        AdapterConfig::default().with_status_exclusion(config.status_exclusion.clone());

    let mut use_case = InvokeToolUseCase::new(spec, gateway, Arc::new(SystemClock), adapter_config);
    if let Some(path) = &config.invocation_log {
        match JsonlInvocationLogger::new(path) {
            Some(logger) => use_case = use_case.with_invocation_logger(Arc::new(logger)),
            None => warn!(path = %path.display(), "Invocation log disabled"),
        }
    }

    let server = McpServer::new(Arc::new(use_case), Arc::new(JsonSchemaToolConverter))
        .with_instructions(INSTRUCTIONS);

    server
        .run(BufReader::new(tokio::io::stdin()), tokio::io::stdout())
        .await?;

    Ok(())
}

fn load_config(cli: &Cli) -> Result<FileConfig> {
    let loaded = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref())
    };
    loaded.map_err(|e| anyhow!("Failed to load configuration: {}", e))
}
