use anyhow::Result;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::env;
use tracing::Level;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct RunCodeArgs {
    #[schemars(
        description = "ExtendScript/JavaScript code to execute inside Illustrator. Use the provided log(message) function for output; do not call alert() or $.writeln()."
    )]
    pub code: String,
}

pub fn init_logging() -> Result<()> {
    let log_level = env::var("LOG_LEVEL")
        .map(|level| match level.to_lowercase().as_str() {
            "error" => Level::ERROR,
            "warn" => Level::WARN,
            "info" => Level::INFO,
            "debug" => Level::DEBUG,
            _ => Level::INFO,
        })
        .unwrap_or(Level::INFO);

    // stdout carries the MCP protocol; logs must go to stderr.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(log_level.into()))
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    Ok(())
}
