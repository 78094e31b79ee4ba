use anyhow::Result;
use clap::Parser;
use illustrator_bridge::BridgeConfig;
use illustrator_mcp_agent::server::IllustratorAgent;
use illustrator_mcp_agent::utils::init_logging;
use rmcp::{transport::stdio, ServiceExt};
use tracing::info;

/// MCP server bridging tool calls into Adobe Illustrator.
#[derive(Parser)]
#[command(name = "illustrator-mcp-agent", version, about)]
struct Cli {
    /// Target application name as registered with the OS. Useful when a
    /// versioned install registers as e.g. "Adobe Illustrator 2024".
    #[arg(long, env = "ILLUSTRATOR_APP_NAME", default_value = "Adobe Illustrator")]
    application: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging()?;

    info!(application = %cli.application, "starting illustrator mcp agent");

    let agent = IllustratorAgent::new(BridgeConfig {
        application: cli.application,
    });

    let service = agent.serve(stdio()).await?;
    service.waiting().await?;

    Ok(())
}
