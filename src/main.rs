use clap::Parser;
use rmcp::ServiceExt;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use coupon_feed_mcp::{CouponFeedServer, FeedConfig};

#[derive(Debug, Parser)]
#[command(name = "coupon-feed-mcp", version, about = "Coupon feed MCP server (stdio)")]
struct Cli {
    /// Port number. Accepted for compatibility; the server only speaks stdio.
    #[arg(default_value_t = 9998)]
    port: u16,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = FeedConfig::from_env()?;

    // stdout carries the MCP protocol, so logs go to stderr.
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    if config.api_key().is_none() {
        warn!("COUPON_API_KEY is not set; feed tools will fail until it is configured");
    }

    let server = CouponFeedServer::from_config(config)?;
    info!(port = cli.port, "Starting coupon feed MCP server on stdio");

    let service = server.serve(rmcp::transport::stdio()).await?;
    service.waiting().await?;
    Ok(())
}
