//! Sentiment prediction proxy
//!
//! Forwards `POST /api/predict` from the console to the inference backend.

use anyhow::Result;
use clap::Parser;
use std::net::SocketAddr;
use tracing_subscriber::{filter::EnvFilter, fmt, prelude::*};

use sentiment::server::{start_server, ProxyConfig};

#[derive(Parser)]
#[command(name = "sentiment_proxy")]
#[command(about = "Prediction proxy between the sentiment console and the inference backend")]
#[command(version)]
struct Args {
  /// Proxy bind address
  #[arg(long, default_value = "127.0.0.1:3000")]
  bind: SocketAddr,

  /// Base URL of the inference backend
  #[arg(long, env = "SENTIMENT_BACKEND_URL", default_value = "http://localhost:8000")]
  backend_url: String,

  /// Enable verbose logging
  #[arg(short, long)]
  verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
  let args = Args::parse();

  let filter = if args.verbose {
    EnvFilter::new("info,tower_http=debug")
  } else {
    EnvFilter::new("sentiment=info,warn")
  };
  tracing_subscriber::registry().with(fmt::layer()).with(filter).init();
  bentley::set_verbose(args.verbose);

  bentley::info!("Starting sentiment proxy v{}", env!("CARGO_PKG_VERSION"));
  bentley::info!("Binding to address: {}", args.bind);

  let config = ProxyConfig { backend_url: args.backend_url, ..ProxyConfig::default() };
  start_server(args.bind, config).await?;

  Ok(())
}
