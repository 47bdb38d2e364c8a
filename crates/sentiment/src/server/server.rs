//! Proxy startup and configuration

use anyhow::Result;
use axum::serve;
use bentley::journal::Journal;
use reqwest::Client;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::server::routing::create_router;

/// Proxy configuration
#[derive(Debug, Clone)]
pub struct ProxyConfig {
  /// Base URL of the inference backend (e.g., "http://localhost:8000")
  pub backend_url: String,
  /// JSONL request journal location
  pub logs_path: PathBuf,
  /// Keep journal entries off the console
  pub silent: bool,
}

impl Default for ProxyConfig {
  fn default() -> Self {
    Self {
      backend_url: "http://localhost:8000".to_string(),
      logs_path: default_logs_path(),
      silent: false,
    }
  }
}

/// State shared by all handlers
#[derive(Clone)]
pub struct ProxyState {
  pub http: Client,
  pub backend_url: String,
  pub journal: Journal,
}

impl ProxyState {
  pub fn new(config: &ProxyConfig) -> Result<Self> {
    let journal = Journal::open_with_silent(&config.logs_path, config.silent)?;
    Ok(Self { http: Client::new(), backend_url: config.backend_url.clone(), journal })
  }
}

/// Start the proxy on `addr`
pub async fn start_server(addr: SocketAddr, config: ProxyConfig) -> Result<()> {
  let state = ProxyState::new(&config)?;
  state
    .journal
    .info(&format!("Starting prediction proxy on {addr}, backend {}", config.backend_url), "proxy")
    .await;

  let listener = TcpListener::bind(addr).await?;
  serve_on(listener, state).await
}

/// Serve the proxy on an already bound listener
pub async fn serve_on(listener: TcpListener, state: ProxyState) -> Result<()> {
  let journal = state.journal.clone();
  let app = create_router(state).layer(
    ServiceBuilder::new().layer(TraceLayer::new_for_http()).layer(CorsLayer::permissive()),
  );

  let addr = listener.local_addr()?;
  journal.info(&format!("Proxy listening on {addr}"), "proxy").await;

  match serve(listener, app).await {
    Ok(()) => {
      journal.info("Proxy shut down gracefully", "proxy").await;
      Ok(())
    }
    Err(e) => {
      journal.error(&format!("Proxy error: {e}"), "proxy").await;
      Err(anyhow::anyhow!("Proxy error: {}", e))
    }
  }
}

/// Location of the proxy journal
///
/// `SENTIMENT_PROXY_LOGS` overrides the default `~/.sentiment/proxy.logs.jsonl`.
pub fn default_logs_path() -> PathBuf {
  if let Ok(custom) = std::env::var("SENTIMENT_PROXY_LOGS") {
    return PathBuf::from(custom);
  }

  dirs::home_dir()
    .unwrap_or_else(|| Path::new("/tmp").to_path_buf())
    .join(".sentiment")
    .join("proxy.logs.jsonl")
}
