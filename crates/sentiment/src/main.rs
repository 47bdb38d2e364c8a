use anyhow::Result;
use clap::Parser;
use std::io::Write;
use std::path::PathBuf;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::{filter::EnvFilter, fmt, prelude::*};

use sentiment::cli::client::{ClientConfig, InferenceClient};
use sentiment::cli::coordinator::{Outcome, Rejection, ViewCoordinator};
use sentiment::cli::display::{self, render_view};
use sentiment::history::store::{default_history_path, HistoryStore};

const QUIT: &str = ":quit";

#[derive(Parser)]
#[command(name = "sentiment")]
#[command(
  about = "FinBERT Sentiment Analysis\nClassify financial text and keep a running history of predictions"
)]
#[command(version)]
struct Cli {
  /// Base URL of the prediction proxy
  #[arg(long, env = "SENTIMENT_PROXY_URL", default_value = "http://localhost:3000")]
  proxy_url: String,

  /// History file (defaults to ~/.sentiment/sentiment_history.json)
  #[arg(long, env = "SENTIMENT_HISTORY_PATH")]
  history: Option<PathBuf>,

  /// Keep history in memory for this session only
  #[arg(long, conflicts_with = "history")]
  ephemeral: bool,

  /// Reject predictions whose label disagrees with the class scores
  #[arg(long)]
  strict: bool,

  /// Enable verbose logging
  #[arg(short, long)]
  verbose: bool,
}

fn prompt() -> Result<()> {
  print!("{} ", display::PROMPT);
  std::io::stdout().flush()?;
  Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
  let cli = Cli::parse();

  let filter =
    if cli.verbose { EnvFilter::new("sentiment=debug,warn") } else { EnvFilter::new("warn") };
  tracing_subscriber::registry()
    .with(fmt::layer().with_writer(std::io::stderr))
    .with(filter)
    .init();
  bentley::set_verbose(cli.verbose);

  let store = if cli.ephemeral {
    HistoryStore::in_memory()
  } else {
    HistoryStore::file(cli.history.clone().unwrap_or_else(default_history_path))
  };
  bentley::debug!("History slot: {}", store.slot());

  let client =
    InferenceClient::with_config(ClientConfig { base_url: cli.proxy_url, strict: cli.strict });
  bentley::debug!("Prediction endpoint: {}", client.endpoint());
  let mut coordinator = ViewCoordinator::new(store);

  bentley::announce!("{}", display::HEADING);
  if !coordinator.history().is_empty() {
    println!("{}", render_view(&coordinator.snapshot()));
  }
  println!("Type {QUIT} or press Ctrl-D to exit.\n");

  let mut lines = BufReader::new(tokio::io::stdin()).lines();
  prompt()?;

  while let Some(line) = lines.next_line().await? {
    // Trimmed for the checks only; the text is submitted as typed
    if line.trim() == QUIT {
      break;
    }

    if line.trim().is_empty() {
      println!("{}", display::REQUIRED_FIELD);
      prompt()?;
      continue;
    }

    println!("{}", display::BUSY);
    match coordinator.submit(&client, &line).await {
      Outcome::Succeeded => {
        bentley::debug!("History now holds {} predictions", coordinator.history().len())
      }
      Outcome::Failed(e) => bentley::debug!("Submission failed: {e}"),
      Outcome::Ignored(Rejection::EmptyText) => println!("{}", display::REQUIRED_FIELD),
      Outcome::Ignored(Rejection::Busy) => {}
    }

    println!("{}", render_view(&coordinator.snapshot()));
    prompt()?;
  }

  Ok(())
}
