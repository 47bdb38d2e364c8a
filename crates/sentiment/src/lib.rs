//! Sentiment - FinBERT sentiment console
//!
//! Submits financial text to a sentiment classifier through a small proxy
//! service and keeps a persistent, append-only history of predictions that is
//! rendered as a table and as charts.

pub mod cli;
pub mod error;
pub mod history;
pub mod server;
