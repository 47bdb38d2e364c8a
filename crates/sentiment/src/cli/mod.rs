//! Interactive console: proxy client, view coordinator and terminal rendering

pub mod client;
pub mod coordinator;
pub mod display;
