//! Endpoint handlers

pub mod logs;
pub mod predict;
pub mod status;
