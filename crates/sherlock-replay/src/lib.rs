//! Replays recorded Baker Street Dozen games from YAML scripts through the
//! deduction engine and renders the resulting table.

pub mod config;
pub mod logging;
pub mod render;
pub mod replay;
