// src/lib.rs
//! Leaderboard bot: receives proposed edits to markdown leaderboards, renders
//! the patched tables, and files them as an issue on the leaderboard repository.

pub mod batch;
pub mod cli;
pub mod config;
pub mod error;
pub mod github;
pub mod json_text;
pub mod patcher;
pub mod server;
pub mod service;

pub use error::{BotError, BotResult};
