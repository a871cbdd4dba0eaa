//! # Core Module
//!
//! Configuration, error types and Discord response helpers.
//!
//! - **Version**: 1.2.0
//! - **Since**: 0.1.0
//! - **Toggleable**: false
//!
//! ## Changelog
//! - 1.2.0: Add typed docstring errors
//! - 1.1.0: Add response module with Discord message chunking utilities
//! - 1.0.0: Initial creation with config module

pub mod config;
pub mod embeds;
pub mod error;
pub mod response;

pub use config::{ComponentsConfig, Config, EvalConfig, HelpConfig};
pub use error::{DocError, InteractionError};
pub use response::{
    chunk_text, truncate, truncate_for_embed, COMMAND_DESCRIPTION_LIMIT,
    EMBED_LIMIT, MESSAGE_LIMIT,
};
