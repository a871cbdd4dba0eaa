//! # Command System
//!
//! Slash commands declared from handler docstrings.
//!
//! - **Version**: 3.0.0
//! - **Since**: 0.2.0
//! - **Toggleable**: false
//!
//! ## Changelog
//! - 3.0.0: Docstring command builder and callback metadata
//! - 2.1.0: Add modular handler infrastructure (handler trait, context, registry)
//! - 1.0.0: Initial reorganization with modular command structure

pub mod builder;
pub mod context;
pub mod handler;
pub mod handlers;
pub mod metadata;
pub mod registry;
pub mod slash;

pub use builder::{validate_name, DocumentedCommand, DocumentedOption, SlashCommandGroup};
pub use context::CommandContext;
pub use handler::SlashCommandHandler;
pub use metadata::{CallbackMetadata, HelpMeta, ParamSpec, SlashSettings};
pub use registry::CommandRegistry;

pub use slash::{
    get_bool_option, get_channel_option, get_string_option, global_commands, guild_only_commands,
    register_global_commands, register_guild_commands,
};
