//! Slash command handler trait and infrastructure
//!
//! - **Version**: 2.0.0
//! - **Since**: 0.2.0
//!
//! ## Changelog
//! - 2.0.0: Handlers describe their callbacks through docstring metadata
//! - 1.0.0: Initial implementation for modular command handling

use anyhow::Result;
use async_trait::async_trait;
use serenity::model::application::interaction::application_command::ApplicationCommandInteraction;
use serenity::prelude::Context;
use std::sync::Arc;

use super::context::CommandContext;
use super::metadata::CallbackMetadata;

/// Trait for slash command handlers
///
/// A handler declares one [`CallbackMetadata`] per command it processes;
/// the registry builds the slash command definitions from their docstrings
/// and dispatches interactions by name.
///
/// # Example
///
/// ```ignore
/// pub struct PingHandler;
///
/// #[async_trait]
/// impl SlashCommandHandler for PingHandler {
///     fn metadata(&self) -> Vec<CallbackMetadata> {
///         vec![CallbackMetadata::new("ping").doc("Check the bot is alive.")]
///     }
///
///     async fn handle(
///         &self,
///         ctx: Arc<CommandContext>,
///         serenity_ctx: &Context,
///         command: &ApplicationCommandInteraction,
///     ) -> Result<()> {
///         Ok(())
///     }
/// }
/// ```
#[async_trait]
pub trait SlashCommandHandler: Send + Sync {
    /// Callback metadata, one entry per command
    fn metadata(&self) -> Vec<CallbackMetadata>;

    /// Help category for commands without their own
    fn category(&self) -> &'static str {
        "general"
    }

    /// Names this handler answers to
    fn command_names(&self) -> Vec<String> {
        self.metadata()
            .iter()
            .map(|meta| meta.command_name().to_string())
            .collect()
    }

    async fn handle(
        &self,
        ctx: Arc<CommandContext>,
        serenity_ctx: &Context,
        command: &ApplicationCommandInteraction,
    ) -> Result<()>;
}
