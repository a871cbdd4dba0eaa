//! Command handler registry
//!
//! - **Version**: 2.0.0
//! - **Since**: 0.2.0
//!
//! ## Changelog
//! - 2.0.0: Build slash commands and help sources from handler metadata
//! - 1.0.0: Initial implementation for handler dispatch

use anyhow::Result;
use log::{debug, info};
use serenity::model::application::interaction::application_command::ApplicationCommandInteraction;
use serenity::prelude::Context;
use std::collections::HashMap;
use std::sync::Arc;
use uuid::Uuid;

use super::builder::DocumentedCommand;
use super::context::CommandContext;
use super::handler::SlashCommandHandler;
use super::metadata::CallbackMetadata;
use crate::core::error::DocError;
use crate::docparse::DocStyle;
use crate::features::help::HelpSource;

/// Registry mapping command names to handlers
///
/// Besides dispatch it keeps every registered callback's metadata in
/// registration order, which is what slash command definitions and the
/// help index are built from.
///
/// # Example
///
/// ```ignore
/// let mut registry = CommandRegistry::new();
/// registry.register(Arc::new(UtilityHandler));
/// let commands = registry.build_commands(None)?;
/// ```
#[derive(Clone)]
pub struct CommandRegistry {
    handlers: HashMap<String, Arc<dyn SlashCommandHandler>>,
    entries: Vec<(CallbackMetadata, &'static str)>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self {
            handlers: HashMap::new(),
            entries: Vec::new(),
        }
    }

    /// Register a handler for every callback it declares
    ///
    /// A later handler declaring the same name replaces the earlier one.
    pub fn register(&mut self, handler: Arc<dyn SlashCommandHandler>) {
        let category = handler.category();
        for meta in handler.metadata() {
            let name = meta.command_name().to_string();
            if self.handlers.insert(name.clone(), Arc::clone(&handler)).is_some() {
                debug!("Replacing handler for /{name}");
                self.entries.retain(|(existing, _)| existing.command_name() != name);
            }
            self.entries.push((meta, category));
        }
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn SlashCommandHandler>> {
        self.handlers.get(name).cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.handlers.contains_key(name)
    }

    /// Number of registered command names
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Command names in registration order
    pub fn command_names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(meta, _)| meta.command_name())
    }

    pub fn metadata(&self) -> impl Iterator<Item = &CallbackMetadata> {
        self.entries.iter().map(|(meta, _)| meta)
    }

    /// Build every slash command from its docstring.
    ///
    /// `style` forces a docstring style; `None` auto-detects per command.
    pub fn build_commands(&self, style: Option<DocStyle>) -> Result<Vec<DocumentedCommand>, DocError> {
        self.entries
            .iter()
            .map(|(meta, _)| DocumentedCommand::from_callback(meta)?.with_annotated_args(style))
            .collect()
    }

    pub fn help_sources(&self) -> Vec<HelpSource> {
        self.entries
            .iter()
            .map(|(meta, category)| HelpSource::from_metadata(meta, category))
            .collect()
    }

    /// Route a slash command interaction to its handler
    pub async fn dispatch(
        &self,
        ctx: Arc<CommandContext>,
        serenity_ctx: &Context,
        command: &ApplicationCommandInteraction,
    ) -> Result<()> {
        let request_id = Uuid::new_v4();
        let name = command.data.name.as_str();

        let handler = self
            .get(name)
            .ok_or_else(|| anyhow::anyhow!("No handler registered for /{name}"))?;

        info!(
            "[{request_id}] /{name} from {} ({}) in {:?}",
            command.user.name, command.user.id, command.guild_id
        );
        let start = std::time::Instant::now();
        let result = handler.handle(ctx, serenity_ctx, command).await;
        debug!("[{request_id}] /{name} finished in {:?}", start.elapsed());
        result
    }
}

impl Default for CommandRegistry {
    fn default() -> Self {
        Self::new()
    }
}
