//! Utility command handlers
//!
//! Handles: ping, uptime, echo
//!
//! - **Version**: 2.0.0
//! - **Since**: 0.2.0
//!
//! ## Changelog
//! - 2.0.0: Descriptions come from docstrings
//! - 1.0.0: Initial utility commands

use anyhow::Result;
use async_trait::async_trait;
use log::info;
use serenity::model::application::command::CommandOptionType;
use serenity::model::application::interaction::application_command::ApplicationCommandInteraction;
use serenity::model::application::interaction::InteractionResponseType;
use serenity::model::id::ChannelId;
use serenity::prelude::Context;
use std::sync::Arc;

use crate::commands::context::CommandContext;
use crate::commands::handler::SlashCommandHandler;
use crate::commands::metadata::CallbackMetadata;
use crate::commands::slash::{get_channel_option, get_string_option};
use crate::core::truncate;
use crate::core::MESSAGE_LIMIT;
use crate::features::buttons::delete_row;

const PING_DOC: &str = "Check that the bot is responsive.";

const UPTIME_DOC: &str = "Show how long the bot has been running.";

const ECHO_DOC: &str = "Repeat a message back.

    The message is sent to the given channel, or as a reply when no channel
    is picked.

    :param content: The text to repeat.
    :param channel: Channel to send the text to.
    :type channel: TextChannel
    ";

/// Handler for utility commands: ping, uptime, echo
pub struct UtilityHandler;

#[async_trait]
impl SlashCommandHandler for UtilityHandler {
    fn metadata(&self) -> Vec<CallbackMetadata> {
        vec![
            CallbackMetadata::new("ping").doc(PING_DOC),
            CallbackMetadata::new("uptime").doc(UPTIME_DOC),
            CallbackMetadata::new("echo")
                .doc(ECHO_DOC)
                .param("content", CommandOptionType::String)
                .optional_param("channel", CommandOptionType::Channel),
        ]
    }

    fn category(&self) -> &'static str {
        "utility"
    }

    async fn handle(
        &self,
        ctx: Arc<CommandContext>,
        serenity_ctx: &Context,
        command: &ApplicationCommandInteraction,
    ) -> Result<()> {
        match command.data.name.as_str() {
            "ping" => self.reply(serenity_ctx, command, "Pong!").await,
            "uptime" => self.handle_uptime(&ctx, serenity_ctx, command).await,
            "echo" => self.handle_echo(serenity_ctx, command).await,
            _ => Ok(()),
        }
    }
}

/// `3725` seconds -> `1h 2m 5s`
fn format_uptime(total_seconds: u64) -> String {
    let days = total_seconds / 86_400;
    let hours = (total_seconds % 86_400) / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;

    if days > 0 {
        format!("{days}d {hours}h {minutes}m {seconds}s")
    } else if hours > 0 {
        format!("{hours}h {minutes}m {seconds}s")
    } else if minutes > 0 {
        format!("{minutes}m {seconds}s")
    } else {
        format!("{seconds}s")
    }
}

impl UtilityHandler {
    async fn reply(
        &self,
        serenity_ctx: &Context,
        command: &ApplicationCommandInteraction,
        content: &str,
    ) -> Result<()> {
        let author = command.user.id.0;
        command
            .create_interaction_response(&serenity_ctx.http, |response| {
                response
                    .kind(InteractionResponseType::ChannelMessageWithSource)
                    .interaction_response_data(|message| {
                        message.content(content).set_components(delete_row(author, &[]))
                    })
            })
            .await?;
        Ok(())
    }

    async fn handle_uptime(
        &self,
        ctx: &CommandContext,
        serenity_ctx: &Context,
        command: &ApplicationCommandInteraction,
    ) -> Result<()> {
        let uptime = format_uptime(ctx.uptime().as_secs());
        self.reply(serenity_ctx, command, &format!("Up for {uptime}")).await
    }

    async fn handle_echo(&self, serenity_ctx: &Context, command: &ApplicationCommandInteraction) -> Result<()> {
        let options = &command.data.options;
        let content = get_string_option(options, "content")
            .ok_or_else(|| anyhow::anyhow!("Missing required option 'content'"))?;
        let content = truncate(&content, MESSAGE_LIMIT);

        match get_channel_option(options, "channel") {
            Some(channel_id) => {
                ChannelId(channel_id).say(&serenity_ctx.http, &content).await?;
                info!("Echoed {} chars to channel {channel_id}", content.len());
                command
                    .create_interaction_response(&serenity_ctx.http, |response| {
                        response
                            .kind(InteractionResponseType::ChannelMessageWithSource)
                            .interaction_response_data(|message| {
                                message.content(format!("Sent to <#{channel_id}>")).ephemeral(true)
                            })
                    })
                    .await?;
                Ok(())
            }
            None => self.reply(serenity_ctx, command, &content).await,
        }
    }
}
