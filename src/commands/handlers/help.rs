//! /help command handler
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.3.0

use anyhow::Result;
use async_trait::async_trait;
use serenity::builder::{CreateComponents, CreateEmbed};
use serenity::model::application::command::CommandOptionType;
use serenity::model::application::interaction::application_command::ApplicationCommandInteraction;
use serenity::model::application::interaction::InteractionResponseType;
use serenity::prelude::Context;
use std::sync::Arc;

use crate::commands::context::CommandContext;
use crate::commands::handler::SlashCommandHandler;
use crate::commands::metadata::CallbackMetadata;
use crate::commands::slash::get_string_option;
use crate::core::embeds::{coloured_embed, PASS_COLOUR};
use crate::features::buttons::delete_row;
use crate::features::help::{navigation_rows, HelpIndex, HelpState, HELP_EMBED_TITLE};

const HELP_DOC: &str = "Get information about the bot's commands.

    Args:
        command: Name of a command to get the full description for.
    ";

pub struct HelpHandler;

#[async_trait]
impl SlashCommandHandler for HelpHandler {
    fn metadata(&self) -> Vec<CallbackMetadata> {
        vec![CallbackMetadata::new("help")
            .doc(HELP_DOC)
            .optional_param("command", CommandOptionType::String)]
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
        let author = command.user.id.0;
        let requested = get_string_option(&command.data.options, "command");
        let (embed, components) = help_response(&ctx.help_index, requested.as_deref(), author);

        let ephemeral = embed.is_none();
        command
            .create_interaction_response(&serenity_ctx.http, |response| {
                response
                    .kind(InteractionResponseType::ChannelMessageWithSource)
                    .interaction_response_data(|message| {
                        match embed {
                            Some(embed) => message.set_embed(embed),
                            None => message.content("Couldn't find command"),
                        };
                        message.ephemeral(ephemeral).set_components(components)
                    })
            })
            .await?;
        Ok(())
    }
}

/// Embed and rows for `/help [command]`; `None` when nothing matches.
fn help_response(
    index: &HelpIndex,
    requested: Option<&str>,
    author: u64,
) -> (Option<CreateEmbed>, CreateComponents) {
    match requested {
        Some(name) => {
            let embed = index
                .find_command(name)
                .map(|description| coloured_embed(HELP_EMBED_TITLE, description, PASS_COLOUR, None));
            (embed, delete_row(author, &[]))
        }
        None => {
            let state = HelpState {
                hash: index.hash().to_string(),
                page: 0,
                author,
            };
            match index.page_embed(0) {
                Some(embed) => (Some(embed), navigation_rows(&state)),
                None => (None, delete_row(author, &[])),
            }
        }
    }
}
