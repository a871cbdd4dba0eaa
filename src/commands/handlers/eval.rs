//! /eval command handler (bot owners only)
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.4.0

use anyhow::Result;
use async_trait::async_trait;
use log::{info, warn};
use serenity::model::application::command::CommandOptionType;
use serenity::model::application::component::ButtonStyle;
use serenity::model::application::interaction::application_command::ApplicationCommandInteraction;
use serenity::model::application::interaction::InteractionResponseType;
use serenity::model::channel::{AttachmentType, ReactionType};
use serenity::prelude::Context;
use std::borrow::Cow;
use std::sync::Arc;

use crate::commands::context::CommandContext;
use crate::commands::handler::SlashCommandHandler;
use crate::commands::metadata::CallbackMetadata;
use crate::commands::slash::{get_bool_option, get_string_option};
use crate::features::buttons::{add_delete_button, delete_row};
use crate::features::eval::{extract_code, file_button_id, EvalFile, FILE_EMOJI};

/// Extra result pages sent as followups; the rest is reachable through the file button
const MAX_FOLLOWUP_PAGES: usize = 3;

const EVAL_DOC: &str = "Owner only command used to dynamically evaluate a script.

    This can only be used by the bot's owner.

    Parameters
    ----------
    content : str
        Code to run, optionally inside a code block.
    file_output : bool
        Whether this should send the output as txt files.

        Defaults to False.
    private : bool
        Whether the output should only be visible to you.
        Defaults to False.
    ";

pub struct EvalHandler;

pub(crate) fn attachments(files: Vec<EvalFile>) -> Vec<AttachmentType<'static>> {
    files
        .into_iter()
        .map(|file| AttachmentType::Bytes {
            data: Cow::Owned(file.data),
            filename: file.name,
        })
        .collect()
}

#[async_trait]
impl SlashCommandHandler for EvalHandler {
    fn metadata(&self) -> Vec<CallbackMetadata> {
        vec![CallbackMetadata::new("eval")
            .doc(EVAL_DOC)
            .param("content", CommandOptionType::String)
            .optional_param("file_output", CommandOptionType::Boolean)
            .optional_param("private", CommandOptionType::Boolean)
            .category("owner")
            .hide_from_help()]
    }

    fn category(&self) -> &'static str {
        "owner"
    }

    async fn handle(
        &self,
        ctx: Arc<CommandContext>,
        serenity_ctx: &Context,
        command: &ApplicationCommandInteraction,
    ) -> Result<()> {
        let author = command.user.id.0;
        if !ctx.is_owner(author) {
            warn!("Rejected /eval from non-owner {}", command.user.id);
            command
                .create_interaction_response(&serenity_ctx.http, |response| {
                    response
                        .kind(InteractionResponseType::ChannelMessageWithSource)
                        .interaction_response_data(|message| {
                            message
                                .content("This command can only be used by the bot's owner")
                                .ephemeral(true)
                        })
                })
                .await?;
            return Ok(());
        }

        let options = &command.data.options;
        let content = get_string_option(options, "content")
            .ok_or_else(|| anyhow::anyhow!("Missing required option 'content'"))?;
        let file_output = get_bool_option(options, "file_output").unwrap_or(false);
        let private = get_bool_option(options, "private").unwrap_or(false);

        command
            .create_interaction_response(&serenity_ctx.http, |response| {
                response
                    .kind(InteractionResponseType::DeferredChannelMessageWithSource)
                    .interaction_response_data(|message| message.ephemeral(private))
            })
            .await?;

        let code = extract_code(&content);
        let output = ctx.eval_executor.run(&code).await;
        info!(
            "Eval by {} finished in {} ms (failed: {})",
            command.user.id, output.exec_time_ms, output.failed
        );

        if file_output {
            command
                .edit_original_interaction_response(&serenity_ctx.http, |response| {
                    response.content(output.footer())
                })
                .await?;
            command
                .create_followup_message(&serenity_ctx.http, |followup| {
                    followup
                        .add_files(attachments(output.files()))
                        .ephemeral(private)
                        .set_components(delete_row(author, &[]))
                })
                .await?;
            return Ok(());
        }

        let pages = output.render_pages();
        let file_id = ctx.file_store.insert(output.files());
        let first = output.page_embed(0, pages.first().map(String::as_str).unwrap_or_default());

        command
            .edit_original_interaction_response(&serenity_ctx.http, |response| {
                response.set_embed(first).components(|c| {
                    c.create_action_row(|row| {
                        add_delete_button(row, author, &[]);
                        row.create_button(|button| {
                            button
                                .custom_id(file_button_id(&file_id))
                                .style(ButtonStyle::Secondary)
                                .emoji(ReactionType::Unicode(FILE_EMOJI.to_string()))
                        })
                    })
                })
            })
            .await?;

        for (index, page) in pages.iter().enumerate().skip(1).take(MAX_FOLLOWUP_PAGES) {
            let embed = output.page_embed(index, page);
            command
                .create_followup_message(&serenity_ctx.http, |followup| {
                    followup.add_embed(embed).ephemeral(private)
                })
                .await?;
        }
        if pages.len() > MAX_FOLLOWUP_PAGES + 1 {
            info!(
                "Eval output has {} pages, {} shown",
                pages.len(),
                MAX_FOLLOWUP_PAGES + 1
            );
        }

        Ok(())
    }
}
