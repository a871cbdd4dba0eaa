use anyhow::Result;
use log::{info, warn};
use serenity::model::application::interaction::message_component::MessageComponentInteraction;
use serenity::model::application::interaction::modal::ModalSubmitInteraction;
use serenity::model::application::interaction::InteractionResponseType;
use serenity::prelude::Context;
use std::sync::Arc;

use crate::commands::handlers::eval::attachments;
use crate::commands::CommandContext;
use crate::features::buttons::{self, delete_row, DELETE_CUSTOM_ID};
use crate::features::eval::FILE_BUTTON_PREFIX;
use crate::features::help::{self, HELP_BUTTON_PREFIX, PAGE_MODAL_PREFIX};

/// Where a component custom id is routed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ComponentRoute {
    Delete,
    Help,
    File,
    Unknown,
}

fn route(custom_id: &str) -> ComponentRoute {
    let prefix = custom_id.split(':').next().unwrap_or_default();
    match prefix {
        DELETE_CUSTOM_ID => ComponentRoute::Delete,
        HELP_BUTTON_PREFIX => ComponentRoute::Help,
        FILE_BUTTON_PREFIX => ComponentRoute::File,
        _ => ComponentRoute::Unknown,
    }
}

/// Handler for all message component interactions
pub struct MessageComponentHandler {
    ctx: Arc<CommandContext>,
}

impl MessageComponentHandler {
    pub fn new(ctx: Arc<CommandContext>) -> Self {
        Self { ctx }
    }

    /// Handle all types of component interactions
    pub async fn handle_component_interaction(&self, ctx: &Context, interaction: &MessageComponentInteraction) -> Result<()> {
        let custom_id = &interaction.data.custom_id;
        info!("Processing component interaction: {custom_id} from user: {}", interaction.user.id);

        match route(custom_id) {
            ComponentRoute::Delete => buttons::handle_delete_button(ctx, interaction).await?,
            ComponentRoute::Help => help::handle_help_button(ctx, interaction, &self.ctx.help_index).await?,
            ComponentRoute::File => self.handle_file_button(ctx, interaction).await?,
            ComponentRoute::Unknown => {
                warn!("Unknown component interaction: {custom_id}");
                interaction
                    .create_interaction_response(&ctx.http, |response| {
                        response
                            .kind(InteractionResponseType::ChannelMessageWithSource)
                            .interaction_response_data(|message| {
                                message.content("Unknown component interaction.").ephemeral(true)
                            })
                    })
                    .await?;
            }
        }

        Ok(())
    }

    /// Handle modal submit interactions
    pub async fn handle_modal_submit(&self, ctx: &Context, interaction: &ModalSubmitInteraction) -> Result<()> {
        let custom_id = &interaction.data.custom_id;
        info!("Processing modal submit: {custom_id} from user: {}", interaction.user.id);

        if custom_id.split(':').next() == Some(PAGE_MODAL_PREFIX) {
            return help::handle_page_modal(ctx, interaction, &self.ctx.help_index).await;
        }

        warn!("Unknown modal submission: {custom_id}");
        interaction
            .create_interaction_response(&ctx.http, |response| {
                response
                    .kind(InteractionResponseType::ChannelMessageWithSource)
                    .interaction_response_data(|message| {
                        message.content("Unknown modal submission.").ephemeral(true)
                    })
            })
            .await?;
        Ok(())
    }

    /// Send the stored eval output as files
    async fn handle_file_button(&self, ctx: &Context, interaction: &MessageComponentInteraction) -> Result<()> {
        let user = interaction.user.id.0;
        let file_id = interaction
            .data
            .custom_id
            .strip_prefix(FILE_BUTTON_PREFIX)
            .map(|rest| rest.trim_start_matches(':'))
            .unwrap_or_default();

        let files = if self.ctx.is_owner(user) {
            self.ctx.file_store.take(file_id)
        } else {
            None
        };

        match files {
            Some(files) => {
                interaction
                    .create_interaction_response(&ctx.http, |response| {
                        response
                            .kind(InteractionResponseType::ChannelMessageWithSource)
                            .interaction_response_data(|message| {
                                message
                                    .add_files(attachments(files))
                                    .set_components(delete_row(user, &[]))
                            })
                    })
                    .await?;
            }
            None => {
                interaction
                    .create_interaction_response(&ctx.http, |response| {
                        response
                            .kind(InteractionResponseType::ChannelMessageWithSource)
                            .interaction_response_data(|message| {
                                message
                                    .content("These files are no longer available")
                                    .ephemeral(true)
                            })
                    })
                    .await?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_by_prefix() {
        assert_eq!(route("TC_DEL:a=1"), ComponentRoute::Delete);
        assert_eq!(route("TC_DEL"), ComponentRoute::Delete);
        assert_eq!(route("tc_help:next:h=x&p=0&a=1"), ComponentRoute::Help);
        assert_eq!(route("tc_file:abc"), ComponentRoute::File);
        assert_eq!(route("tc_help_page:h=x&p=0&a=1"), ComponentRoute::Unknown);
        assert_eq!(route("persona_chef"), ComponentRoute::Unknown);
    }
}
