//! # Help Feature
//!
//! Paginated listing of registered commands built from their docstrings,
//! with navigation buttons and a page selection modal.
//!
//! - **Version**: 1.1.0
//! - **Since**: 0.3.0
//! - **Toggleable**: true
//!
//! ## Changelog
//! - 1.1.0: Page selection modal
//! - 1.0.0: Initial paginated index

pub mod index;
pub mod navigation;

pub use index::{HelpIndex, HelpPage, HelpSource, HELP_EMBED_TITLE};
pub use navigation::{
    navigate, navigation_rows, parse_button_id, parse_modal_id, select_page, HelpAction,
    HelpState, Navigation, HELP_BUTTON_PREFIX, PAGE_INPUT_ID, PAGE_MODAL_PREFIX,
};

use anyhow::Result;
use log::debug;
use serenity::model::application::component::{ActionRowComponent, InputTextStyle};
use serenity::model::application::interaction::message_component::MessageComponentInteraction;
use serenity::model::application::interaction::modal::ModalSubmitInteraction;
use serenity::model::application::interaction::InteractionResponseType;
use serenity::prelude::Context;

use crate::core::error::InteractionError;
use crate::features::buttons::delete_row;

async fn reply_component_error(
    ctx: &Context,
    interaction: &MessageComponentInteraction,
    error: InteractionError,
) -> Result<()> {
    let user = interaction.user.id.0;
    interaction
        .create_interaction_response(&ctx.http, |response| {
            response
                .kind(InteractionResponseType::ChannelMessageWithSource)
                .interaction_response_data(|message| {
                    message
                        .content(error.to_string())
                        .ephemeral(true)
                        .set_components(delete_row(user, &[]))
                })
        })
        .await?;
    Ok(())
}

async fn reply_modal_error(
    ctx: &Context,
    interaction: &ModalSubmitInteraction,
    error: InteractionError,
) -> Result<()> {
    let user = interaction.user.id.0;
    interaction
        .create_interaction_response(&ctx.http, |response| {
            response
                .kind(InteractionResponseType::ChannelMessageWithSource)
                .interaction_response_data(|message| {
                    message
                        .content(error.to_string())
                        .ephemeral(true)
                        .set_components(delete_row(user, &[]))
                })
        })
        .await?;
    Ok(())
}

/// Handle a press of one of the help navigation buttons.
pub async fn handle_help_button(
    ctx: &Context,
    interaction: &MessageComponentInteraction,
    index: &HelpIndex,
) -> Result<()> {
    let Some((action, state)) = parse_button_id(&interaction.data.custom_id) else {
        return Err(anyhow::anyhow!(
            "Malformed help button id: {}",
            interaction.data.custom_id
        ));
    };
    let user = interaction.user.id.0;

    let navigation = match navigate(action, &state, user, index.hash(), index.page_count()) {
        Ok(navigation) => navigation,
        Err(e) => return reply_component_error(ctx, interaction, e).await,
    };
    debug!("Help navigation {:?} -> {:?} for {}", action, navigation, user);

    match navigation {
        Navigation::Show(page) => {
            let Some(embed) = index.page_embed(page) else {
                return reply_component_error(ctx, interaction, InteractionError::PageNotFound).await;
            };
            let rows = navigation_rows(&HelpState { page, ..state });
            interaction
                .create_interaction_response(&ctx.http, |response| {
                    response
                        .kind(InteractionResponseType::UpdateMessage)
                        .interaction_response_data(|message| message.set_embed(embed).set_components(rows))
                })
                .await?;
        }
        Navigation::Noop => {
            interaction
                .create_interaction_response(&ctx.http, |response| {
                    response.kind(InteractionResponseType::DeferredUpdateMessage)
                })
                .await?;
        }
        Navigation::OpenModal => {
            let modal_id = state.modal_id();
            interaction
                .create_interaction_response(&ctx.http, |response| {
                    response
                        .kind(InteractionResponseType::Modal)
                        .interaction_response_data(|modal| {
                            modal.custom_id(modal_id).title("Select page").components(|c| {
                                c.create_action_row(|row| {
                                    row.create_input_text(|input| {
                                        input
                                            .custom_id(PAGE_INPUT_ID)
                                            .label("Page number")
                                            .style(InputTextStyle::Short)
                                            .required(true)
                                            .min_length(1)
                                            .max_length(6)
                                    })
                                })
                            })
                        })
                })
                .await?;
        }
    }

    Ok(())
}

/// Handle the page number modal opened by the select button.
pub async fn handle_page_modal(
    ctx: &Context,
    interaction: &ModalSubmitInteraction,
    index: &HelpIndex,
) -> Result<()> {
    let Some(state) = parse_modal_id(&interaction.data.custom_id) else {
        return Err(anyhow::anyhow!(
            "Malformed help modal id: {}",
            interaction.data.custom_id
        ));
    };
    let user = interaction.user.id.0;

    if let Err(e) = state.verify(user, index.hash()) {
        return reply_modal_error(ctx, interaction, e).await;
    }

    let input = interaction
        .data
        .components
        .iter()
        .flat_map(|row| row.components.iter())
        .find_map(|component| match component {
            ActionRowComponent::InputText(input) if input.custom_id == PAGE_INPUT_ID => {
                Some(input.value.clone())
            }
            _ => None,
        })
        .unwrap_or_default();

    let page = match select_page(&input, index.page_count()) {
        Ok(page) => page,
        Err(e) => return reply_modal_error(ctx, interaction, e).await,
    };
    let Some(embed) = index.page_embed(page) else {
        return reply_modal_error(ctx, interaction, InteractionError::PageNotFound).await;
    };
    let rows = navigation_rows(&HelpState { page, ..state });

    interaction
        .create_interaction_response(&ctx.http, |response| {
            response
                .kind(InteractionResponseType::UpdateMessage)
                .interaction_response_data(|message| message.set_embed(embed).set_components(rows))
        })
        .await?;

    Ok(())
}
