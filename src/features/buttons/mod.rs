//! # Delete Button Feature
//!
//! A danger button that lets the listed authors (or members holding a
//! listed role) delete a bot response. The allowed ids travel in the
//! button's custom id, so no state is kept.
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.3.0
//! - **Toggleable**: true

use anyhow::Result;
use log::{debug, info};
use serenity::builder::{CreateActionRow, CreateComponents};
use serenity::model::application::component::ButtonStyle;
use serenity::model::application::interaction::message_component::MessageComponentInteraction;
use serenity::model::application::interaction::InteractionResponseType;
use serenity::model::channel::ReactionType;
use serenity::prelude::Context;
use std::collections::HashSet;

/// Custom id prefix of delete buttons
pub const DELETE_CUSTOM_ID: &str = "TC_DEL";
/// Query key holding the allowed ids
pub const OWNER_QS_KEY: &str = "a";
pub const DELETE_EMOJI: &str = "✖️";

/// Build the custom id for a delete button usable by `author` and `others`.
pub fn make_delete_id(author: u64, others: &[u64]) -> String {
    let ids: Vec<String> = std::iter::once(author)
        .chain(others.iter().copied())
        .map(|id| id.to_string())
        .collect();
    format!("{DELETE_CUSTOM_ID}:{OWNER_QS_KEY}={}", ids.join(","))
}

/// Append a delete button to an existing action row.
pub fn add_delete_button<'a>(row: &'a mut CreateActionRow, author: u64, others: &[u64]) -> &'a mut CreateActionRow {
    let custom_id = make_delete_id(author, others);
    row.create_button(|button| {
        button
            .custom_id(custom_id)
            .style(ButtonStyle::Danger)
            .emoji(ReactionType::Unicode(DELETE_EMOJI.to_string()))
    })
}

/// A single action row holding only a delete button.
pub fn delete_row(author: u64, others: &[u64]) -> CreateComponents {
    let mut components = CreateComponents::default();
    components.create_action_row(|row| add_delete_button(row, author, others));
    components
}

/// Extract the allowed ids from the metadata after `TC_DEL:`.
///
/// Accepts the query-string form (`a=1,2`) as well as a bare id list.
/// Empty and unparsable pieces are skipped.
pub fn parse_owner_ids(metadata: &str) -> HashSet<u64> {
    if !metadata.contains('=') {
        return split_ids(metadata).collect();
    }

    metadata
        .split('&')
        .filter_map(|pair| pair.split_once('='))
        .filter(|(key, _)| *key == OWNER_QS_KEY)
        .flat_map(|(_, value)| split_ids(value))
        .collect()
}

fn split_ids(value: &str) -> impl Iterator<Item = u64> + '_ {
    value
        .split(',')
        .filter(|id| !id.is_empty())
        .filter_map(|id| id.trim().parse::<u64>().ok())
}

/// An empty id set means anyone may delete.
pub fn can_delete(owner_ids: &HashSet<u64>, user_id: u64, role_ids: &[u64]) -> bool {
    owner_ids.is_empty()
        || owner_ids.contains(&user_id)
        || role_ids.iter().any(|role| owner_ids.contains(role))
}

/// Handle a press of a delete button.
pub async fn handle_delete_button(ctx: &Context, interaction: &MessageComponentInteraction) -> Result<()> {
    let metadata = interaction
        .data
        .custom_id
        .strip_prefix(DELETE_CUSTOM_ID)
        .map(|rest| rest.trim_start_matches(':'))
        .unwrap_or_default();
    let owner_ids = parse_owner_ids(metadata);

    let role_ids: Vec<u64> = interaction
        .member
        .as_ref()
        .map(|member| member.roles.iter().map(|role| role.0).collect())
        .unwrap_or_default();

    if can_delete(&owner_ids, interaction.user.id.0, &role_ids) {
        interaction
            .create_interaction_response(&ctx.http, |response| {
                response.kind(InteractionResponseType::DeferredUpdateMessage)
            })
            .await?;
        interaction.message.delete(&ctx.http).await?;
        info!(
            "Deleted message {} on request of {}",
            interaction.message.id, interaction.user.id
        );
    } else {
        debug!("User {} may not delete message {}", interaction.user.id, interaction.message.id);
        interaction
            .create_interaction_response(&ctx.http, |response| {
                response
                    .kind(InteractionResponseType::ChannelMessageWithSource)
                    .interaction_response_data(|message| {
                        message.content("You do not own this message").ephemeral(true)
                    })
            })
            .await?;
    }

    Ok(())
}
