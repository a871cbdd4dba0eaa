//! # Slash Commands (/)
//!
//! Registration of the docstring-built command definitions and option
//! accessors for incoming interactions.
//!
//! - **Version**: 3.0.0
//! - **Since**: 0.2.0
//! - **Toggleable**: false
//!
//! ## Changelog
//! - 3.0.0: Register documented commands, split by global flag
//! - 2.0.0: Option accessors shared by all handlers
//! - 1.0.0: Reorganized from monolithic slash_commands.rs

use anyhow::Result;
use log::info;
use serenity::model::application::command::Command;
use serenity::model::application::interaction::application_command::CommandDataOption;
use serenity::model::id::GuildId;
use serenity::prelude::Context;

use super::builder::DocumentedCommand;

/// Commands declared everywhere
pub fn global_commands(commands: &[DocumentedCommand]) -> Vec<&DocumentedCommand> {
    commands.iter().filter(|command| command.is_global).collect()
}

/// Commands only declared in specific guilds
pub fn guild_only_commands(commands: &[DocumentedCommand]) -> Vec<&DocumentedCommand> {
    commands.iter().filter(|command| !command.is_global).collect()
}

/// Register the global commands of `commands`, replacing any existing set
pub async fn register_global_commands(ctx: &Context, commands: &[DocumentedCommand]) -> Result<()> {
    let global = global_commands(commands);
    let count = global.len();

    Command::set_global_application_commands(&ctx.http, |builder| {
        for command in global {
            builder.add_application_command(command.build());
        }
        builder
    })
    .await?;

    info!("Global slash commands registered successfully ({count} commands)");
    Ok(())
}

/// Register `commands` for a single guild (faster for testing)
pub async fn register_guild_commands(
    ctx: &Context,
    guild_id: GuildId,
    commands: &[&DocumentedCommand],
) -> Result<()> {
    guild_id
        .set_application_commands(&ctx.http, |builder| {
            for command in commands {
                builder.add_application_command(command.build());
            }
            builder
        })
        .await?;

    info!(
        "Guild slash commands registered for guild {} ({} commands)",
        guild_id,
        commands.len()
    );
    Ok(())
}

/// Utility function to get string option from slash command
pub fn get_string_option(options: &[CommandDataOption], name: &str) -> Option<String> {
    options
        .iter()
        .find(|opt| opt.name == name)
        .and_then(|opt| opt.value.as_ref())
        .and_then(|val| val.as_str())
        .map(|s| s.to_string())
}

/// Utility function to get channel option from slash command
pub fn get_channel_option(options: &[CommandDataOption], name: &str) -> Option<u64> {
    options
        .iter()
        .find(|opt| opt.name == name)
        .and_then(|opt| opt.value.as_ref())
        .and_then(|val| val.as_str())
        .and_then(|s| s.parse().ok())
}

/// Utility function to get boolean option from slash command
pub fn get_bool_option(options: &[CommandDataOption], name: &str) -> Option<bool> {
    options
        .iter()
        .find(|opt| opt.name == name)
        .and_then(|opt| opt.value.as_ref())
        .and_then(|val| val.as_bool())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::metadata::CallbackMetadata;

    fn command(name: &str, global: bool) -> DocumentedCommand {
        let mut meta = CallbackMetadata::new(name).doc("Does a thing.");
        if !global {
            meta = meta.guild_only();
        }
        DocumentedCommand::from_callback(&meta).unwrap()
    }

    #[test]
    fn test_split_by_scope() {
        let commands = vec![command("ping", true), command("eval", false), command("help", true)];

        let global: Vec<&str> = global_commands(&commands).iter().map(|c| c.name.as_str()).collect();
        let guild: Vec<&str> = guild_only_commands(&commands).iter().map(|c| c.name.as_str()).collect();

        assert_eq!(global, vec!["ping", "help"]);
        assert_eq!(guild, vec!["eval"]);
    }

    #[test]
    fn test_built_commands_have_names() {
        let commands = vec![command("ping", true), command("help", true)];
        let names: Vec<String> = commands
            .iter()
            .map(|cmd| cmd.build().0.get("name").unwrap().as_str().unwrap().to_string())
            .collect();
        assert_eq!(names, vec!["ping", "help"]);
    }
}
