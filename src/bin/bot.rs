use anyhow::Result;
use dotenvy::dotenv;
use log::{error, info, warn};
use serenity::async_trait;
use serenity::model::application::interaction::{Interaction, InteractionResponseType};
use serenity::model::gateway::Ready;
use serenity::model::id::GuildId;
use serenity::prelude::*;
use std::sync::Arc;
use std::time::Duration;

use docslash::commands::handlers::create_all_handlers;
use docslash::commands::{
    guild_only_commands, register_global_commands, register_guild_commands, CommandContext,
    CommandRegistry, DocumentedCommand,
};
use docslash::core::{ComponentsConfig, Config};
use docslash::features::{EvalExecutor, HelpIndex};
use docslash::message_components::MessageComponentHandler;

/// How often expired eval files are dropped from the store
const FILE_PURGE_INTERVAL: Duration = Duration::from_secs(60);

struct Handler {
    registry: Arc<CommandRegistry>,
    commands: Vec<DocumentedCommand>,
    command_ctx: Arc<CommandContext>,
    component_handler: Arc<MessageComponentHandler>,
    guild_id: Option<GuildId>,
    eval_guild_ids: Vec<GuildId>,
}

impl Handler {
    async fn register_commands(&self, ctx: &Context) {
        // Register slash commands - use guild commands for development (instant), global for production
        if let Some(guild_id) = self.guild_id {
            info!("🔧 Development mode: Registering commands for guild {guild_id}");
            let all: Vec<&DocumentedCommand> = self.commands.iter().collect();
            if let Err(e) = register_guild_commands(ctx, guild_id, &all).await {
                error!("❌ Failed to register guild slash commands: {e}");
            } else {
                info!("✅ Successfully registered slash commands for guild {guild_id} (instant update)");
            }
            return;
        }

        info!("🌍 Production mode: Registering commands globally");
        if let Err(e) = register_global_commands(ctx, &self.commands).await {
            error!("❌ Failed to register global slash commands: {e}");
        } else {
            info!("✅ Successfully registered slash commands globally (may take up to 1 hour to propagate)");
        }

        let guild_only = guild_only_commands(&self.commands);
        if guild_only.is_empty() {
            return;
        }
        for guild_id in &self.eval_guild_ids {
            if let Err(e) = register_guild_commands(ctx, *guild_id, &guild_only).await {
                error!("❌ Failed to register guild-only commands for guild {guild_id}: {e}");
            }
        }
    }
}

#[async_trait]
impl EventHandler for Handler {
    async fn ready(&self, ctx: Context, ready: Ready) {
        info!("🎉 {} is connected and ready!", ready.user.name);
        info!("📡 Connected to {} guilds", ready.guilds.len());
        info!("🤖 Bot ID: {}", ready.user.id);

        if let Some(shard) = ready.shard {
            info!("⚡ Shard: {}/{}", shard[0] + 1, shard[1]);
        }

        self.register_commands(&ctx).await;
    }

    async fn interaction_create(&self, ctx: Context, interaction: Interaction) {
        match interaction {
            Interaction::ApplicationCommand(command) => {
                if let Err(e) = self
                    .registry
                    .dispatch(Arc::clone(&self.command_ctx), &ctx, &command)
                    .await
                {
                    error!(
                        "Error handling slash command '{}': {}",
                        command.data.name, e
                    );

                    let error_message = "❌ Sorry, I encountered an error processing your command. Please try again.";

                    // Try to edit the deferred response, fallback to new response if that fails
                    #[allow(clippy::redundant_pattern_matching)]
                    if let Err(_) = command
                        .edit_original_interaction_response(&ctx.http, |response| {
                            response.content(error_message)
                        })
                        .await
                    {
                        let _ = command
                            .create_interaction_response(&ctx.http, |response| {
                                response
                                    .kind(InteractionResponseType::ChannelMessageWithSource)
                                    .interaction_response_data(|message| {
                                        message.content(error_message).ephemeral(true)
                                    })
                            })
                            .await;
                    }
                }
            }
            Interaction::MessageComponent(component) => {
                if let Err(e) = self
                    .component_handler
                    .handle_component_interaction(&ctx, &component)
                    .await
                {
                    error!(
                        "Error handling component interaction '{}': {}",
                        component.data.custom_id, e
                    );

                    let error_message = "❌ Sorry, I encountered an error processing your interaction. Please try again.";
                    let _ = component
                        .create_interaction_response(&ctx.http, |response| {
                            response
                                .kind(InteractionResponseType::ChannelMessageWithSource)
                                .interaction_response_data(|message| {
                                    message.content(error_message).ephemeral(true)
                                })
                        })
                        .await;
                }
            }
            Interaction::ModalSubmit(modal) => {
                if let Err(e) = self
                    .component_handler
                    .handle_modal_submit(&ctx, &modal)
                    .await
                {
                    error!(
                        "Error handling modal submit '{}': {}",
                        modal.data.custom_id, e
                    );

                    let error_message = "❌ Sorry, I encountered an error processing your submission. Please try again.";
                    let _ = modal
                        .create_interaction_response(&ctx.http, |response| {
                            response
                                .kind(InteractionResponseType::ChannelMessageWithSource)
                                .interaction_response_data(|message| {
                                    message.content(error_message).ephemeral(true)
                                })
                        })
                        .await;
                }
            }
            _ => {}
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenv().ok();

    let config = Config::from_env()?;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&config.log_level))
        .init();

    info!("Starting docslash bot...");

    let components = ComponentsConfig::load_or_default(&config.components_config_path)?;
    components.validate()?;
    info!(
        "Components: help {}, eval {}",
        if components.help.enabled { "enabled" } else { "disabled" },
        if components.eval.enabled { "enabled" } else { "disabled" },
    );

    let mut registry = CommandRegistry::new();
    for handler in create_all_handlers(&components) {
        registry.register(handler);
    }

    let mut commands = registry.build_commands(config.doc_style)?;
    // eval is declared globally only when no guilds are listed for it
    if let Some(eval) = commands.iter_mut().find(|command| command.name == "eval") {
        eval.is_global = components.eval.eval_guild_ids.is_none();
    }
    info!("Built {} slash commands from docstrings", commands.len());

    let help_index = HelpIndex::build(
        &registry.help_sources(),
        components.help.page_size,
        components.help.include_undocumented,
    );
    info!(
        "Help index: {} pages ({})",
        help_index.page_count(),
        help_index.hash()
    );

    if config.owner_ids.is_empty() {
        warn!("OWNER_IDS is empty, /eval will reject everyone");
    }

    let command_ctx = Arc::new(CommandContext::new(
        help_index,
        EvalExecutor::new(&components.eval),
        config.owner_ids.clone(),
    ));
    let component_handler = MessageComponentHandler::new(Arc::clone(&command_ctx));

    // Parse guild ID if provided for development mode
    let guild_id = config
        .discord_guild_id
        .as_ref()
        .and_then(|id| id.parse::<u64>().ok())
        .map(GuildId);

    let eval_guild_ids = components
        .eval
        .eval_guild_ids
        .clone()
        .unwrap_or_default()
        .into_iter()
        .map(GuildId)
        .collect();

    let file_store = command_ctx.file_store.clone();
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(FILE_PURGE_INTERVAL);
        loop {
            interval.tick().await;
            file_store.purge_expired();
        }
    });

    let handler = Handler {
        registry: Arc::new(registry),
        commands,
        command_ctx,
        component_handler: Arc::new(component_handler),
        guild_id,
        eval_guild_ids,
    };

    let intents = GatewayIntents::GUILDS;

    // Build the Discord client with proper gateway configuration
    let mut client = Client::builder(&config.discord_token, intents)
        .event_handler(handler)
        .await
        .map_err(|e| {
            error!("Failed to create Discord client: {e}");
            error!("This could indicate:");
            error!("  - Invalid bot token format");
            error!("  - Network issues reaching Discord API");
            anyhow::anyhow!("Client creation failed: {}", e)
        })?;

    info!("Establishing WebSocket connection to Discord gateway...");
    info!("Gateway intents: {intents:?}");

    if let Err(why) = client.start().await {
        error!("Gateway connection failed: {why:?}");
        error!("This could be due to:");
        error!("  - Invalid bot token");
        error!("  - Network connectivity issues");
        error!("  - Discord API outage");
        return Err(anyhow::anyhow!(
            "Failed to establish gateway connection: {}",
            why
        ));
    }

    Ok(())
}
