use anyhow::Result;
use dotenvy::dotenv;
use log::{debug, error, info, warn};
use serenity::async_trait;
use serenity::model::channel::Message;
use serenity::model::gateway::Ready;
use serenity::prelude::*;
use std::sync::Arc;
use tokio::sync::OnceCell;

use reminder_bot::commands::{CommandDispatcher, CommandParser};
use reminder_bot::core::{BotIdentity, Config};
use reminder_bot::delivery::{MessageDelivery, SerenityDelivery};
use reminder_bot::features::reminders::{ReminderRegistry, ReminderScheduler, ReminderStore};

struct Handler {
    config: Config,
    parser: CommandParser,
    dispatcher: OnceCell<CommandDispatcher>,
}

impl Handler {
    fn new(config: Config, parser: CommandParser) -> Self {
        Handler {
            config,
            parser,
            dispatcher: OnceCell::new(),
        }
    }

    /// Build the reminder stack once the bot's identity is known, then load
    /// and rearm every saved reminder.
    async fn bootstrap(&self, ctx: &Context, ready: &Ready) -> CommandDispatcher {
        let identity = BotIdentity {
            name: ready.user.name.clone(),
            avatar_url: ready.user.avatar_url(),
            project_url: self.config.project_url.clone(),
        };
        let delivery: Arc<dyn MessageDelivery> =
            Arc::new(SerenityDelivery::new(ctx.http.clone(), identity));

        let registry = Arc::new(ReminderRegistry::new(ReminderScheduler::new(
            delivery.clone(),
        )));
        let store = ReminderStore::new(&self.config.saves_dir);
        store.restore_into(&registry).await;

        CommandDispatcher::new(
            self.parser.clone(),
            registry,
            store,
            delivery,
            &self.config.help_path,
        )
    }
}

#[async_trait]
impl EventHandler for Handler {
    async fn message(&self, _ctx: Context, msg: Message) {
        if msg.author.bot {
            return;
        }

        let Some(dispatcher) = self.dispatcher.get() else {
            warn!("Message received before ready, ignoring");
            return;
        };

        let owner = msg.author.id.to_string();
        if dispatcher.handle_message(&owner, &msg.content).await {
            debug!("📥 Handled command from user {owner}");
        }
    }

    async fn ready(&self, ctx: Context, ready: Ready) {
        info!("🎉 {} is connected and ready!", ready.user.name);
        info!("🤖 Bot ID: {}", ready.user.id);

        if self.dispatcher.initialized() {
            info!("🔗 Reconnected, saved reminders already loaded");
            return;
        }

        let dispatcher = self
            .dispatcher
            .get_or_init(|| self.bootstrap(&ctx, &ready))
            .await;
        info!(
            "⏰ {} active reminders, listening for {}help",
            dispatcher.registry().scheduler().active_count(),
            self.parser.prefix()
        );
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenv().ok();

    let config = Config::from_env()?;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&config.log_level))
        .init();

    info!("Starting Reminder Bot...");

    let parser = CommandParser::new(&config.command_prefix)?;
    let intents = GatewayIntents::GUILD_MESSAGES
        | GatewayIntents::DIRECT_MESSAGES
        | GatewayIntents::MESSAGE_CONTENT;
    let token = config.discord_token.clone();

    let mut client = Client::builder(&token, intents)
        .event_handler(Handler::new(config, parser))
        .await
        .map_err(|e| {
            error!("Failed to create Discord client: {e}");
            anyhow::anyhow!("Client creation failed: {}", e)
        })?;

    info!("Bot configured successfully. Connecting to Discord gateway...");

    if let Err(why) = client.start().await {
        error!("Gateway connection failed: {why:?}");
        return Err(anyhow::anyhow!(
            "Failed to establish gateway connection: {}",
            why
        ));
    }

    Ok(())
}
