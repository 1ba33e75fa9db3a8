//! Text command dispatcher
//!
//! Runs a parsed command against the reminder registry, saves the acting
//! user's collection and sends the reply by DM.
//!
//! - **Version**: 1.0.0
//! - **Since**: 1.0.0

use crate::commands::parser::{Command, CommandParser, SetDetails};
use crate::core::{CardField, ReminderCard};
use crate::delivery::{deliver_or_log, MessageDelivery, Reply};
use crate::features::reminders::{ReminderError, ReminderRegistry, ReminderStore, Stopped};
use anyhow::{Context, Result};
use log::{debug, info, warn};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::Mutex;

pub const TITLE_SET: &str = "[SET]";
pub const TITLE_LIST: &str = "[LIST]";
pub const TITLE_STOP: &str = "[STOP]";
pub const TITLE_HELP: &str = "[HELP]";
pub const TITLE_ERROR: &str = "[ERROR]";

/// Reply plus the title tag it is delivered under
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    pub title: &'static str,
    pub reply: Reply,
}

impl Response {
    fn new(title: &'static str, reply: Reply) -> Self {
        Self { title, reply }
    }
}

pub struct CommandDispatcher {
    parser: CommandParser,
    registry: Arc<ReminderRegistry>,
    store: ReminderStore,
    delivery: Arc<dyn MessageDelivery>,
    help_path: PathBuf,
    // Commands run one at a time, in the order they reach the queue
    queue: Mutex<()>,
}

impl CommandDispatcher {
    pub fn new(
        parser: CommandParser,
        registry: Arc<ReminderRegistry>,
        store: ReminderStore,
        delivery: Arc<dyn MessageDelivery>,
        help_path: impl Into<PathBuf>,
    ) -> Self {
        Self {
            parser,
            registry,
            store,
            delivery,
            help_path: help_path.into(),
            queue: Mutex::new(()),
        }
    }

    pub fn registry(&self) -> &ReminderRegistry {
        &self.registry
    }

    /// Handle one inbound message from `owner`.
    ///
    /// Returns `false` if the text was not a command (nothing is sent or saved).
    pub async fn handle_message(&self, owner: &str, content: &str) -> bool {
        let Some(command) = self.parser.parse(content) else {
            return false;
        };
        let _turn = self.queue.lock().await;
        debug!("Command from user {owner}: {command:?}");

        let response = self.execute(owner, command).await;
        self.store.persist(&self.registry, owner).await;

        if let Some(response) = response {
            deliver_or_log(self.delivery.as_ref(), owner, response.title, &response.reply).await;
        }
        true
    }

    /// Execute a parsed command. `None` means there is nothing to send
    /// (the help document could not be loaded).
    pub async fn execute(&self, owner: &str, command: Command) -> Option<Response> {
        let response = match command {
            Command::Set(details) => {
                Response::new(TITLE_SET, Reply::text(self.set(owner, details)))
            }
            Command::List => Response::new(TITLE_LIST, self.list(owner)),
            Command::Stop(arg) => {
                Response::new(TITLE_STOP, Reply::text(self.stop(owner, &arg)))
            }
            Command::Help => match load_help(&self.help_path).await {
                Ok(card) => Response::new(TITLE_HELP, Reply::Card(card)),
                Err(e) => {
                    warn!("Error reading help file! {e:#}");
                    return None;
                }
            },
            Command::Unknown(word) => {
                debug!("Unknown command '{word}' from user {owner}");
                Response::new(
                    TITLE_ERROR,
                    Reply::text(format!("Invalid command! Try {}help", self.parser.prefix())),
                )
            }
        };
        Some(response)
    }

    fn set(&self, owner: &str, details: Option<SetDetails>) -> String {
        let Some(d) = details else {
            return ReminderError::MissingMessage.to_string();
        };
        match self
            .registry
            .set(owner, &d.message, &d.kind, &d.time, &d.units)
        {
            Ok(_) => "Reminder set!".to_string(),
            Err(e) => e.to_string(),
        }
    }

    fn list(&self, owner: &str) -> Reply {
        let reminders = self.registry.list(owner);
        if reminders.is_empty() {
            return Reply::text(ReminderError::NoReminders.to_string());
        }

        let fields = reminders
            .iter()
            .map(|(i, r)| CardField::new(format!("[{i}] {}", r.message), r.schedule_text()))
            .collect();
        Reply::Card(ReminderCard::with_fields(fields))
    }

    fn stop(&self, owner: &str, arg: &str) -> String {
        match self.registry.stop(owner, arg) {
            Ok(Stopped::All(_)) => "Cleared all reminders!".to_string(),
            Ok(Stopped::One(_)) => "Reminder stopped successfully!".to_string(),
            Err(ReminderError::InvalidReminder) => {
                format!(
                    "{} (try {}list)",
                    ReminderError::InvalidReminder,
                    self.parser.prefix()
                )
            }
            Err(e) => e.to_string(),
        }
    }
}

/// Load the static help document: a JSON array of card fields
pub async fn load_help(path: &Path) -> Result<ReminderCard> {
    let data = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("reading {}", path.display()))?;
    let fields: Vec<CardField> =
        serde_json::from_str(&data).with_context(|| format!("parsing {}", path.display()))?;
    info!("Loaded help document with {} entries", fields.len());
    Ok(ReminderCard::with_fields(fields))
}
