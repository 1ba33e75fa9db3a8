//! # Message Delivery
//!
//! Boundary between the reminder bot and the chat transport: resolve an owner
//! id to a DM channel and send a text or card reply.
//!
//! - **Version**: 1.0.0
//! - **Since**: 1.0.0
//! - **Toggleable**: false

use crate::core::{render_embeds, truncate_for_message, BotIdentity, ReminderCard};
use anyhow::{Context as _, Result};
use async_trait::async_trait;
use log::{debug, warn};
use serenity::http::Http;
use serenity::model::id::UserId;
use std::sync::Arc;

/// Payload sent back to a user
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    Text(String),
    Card(ReminderCard),
}

impl Reply {
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }
}

/// Sends replies to a user identified by owner id
#[async_trait]
pub trait MessageDelivery: Send + Sync {
    /// Deliver `reply` to `owner`, tagging cards with `title` (e.g. "[LIST]")
    async fn deliver(&self, owner: &str, title: &str, reply: &Reply) -> Result<()>;
}

/// Deliver and log any failure; delivery errors never reach the user
pub async fn deliver_or_log(
    delivery: &dyn MessageDelivery,
    owner: &str,
    title: &str,
    reply: &Reply,
) {
    if let Err(e) = delivery.deliver(owner, title, reply).await {
        warn!("Error delivering message to user {owner}: {e:#}");
    }
}

/// Discord DM delivery via serenity's HTTP client
pub struct SerenityDelivery {
    http: Arc<Http>,
    identity: BotIdentity,
}

impl SerenityDelivery {
    pub fn new(http: Arc<Http>, identity: BotIdentity) -> Self {
        Self { http, identity }
    }
}

#[async_trait]
impl MessageDelivery for SerenityDelivery {
    async fn deliver(&self, owner: &str, title: &str, reply: &Reply) -> Result<()> {
        let user_id = owner
            .parse::<u64>()
            .map(UserId)
            .with_context(|| format!("invalid user id '{owner}'"))?;

        let http = self.http.as_ref();
        let dm = user_id
            .create_dm_channel(http)
            .await
            .with_context(|| format!("Error fetching user! ({owner})"))?;

        match reply {
            Reply::Text(text) => {
                dm.say(http, truncate_for_message(text)).await?;
            }
            Reply::Card(card) => {
                for embed in render_embeds(card, &self.identity, title) {
                    dm.send_message(http, |m| m.set_embed(embed)).await?;
                }
            }
        }

        debug!("Delivered {title} reply to user {owner}");
        Ok(())
    }
}


#[cfg(test)]
mod tests {
    use super::testing::{FailingDelivery, RecordingDelivery};
    use super::*;

    // Test that the trait is object-safe (can be used with dyn)
    fn _assert_object_safe(_: &dyn MessageDelivery) {}

    #[tokio::test]
    async fn test_deliver_or_log_records() {
        let delivery = RecordingDelivery::default();
        deliver_or_log(&delivery, "42", "[SET]", &Reply::text("Reminder set!")).await;

        let sent = delivery.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].owner, "42");
        assert_eq!(sent[0].title, "[SET]");
        assert_eq!(sent[0].reply, Reply::text("Reminder set!"));
    }

    #[tokio::test]
    async fn test_deliver_or_log_swallows_errors() {
        // Must not panic or propagate
        deliver_or_log(&FailingDelivery, "42", "[ERROR]", &Reply::text("x")).await;
    }
}
