//! Reminder card embed builders for Discord responses
//!
//! Cards are built as plain data by the dispatcher and scheduler, then rendered
//! into serenity embeds at the delivery boundary with the bot's identity.
//!
//! - **Version**: 1.1.0
//! - **Since**: 1.0.0
//!
//! ## Changelog
//! - 1.1.0: Split cards with more than 25 fields across several embeds
//! - 1.0.0: Initial card template (author, color, title, footer, timestamp)

use crate::core::response::{
    batch_fields, truncate_for_embed, truncate_to, FIELD_NAME_LIMIT, FIELD_VALUE_LIMIT,
};
use serde::{Deserialize, Serialize};
use serenity::builder::CreateEmbed;
use serenity::model::Timestamp;

/// Accent color shared by every reminder card
pub const CARD_COLOR: u32 = 0x009900;

/// A single name/value entry on a card
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardField {
    pub name: String,
    pub value: String,
    #[serde(default)]
    pub inline: bool,
}

impl CardField {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            inline: false,
        }
    }
}

/// Structured rich-card payload, independent of the chat transport
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReminderCard {
    pub description: Option<String>,
    pub fields: Vec<CardField>,
}

impl ReminderCard {
    pub fn with_description(text: impl Into<String>) -> Self {
        Self {
            description: Some(text.into()),
            fields: Vec::new(),
        }
    }

    pub fn with_fields(fields: Vec<CardField>) -> Self {
        Self {
            description: None,
            fields,
        }
    }
}

/// The bot's own name/avatar, known once the gateway reports ready
#[derive(Debug, Clone, Default)]
pub struct BotIdentity {
    pub name: String,
    pub avatar_url: Option<String>,
    pub project_url: Option<String>,
}

impl BotIdentity {
    /// Author line shown at the top of every card, e.g. "Reminder from Bot! [LIST]"
    pub fn author_line(&self, title: &str) -> String {
        format!("Reminder from {}! {}", self.name, title)
            .trim_end()
            .to_string()
    }

    pub fn card_title(&self) -> String {
        format!("{} on Github", self.name)
    }
}

/// Render a card into one or more embeds.
///
/// Only the first embed carries the description; fields are batched so each
/// embed stays under Discord's field count limit.
pub fn render_embeds(card: &ReminderCard, identity: &BotIdentity, title: &str) -> Vec<CreateEmbed> {
    batch_fields(&card.fields)
        .into_iter()
        .enumerate()
        .map(|(i, fields)| {
            let mut embed = base_embed(identity, title);
            if i == 0 {
                if let Some(description) = &card.description {
                    embed.description(truncate_for_embed(description));
                }
            }
            for field in fields {
                embed.field(
                    truncate_to(&field.name, FIELD_NAME_LIMIT),
                    truncate_to(&field.value, FIELD_VALUE_LIMIT),
                    field.inline,
                );
            }
            embed
        })
        .collect()
}

fn base_embed(identity: &BotIdentity, title: &str) -> CreateEmbed {
    let mut embed = CreateEmbed::default();
    embed.author(|a| {
        a.name(identity.author_line(title));
        if let Some(url) = &identity.avatar_url {
            a.icon_url(url);
        }
        a
    });
    embed.color(CARD_COLOR);
    embed.title(identity.card_title());
    if let Some(url) = &identity.project_url {
        embed.url(url);
    }
    embed.footer(|f| {
        f.text(&identity.name);
        if let Some(url) = &identity.avatar_url {
            f.icon_url(url);
        }
        f
    });
    embed.timestamp(Timestamp::now());
    embed
}

#[cfg(test)]
mod tests {
    use super::*;

    fn identity() -> BotIdentity {
        BotIdentity {
            name: "Remindy".to_string(),
            avatar_url: Some("https://example.com/avatar.png".to_string()),
            project_url: None,
        }
    }

    #[test]
    fn test_author_line_with_title() {
        assert_eq!(identity().author_line("[LIST]"), "Reminder from Remindy! [LIST]");
    }

    #[test]
    fn test_author_line_without_title() {
        assert_eq!(identity().author_line(""), "Reminder from Remindy!");
    }

    #[test]
    fn test_card_title() {
        assert_eq!(identity().card_title(), "Remindy on Github");
    }

    #[test]
    fn test_render_single_embed() {
        let card = ReminderCard::with_description("drink water");
        assert_eq!(render_embeds(&card, &identity(), "").len(), 1);
    }

    #[test]
    fn test_render_splits_many_fields() {
        let fields = (0..30)
            .map(|i| CardField::new(format!("[{i}] task"), "every 1 hours"))
            .collect();
        let card = ReminderCard::with_fields(fields);
        assert_eq!(render_embeds(&card, &identity(), "[LIST]").len(), 2);
    }

    #[test]
    fn test_render_truncates_long_text() {
        let card = ReminderCard {
            description: Some("x".repeat(5000)),
            fields: vec![CardField::new("n".repeat(400), "v".repeat(2000))],
        };
        // Should not panic; limits are enforced before building
        let _embeds = render_embeds(&card, &BotIdentity::default(), "[HELP]");
    }

    #[test]
    fn test_card_field_inline_defaults_false() {
        let field: CardField =
            serde_json::from_str(r#"{"name": "r!list", "value": "Lists reminders"}"#).unwrap();
        assert!(!field.inline);
    }
}
