//! # Core Module
//!
//! Configuration, Discord limits and card rendering shared by the reminder bot.
//!
//! - **Version**: 1.1.0
//! - **Since**: 1.0.0
//! - **Toggleable**: false
//!
//! ## Changelog
//! - 1.1.0: Add embeds module with reminder card rendering
//! - 1.0.0: Initial creation with config and response modules

pub mod config;
pub mod embeds;
pub mod response;

// Re-export commonly used items
pub use config::Config;
pub use embeds::{render_embeds, BotIdentity, CardField, ReminderCard, CARD_COLOR};
pub use response::{
    truncate_for_embed, truncate_for_message, truncate_to, EMBED_LIMIT, MESSAGE_LIMIT,
};
