// Core layer - config, limits and card rendering
pub mod core;

// Features layer - reminder registry, timers and persistence
pub mod features;

// Transport boundary - DM delivery
pub mod delivery;

// Application layer
pub mod commands;

pub use crate::core::Config;
pub use commands::{CommandDispatcher, CommandParser};
pub use delivery::{MessageDelivery, Reply, SerenityDelivery};
pub use features::{ReminderRegistry, ReminderScheduler, ReminderStore};
