//! # Reminders Feature
//!
//! Recurring DM reminders: data model, per-user registry, timers and
//! per-user JSON persistence.
//!
//! - **Version**: 2.0.0
//! - **Since**: 0.1.0
//! - **Toggleable**: false
//!
//! ## Changelog
//! - 2.0.0: Recurring reminders with in-memory registry and JSON save files
//! - 1.0.0: Initial one-shot scheduler

pub mod model;
pub mod registry;
pub mod scheduler;
pub mod store;

pub use model::{Reminder, ReminderError, RepeatKind, TimeUnit};
pub use registry::{ReminderRegistry, Stopped};
pub use scheduler::{ReminderScheduler, TaskId};
pub use store::ReminderStore;
