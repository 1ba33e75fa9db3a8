//! # Features
//!
//! - **Version**: 2.0.0
//! - **Since**: 0.7.0
//!
//! ## Changelog
//! - 2.0.0: Reminders is the only feature module

pub mod reminders;

pub use reminders::{ReminderRegistry, ReminderScheduler, ReminderStore};
