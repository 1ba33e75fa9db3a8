//! # Command System
//!
//! Prefix text command (`r!set`, `r!list`, `r!stop`, `r!help`) parsing and
//! dispatch.
//!
//! - **Version**: 3.0.0
//! - **Since**: 0.2.0
//! - **Toggleable**: false
//!
//! ## Changelog
//! - 3.0.0: Prefix text commands for recurring reminders; drop slash commands
//! - 2.0.0: Remove bang commands, slash-only command system
//! - 1.0.0: Initial reorganization with modular command structure

pub mod dispatcher;
pub mod parser;

pub use dispatcher::{load_help, CommandDispatcher, Response};
pub use parser::{Command, CommandParser, SetDetails};
