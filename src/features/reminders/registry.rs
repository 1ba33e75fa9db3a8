//! # Reminder Registry
//!
//! In-memory owner → ordered reminder list. A reminder's position is its
//! user-facing index; removing one shifts every later index down by one.
//!
//! - **Version**: 1.0.0
//! - **Since**: 1.0.0
//! - **Toggleable**: false

use crate::features::reminders::model::{Reminder, ReminderError};
use crate::features::reminders::scheduler::{ReminderScheduler, TaskId};
use dashmap::DashMap;
use log::info;
use std::time::Duration;

struct Entry {
    reminder: Reminder,
    task: TaskId,
}

/// Outcome of a successful stop
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Stopped {
    All(usize),
    One(Reminder),
}

pub struct ReminderRegistry {
    owners: DashMap<String, Vec<Entry>>,
    scheduler: ReminderScheduler,
}

impl ReminderRegistry {
    pub fn new(scheduler: ReminderScheduler) -> Self {
        Self {
            owners: DashMap::new(),
            scheduler,
        }
    }

    /// Validate and add a reminder for `owner`, arming its timer
    pub fn set(
        &self,
        owner: &str,
        message: &str,
        kind: &str,
        time: &str,
        units: &str,
    ) -> Result<Reminder, ReminderError> {
        let reminder = Reminder::from_parts(owner, message, kind, time, units)?;
        let task = self.scheduler.arm(&reminder);
        self.owners
            .entry(owner.to_string())
            .or_default()
            .push(Entry {
                reminder: reminder.clone(),
                task,
            });
        info!(
            "Reminder set for user {owner}: {} ({})",
            reminder.message,
            reminder.schedule_text()
        );
        Ok(reminder)
    }

    /// Replace `owner`'s collection with saved records, arming a fresh timer
    /// for each. Returns the number armed.
    pub fn restore(&self, owner: &str, reminders: Vec<Reminder>) -> usize {
        let entries: Vec<Entry> = reminders
            .into_iter()
            .map(|reminder| Entry {
                task: self.scheduler.arm(&reminder),
                reminder,
            })
            .collect();
        let count = entries.len();

        if let Some(previous) = self.owners.insert(owner.to_string(), entries) {
            for entry in previous {
                self.scheduler.cancel(&entry.task);
            }
        }
        count
    }

    /// Current reminders for `owner` with their indices; empty if none
    pub fn list(&self, owner: &str) -> Vec<(usize, Reminder)> {
        self.owners
            .get(owner)
            .map(|entries| {
                entries
                    .iter()
                    .enumerate()
                    .map(|(i, entry)| (i, entry.reminder.clone()))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Stop one reminder by index, or every reminder when `arg` is "all"
    pub fn stop(&self, owner: &str, arg: &str) -> Result<Stopped, ReminderError> {
        let arg = arg.trim();
        let mut entries = self
            .owners
            .get_mut(owner)
            .ok_or(ReminderError::NoReminders)?;

        if arg.eq_ignore_ascii_case("all") {
            let removed: Vec<Entry> = entries.drain(..).collect();
            drop(entries);
            for entry in &removed {
                self.scheduler.cancel(&entry.task);
            }
            info!("Cleared {} reminders for user {owner}", removed.len());
            return Ok(Stopped::All(removed.len()));
        }

        let index = arg
            .parse::<usize>()
            .ok()
            .filter(|i| *i < entries.len())
            .ok_or(ReminderError::InvalidReminder)?;

        let entry = entries.remove(index);
        drop(entries);
        self.scheduler.cancel(&entry.task);
        info!("Stopped reminder [{index}] for user {owner}");
        Ok(Stopped::One(entry.reminder))
    }

    /// Copy of `owner`'s collection for persistence; `None` if the owner has
    /// never had one
    pub fn snapshot(&self, owner: &str) -> Option<Vec<Reminder>> {
        self.owners
            .get(owner)
            .map(|entries| entries.iter().map(|e| e.reminder.clone()).collect())
    }

    /// Timer periods for `owner`'s reminders, in list order
    pub fn periods(&self, owner: &str) -> Vec<Option<Duration>> {
        self.owners
            .get(owner)
            .map(|entries| {
                entries
                    .iter()
                    .map(|e| self.scheduler.period(&e.task))
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn len(&self, owner: &str) -> usize {
        self.owners.get(owner).map(|e| e.len()).unwrap_or(0)
    }

    pub fn scheduler(&self) -> &ReminderScheduler {
        &self.scheduler
    }
}
