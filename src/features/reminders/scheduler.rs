//! # Reminder Scheduler
//!
//! One recurring tokio task per reminder. Task handles live in an arena keyed
//! by [`TaskId`]; records only keep the id, and cancellation is a lookup.
//!
//! - **Version**: 2.0.0
//! - **Since**: 0.1.0
//! - **Toggleable**: false
//!
//! ## Changelog
//! - 2.0.0: Recurring per-reminder timers with handle arena, DM delivery per firing
//! - 1.0.0: Initial polling scheduler

use crate::core::ReminderCard;
use crate::delivery::{deliver_or_log, MessageDelivery, Reply};
use crate::features::reminders::model::Reminder;
use dashmap::DashMap;
use log::{debug, info};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use uuid::Uuid;

/// Stable handle for an armed reminder timer
pub type TaskId = Uuid;

struct ScheduledTask {
    handle: JoinHandle<()>,
    period: Duration,
}

pub struct ReminderScheduler {
    delivery: Arc<dyn MessageDelivery>,
    tasks: DashMap<TaskId, ScheduledTask>,
}

impl ReminderScheduler {
    pub fn new(delivery: Arc<dyn MessageDelivery>) -> Self {
        Self {
            delivery,
            tasks: DashMap::new(),
        }
    }

    /// Arm a recurring timer for `reminder`. The first firing is one full
    /// period from now.
    ///
    /// Must be called from within a tokio runtime.
    pub fn arm(&self, reminder: &Reminder) -> TaskId {
        let id = Uuid::new_v4();
        let period = reminder.period();
        let owner = reminder.author.clone();
        // Snapshot taken at arm time; firings never look back into the registry
        let reply = Reply::Card(ReminderCard::with_description(&reminder.message));
        let delivery = Arc::clone(&self.delivery);

        let handle = tokio::spawn(async move {
            let mut ticker = interval_at(Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                debug!("⏰ Reminder {id} fired for user {owner}");
                let delivery = Arc::clone(&delivery);
                let owner = owner.clone();
                let reply = reply.clone();
                tokio::spawn(async move {
                    deliver_or_log(delivery.as_ref(), &owner, "", &reply).await;
                });
            }
        });

        self.tasks.insert(id, ScheduledTask { handle, period });
        debug!(
            "Armed reminder {id} for user {} every {:?}",
            reminder.author, period
        );
        id
    }

    /// Cancel a timer. In-flight deliveries from earlier firings still complete.
    pub fn cancel(&self, id: &TaskId) -> bool {
        match self.tasks.remove(id) {
            Some((_, task)) => {
                task.handle.abort();
                debug!("Cancelled reminder {id}");
                true
            }
            None => false,
        }
    }

    pub fn period(&self, id: &TaskId) -> Option<Duration> {
        self.tasks.get(id).map(|task| task.period)
    }

    pub fn is_armed(&self, id: &TaskId) -> bool {
        self.tasks.contains_key(id)
    }

    pub fn active_count(&self) -> usize {
        self.tasks.len()
    }
}

impl Drop for ReminderScheduler {
    fn drop(&mut self) {
        if !self.tasks.is_empty() {
            info!("Stopping {} reminder timers", self.tasks.len());
        }
        for task in self.tasks.iter() {
            task.handle.abort();
        }
    }
}
