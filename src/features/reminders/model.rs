//! Reminder data model and validation errors
//!
//! - **Version**: 1.0.0
//! - **Since**: 1.0.0

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::time::Duration;
use thiserror::Error;

/// Validation failures shown verbatim to the user
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReminderError {
    #[error("Missing message!")]
    MissingMessage,
    #[error("Invalid type (every/each)")]
    InvalidType,
    #[error("Invalid unit (seconds/minutes/hours/days)")]
    InvalidUnit,
    #[error("Invalid time (must be a positive number)")]
    InvalidTime,
    #[error("You have no reminders currently!")]
    NoReminders,
    #[error("Invalid reminder!")]
    InvalidReminder,
}

/// How a reminder repeats. Both variants currently mean "recurring".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RepeatKind {
    Every,
    Each,
}

impl RepeatKind {
    /// Case-insensitive parse of `every` / `each`
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "every" => Some(Self::Every),
            "each" => Some(Self::Each),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Every => "every",
            Self::Each => "each",
        }
    }
}

impl fmt::Display for RepeatKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeUnit {
    Seconds,
    Minutes,
    Hours,
    Days,
}

impl TimeUnit {
    /// Case-insensitive parse of `seconds` / `minutes` / `hours` / `days`
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "seconds" => Some(Self::Seconds),
            "minutes" => Some(Self::Minutes),
            "hours" => Some(Self::Hours),
            "days" => Some(Self::Days),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Seconds => "seconds",
            Self::Minutes => "minutes",
            Self::Hours => "hours",
            Self::Days => "days",
        }
    }

    pub fn millis(&self) -> u64 {
        match self {
            Self::Seconds => 1_000,
            Self::Minutes => 60_000,
            Self::Hours => 3_600_000,
            Self::Days => 86_400_000,
        }
    }
}

impl fmt::Display for TimeUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Firing period in milliseconds, or `None` for zero or overflowing intervals
pub fn period_millis(interval: u64, unit: TimeUnit) -> Option<u64> {
    if interval == 0 {
        return None;
    }
    interval.checked_mul(unit.millis())
}

/// One recurring reminder owned by one user.
///
/// The on-disk shape is `{author, message, type, time, units}` with `time`
/// written as a string. Timer handles live in the scheduler, never here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reminder {
    pub author: String,
    pub message: String,
    #[serde(rename = "type")]
    pub kind: RepeatKind,
    #[serde(with = "interval_text")]
    pub time: u64,
    pub units: TimeUnit,
}

impl Reminder {
    /// Validate raw command fields into a reminder.
    ///
    /// Checks run in order: message, type, unit, then interval.
    pub fn from_parts(
        author: &str,
        message: &str,
        kind: &str,
        time: &str,
        units: &str,
    ) -> Result<Self, ReminderError> {
        if message.is_empty() {
            return Err(ReminderError::MissingMessage);
        }
        let kind = RepeatKind::parse(kind).ok_or(ReminderError::InvalidType)?;
        let units = TimeUnit::parse(units).ok_or(ReminderError::InvalidUnit)?;
        let time = time
            .parse::<u64>()
            .ok()
            .filter(|t| period_millis(*t, units).is_some())
            .ok_or(ReminderError::InvalidTime)?;

        Ok(Self {
            author: author.to_string(),
            message: message.to_string(),
            kind,
            time,
            units,
        })
    }

    /// Whether a loaded record can be armed
    pub fn is_schedulable(&self) -> bool {
        !self.message.is_empty() && period_millis(self.time, self.units).is_some()
    }

    pub fn period(&self) -> Duration {
        Duration::from_millis(self.time.saturating_mul(self.units.millis()))
    }

    /// Schedule summary used in list output, e.g. "every 30 minutes"
    pub fn schedule_text(&self) -> String {
        format!("{} {} {}", self.kind, self.time, self.units)
    }
}

/// `time` is stored as a string; older files may hold a bare number.
mod interval_text {
    use super::*;

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Number(u64),
    }

    pub fn serialize<S: Serializer>(time: &u64, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&time.to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u64, D::Error> {
        match Raw::deserialize(deserializer)? {
            Raw::Number(n) => Ok(n),
            Raw::Text(s) => s.trim().parse().map_err(serde::de::Error::custom),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_parts_valid() {
        let reminder = Reminder::from_parts("u1", "drink water", "Every", "30", "MINUTES").unwrap();
        assert_eq!(reminder.kind, RepeatKind::Every);
        assert_eq!(reminder.units, TimeUnit::Minutes);
        assert_eq!(reminder.time, 30);
        assert_eq!(reminder.period(), Duration::from_millis(30 * 60_000));
    }

    #[test]
    fn test_from_parts_error_order() {
        assert_eq!(
            Reminder::from_parts("u1", "", "bogus", "x", "bogus"),
            Err(ReminderError::MissingMessage)
        );
        assert_eq!(
            Reminder::from_parts("u1", "hi", "sometimes", "1", "bogus"),
            Err(ReminderError::InvalidType)
        );
        assert_eq!(
            Reminder::from_parts("u1", "hi", "each", "1", "weeks"),
            Err(ReminderError::InvalidUnit)
        );
        assert_eq!(
            Reminder::from_parts("u1", "hi", "each", "0", "days"),
            Err(ReminderError::InvalidTime)
        );
        assert_eq!(
            Reminder::from_parts("u1", "hi", "each", "", "days"),
            Err(ReminderError::InvalidTime)
        );
    }

    #[test]
    fn test_overflowing_interval_rejected() {
        let huge = u64::MAX.to_string();
        assert_eq!(
            Reminder::from_parts("u1", "hi", "every", &huge, "days"),
            Err(ReminderError::InvalidTime)
        );
    }

    #[test]
    fn test_unit_millis() {
        assert_eq!(period_millis(1, TimeUnit::Seconds), Some(1_000));
        assert_eq!(period_millis(2, TimeUnit::Minutes), Some(120_000));
        assert_eq!(period_millis(3, TimeUnit::Hours), Some(10_800_000));
        assert_eq!(period_millis(1, TimeUnit::Days), Some(86_400_000));
        assert_eq!(period_millis(0, TimeUnit::Days), None);
    }

    #[test]
    fn test_serialized_shape() {
        let reminder = Reminder::from_parts("u1", "stretch", "each", "2", "hours").unwrap();
        let value = serde_json::to_value(&reminder).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "author": "u1",
                "message": "stretch",
                "type": "each",
                "time": "2",
                "units": "hours"
            })
        );
    }

    #[test]
    fn test_deserialize_legacy_record() {
        let json = r#"{"author":"u1","message":"hi","type":"every","time":5,"units":"seconds","milliseconds":5000}"#;
        let reminder: Reminder = serde_json::from_str(json).unwrap();
        assert_eq!(reminder.time, 5);
        assert!(reminder.is_schedulable());
    }

    #[test]
    fn test_schedule_text() {
        let reminder = Reminder::from_parts("u1", "hi", "every", "30", "minutes").unwrap();
        assert_eq!(reminder.schedule_text(), "every 30 minutes");
    }
}
