use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::recurrence::RecurrenceSpec;
use super::error::RecurrenceError;
use crate::clipboard::truncate_chars;
use crate::ids::TaskId;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Low,
    #[default]
    Normal,
    High,
}

/// A reminder (or pinned snippet) scheduled for a desktop notification.
///
/// 提醒任务。`trigger_at` 与 `notified` 只能由到期扫描器或用户编辑修改。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReminderTask {
    pub id: TaskId,
    pub content: String,
    pub title: Option<String>,
    pub trigger_at: DateTime<Utc>,
    /// `None` means one-shot.
    pub recurrence: Option<RecurrenceSpec>,
    pub notified: bool,
    pub completed: bool,
    pub snoozed_until: Option<DateTime<Utc>>,
    #[serde(default)]
    pub priority: Priority,
    pub category: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ReminderTask {
    pub fn is_recurring(&self) -> bool {
        self.recurrence.is_some()
    }

    /// Whether the scanner should fire this task at `now`.
    pub fn is_due(&self, now: DateTime<Utc>) -> bool {
        !self.completed
            && !self.notified
            && self.trigger_at <= now
            && self.snoozed_until.map_or(true, |until| until <= now)
    }

    /// Whether `other` still carries the schedule this task was read with.
    /// Content edits don't count; trigger, recurrence, snooze and state do.
    pub fn same_schedule(&self, other: &ReminderTask) -> bool {
        self.trigger_at == other.trigger_at
            && self.recurrence == other.recurrence
            && self.snoozed_until == other.snoozed_until
            && self.notified == other.notified
            && self.completed == other.completed
    }

    /// Title for notifications; falls back to the first line of the content.
    pub fn display_title(&self) -> String {
        match self.title.as_deref().map(str::trim) {
            Some(title) if !title.is_empty() => title.to_string(),
            _ => {
                let first_line = self.content.lines().next().unwrap_or_default();
                truncate_chars(first_line.trim(), 40)
            }
        }
    }

    /// Apply a user edit. Touching the schedule re-arms the task.
    pub fn apply_edit(&mut self, edit: TaskEdit, now: DateTime<Utc>) {
        let reschedules = edit.trigger_at.is_some() || edit.recurrence.is_some();

        if let Some(content) = edit.content {
            self.content = content;
        }
        if let Some(title) = edit.title {
            self.title = title;
        }
        if let Some(trigger_at) = edit.trigger_at {
            self.trigger_at = trigger_at;
        }
        if let Some(recurrence) = edit.recurrence {
            self.recurrence = recurrence;
        }
        if let Some(priority) = edit.priority {
            self.priority = priority;
        }
        if let Some(category) = edit.category {
            self.category = category;
        }
        if reschedules {
            self.notified = false;
            self.snoozed_until = None;
        }
        self.updated_at = now;
    }
}

/// Input for creating a task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewTask {
    pub content: String,
    #[serde(default)]
    pub title: Option<String>,
    pub trigger_at: DateTime<Utc>,
    #[serde(default)]
    pub recurrence: Option<RecurrenceSpec>,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub category: Option<String>,
}

impl NewTask {
    pub fn validate(&self) -> Result<(), TaskValidationError> {
        if self.content.trim().is_empty() {
            return Err(TaskValidationError::EmptyContent);
        }
        if let Some(recurrence) = &self.recurrence {
            recurrence.validate()?;
        }
        Ok(())
    }

    pub fn into_task(self, now: DateTime<Utc>) -> ReminderTask {
        ReminderTask {
            id: TaskId::new(),
            content: self.content,
            title: self.title,
            trigger_at: self.trigger_at,
            recurrence: self.recurrence,
            notified: false,
            completed: false,
            snoozed_until: None,
            priority: self.priority,
            category: self.category,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Partial update. Outer `None` leaves a field untouched; for optional fields
/// `Some(None)` clears it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TaskEdit {
    pub content: Option<String>,
    pub title: Option<Option<String>>,
    pub trigger_at: Option<DateTime<Utc>>,
    pub recurrence: Option<Option<RecurrenceSpec>>,
    pub priority: Option<Priority>,
    pub category: Option<Option<String>>,
}

impl TaskEdit {
    pub fn validate(&self) -> Result<(), TaskValidationError> {
        if let Some(content) = &self.content {
            if content.trim().is_empty() {
                return Err(TaskValidationError::EmptyContent);
            }
        }
        if let Some(Some(recurrence)) = &self.recurrence {
            recurrence.validate()?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TaskValidationError {
    #[error("task content must not be empty")]
    EmptyContent,

    #[error("invalid recurrence: {0}")]
    Recurrence(#[from] RecurrenceError),

    #[error("snooze target {0} is not in the future")]
    SnoozeInPast(DateTime<Utc>),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reminder::IntervalUnit;
    use chrono::Duration;

    fn at(s: &str) -> DateTime<Utc> {
        DateTime::parse_from_rfc3339(s).unwrap().with_timezone(&Utc)
    }

    fn task(trigger: &str) -> ReminderTask {
        NewTask {
            content: "water the plants\nand the cactus".into(),
            title: None,
            trigger_at: at(trigger),
            recurrence: None,
            priority: Priority::Normal,
            category: None,
        }
        .into_task(at("2024-01-01T00:00:00Z"))
    }

    #[test]
    fn due_respects_flags_and_snooze() {
        let now = at("2024-03-01T10:00:00Z");
        let mut t = task("2024-03-01T09:00:00Z");
        assert!(t.is_due(now));

        t.snoozed_until = Some(now + Duration::minutes(5));
        assert!(!t.is_due(now));
        t.snoozed_until = Some(now);
        assert!(t.is_due(now));

        t.notified = true;
        assert!(!t.is_due(now));
        t.notified = false;
        t.completed = true;
        assert!(!t.is_due(now));
    }

    #[test]
    fn future_trigger_is_not_due() {
        let t = task("2024-03-01T11:00:00Z");
        assert!(!t.is_due(at("2024-03-01T10:59:59Z")));
    }

    #[test]
    fn editing_schedule_resets_notified() {
        let mut t = task("2024-03-01T09:00:00Z");
        t.notified = true;

        t.apply_edit(
            TaskEdit {
                content: Some("renamed".into()),
                ..Default::default()
            },
            at("2024-03-02T00:00:00Z"),
        );
        assert!(t.notified, "content edit leaves notified alone");

        t.apply_edit(
            TaskEdit {
                recurrence: Some(Some(RecurrenceSpec::Interval {
                    amount: 1,
                    unit: IntervalUnit::Day,
                })),
                ..Default::default()
            },
            at("2024-03-02T00:00:00Z"),
        );
        assert!(!t.notified);
        assert!(t.is_recurring());
    }

    #[test]
    fn display_title_falls_back_to_first_line() {
        let mut t = task("2024-03-01T09:00:00Z");
        assert_eq!(t.display_title(), "water the plants");
        t.title = Some("  Plants ".into());
        assert_eq!(t.display_title(), "Plants");
    }

    #[test]
    fn validation_rejects_bad_recurrence() {
        let mut new = NewTask {
            content: "x".into(),
            title: None,
            trigger_at: at("2024-03-01T09:00:00Z"),
            recurrence: Some(RecurrenceSpec::Weekly { day_of_week: 9 }),
            priority: Priority::High,
            category: None,
        };
        assert_eq!(
            new.validate(),
            Err(TaskValidationError::Recurrence(RecurrenceError::InvalidWeekday(9)))
        );
        new.recurrence = None;
        new.content = "   ".into();
        assert_eq!(new.validate(), Err(TaskValidationError::EmptyContent));
    }
}
