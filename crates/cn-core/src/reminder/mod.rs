//! Reminder domain: tasks, recurrence rules and the cron evaluator.
//!
//! 提醒领域：任务、重复规则与 cron 表达式求值。

pub mod cron;
mod error;
mod recurrence;
mod task;

pub use cron::{CronExpr, CronField, CronFieldKind, CRON_SEARCH_LIMIT_MINUTES};
pub use error::RecurrenceError;
pub use recurrence::{
    next_trigger, IntervalUnit, MonthDay, NextTrigger, RecurrenceSpec, CRON_FALLBACK_OFFSET,
};
pub use task::{NewTask, Priority, ReminderTask, TaskEdit, TaskValidationError};
