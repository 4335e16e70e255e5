use chrono::{DateTime, Utc};

use super::cron::CronFieldKind;

/// Errors produced while validating or evaluating a recurrence.
///
/// 重复规则校验或计算过程中产生的错误。
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RecurrenceError {
    #[error("cron expression must have 5 fields, got {found}")]
    FieldCount { found: usize },

    #[error("invalid {field} field `{pattern}`: {reason}")]
    InvalidField {
        field: CronFieldKind,
        pattern: String,
        reason: String,
    },

    #[error("interval amount must be at least 1")]
    ZeroInterval,

    #[error("interval of {amount} {unit} exceeds the maximum of {max}")]
    IntervalTooLong {
        amount: u32,
        unit: &'static str,
        max: u32,
    },

    #[error("day of week must be within 0..=6, got {0}")]
    InvalidWeekday(u8),

    #[error("day of month must be within 1..=31, got {0}")]
    InvalidMonthDay(u8),

    #[error("no cron match within {minutes} minutes after {base}")]
    Exhausted { base: DateTime<Utc>, minutes: u32 },

    #[error("next occurrence after {base} is outside the supported date range")]
    OutOfRange { base: DateTime<Utc> },
}
