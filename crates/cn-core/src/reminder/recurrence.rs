//! Recurrence calculator.
//!
//! 重复规则计算器：给定基准时间与规则，计算下一次触发时间。
//!
//! All arithmetic is done in UTC; weekly and monthly rules keep the time of
//! day of the base instant.

use std::fmt;

use chrono::{DateTime, Datelike, Duration, NaiveDate, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use super::cron::CronExpr;
use super::error::RecurrenceError;

/// Offset applied when a rule cannot produce its next instant.
pub const CRON_FALLBACK_OFFSET: Duration = Duration::hours(1);

/// Longest interval a rule may describe, in days (about ten years).
pub const MAX_INTERVAL_DAYS: u32 = 3_650;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntervalUnit {
    Minute,
    Hour,
    Day,
}

impl IntervalUnit {
    fn as_str(self) -> &'static str {
        match self {
            IntervalUnit::Minute => "minute",
            IntervalUnit::Hour => "hour",
            IntervalUnit::Day => "day",
        }
    }

    /// Largest amount of this unit that stays within [`MAX_INTERVAL_DAYS`].
    pub fn max_amount(self) -> u32 {
        match self {
            IntervalUnit::Minute => MAX_INTERVAL_DAYS * 24 * 60,
            IntervalUnit::Hour => MAX_INTERVAL_DAYS * 24,
            IntervalUnit::Day => MAX_INTERVAL_DAYS,
        }
    }

    fn duration(self, amount: i64) -> Duration {
        match self {
            IntervalUnit::Minute => Duration::minutes(amount),
            IntervalUnit::Hour => Duration::hours(amount),
            IntervalUnit::Day => Duration::days(amount),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MonthDay {
    Day(u8),
    Last,
}

/// How to compute the next trigger instant from the current one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RecurrenceSpec {
    Interval { amount: u32, unit: IntervalUnit },
    /// 0 = Sunday
    Weekly { day_of_week: u8 },
    Monthly { day: MonthDay },
    Cron { expr: CronExpr },
}

impl RecurrenceSpec {
    pub fn cron(expr: &str) -> Result<Self, RecurrenceError> {
        Ok(RecurrenceSpec::Cron {
            expr: CronExpr::parse(expr)?,
        })
    }

    /// Reject specs that can never produce a sane schedule.
    pub fn validate(&self) -> Result<(), RecurrenceError> {
        match self {
            RecurrenceSpec::Interval { amount: 0, .. } => Err(RecurrenceError::ZeroInterval),
            RecurrenceSpec::Interval { amount, unit } if *amount > unit.max_amount() => {
                Err(RecurrenceError::IntervalTooLong {
                    amount: *amount,
                    unit: unit.as_str(),
                    max: unit.max_amount(),
                })
            }
            RecurrenceSpec::Weekly { day_of_week } if *day_of_week > 6 => {
                Err(RecurrenceError::InvalidWeekday(*day_of_week))
            }
            RecurrenceSpec::Monthly {
                day: MonthDay::Day(day),
            } if !(1..=31).contains(day) => Err(RecurrenceError::InvalidMonthDay(*day)),
            _ => Ok(()),
        }
    }

    /// Next trigger instant strictly after `base`.
    ///
    /// Never panics. A cron rule without a match in its search window fails
    /// with [`RecurrenceError::Exhausted`]; a result past the end of the
    /// calendar fails with [`RecurrenceError::OutOfRange`].
    pub fn next(&self, base: DateTime<Utc>) -> Result<DateTime<Utc>, RecurrenceError> {
        match self {
            RecurrenceSpec::Interval { amount, unit } => {
                // zero is rejected by validate(); clamping keeps next() > base
                let amount = i64::from((*amount).max(1));
                checked_shift(base, unit.duration(amount))
            }
            RecurrenceSpec::Weekly { day_of_week } => {
                let target = u32::from(*day_of_week % 7);
                let current = base.weekday().num_days_from_sunday();
                let ahead = match (target + 7 - current) % 7 {
                    0 => 7,
                    n => n,
                };
                checked_shift(base, Duration::days(i64::from(ahead)))
            }
            RecurrenceSpec::Monthly { day } => next_monthly(base, *day),
            RecurrenceSpec::Cron { expr } => expr.next_after(base),
        }
    }
}

fn checked_shift(base: DateTime<Utc>, by: Duration) -> Result<DateTime<Utc>, RecurrenceError> {
    base.checked_add_signed(by)
        .ok_or(RecurrenceError::OutOfRange { base })
}

fn next_monthly(base: DateTime<Utc>, day: MonthDay) -> Result<DateTime<Utc>, RecurrenceError> {
    let (year, month) = if base.month() == 12 {
        (base.year() + 1, 1)
    } else {
        (base.year(), base.month() + 1)
    };
    let last = days_in_month(year, month);
    let wanted = match day {
        MonthDay::Day(d) => u32::from(d).clamp(1, last),
        MonthDay::Last => last,
    };

    NaiveDate::from_ymd_opt(year, month, wanted)
        .map(|date| Utc.from_utc_datetime(&date.and_time(base.time())))
        .ok_or(RecurrenceError::OutOfRange { base })
}

fn days_in_month(year: i32, month: u32) -> u32 {
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .and_then(|first| first.pred_opt())
        .map(|last| last.day())
        .unwrap_or(28)
}

/// Outcome of [`next_trigger`]: the instant to store plus the reason when the
/// degraded fallback was used.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NextTrigger {
    pub at: DateTime<Utc>,
    pub degraded: Option<RecurrenceError>,
}

/// Compute the next trigger, substituting `base + 1h` when the rule cannot
/// produce one. At the very end of the calendar `base` itself is returned,
/// still marked degraded.
pub fn next_trigger(base: DateTime<Utc>, spec: &RecurrenceSpec) -> NextTrigger {
    match spec.next(base) {
        Ok(at) => NextTrigger { at, degraded: None },
        Err(err) => {
            #[cfg(feature = "tracing")]
            tracing::warn!(%base, recurrence = %spec, error = %err, "recurrence failed, using fallback offset");
            NextTrigger {
                at: base.checked_add_signed(CRON_FALLBACK_OFFSET).unwrap_or(base),
                degraded: Some(err),
            }
        }
    }
}

const WEEKDAY_NAMES: [&str; 7] = [
    "Sunday",
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
];

impl fmt::Display for RecurrenceSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecurrenceSpec::Interval { amount, unit } => {
                let unit = unit.as_str();
                if *amount == 1 {
                    write!(f, "every {unit}")
                } else {
                    write!(f, "every {amount} {unit}s")
                }
            }
            RecurrenceSpec::Weekly { day_of_week } => {
                let name = WEEKDAY_NAMES[usize::from(*day_of_week % 7)];
                write!(f, "every {name}")
            }
            RecurrenceSpec::Monthly {
                day: MonthDay::Day(d),
            } => write!(f, "monthly on day {d}"),
            RecurrenceSpec::Monthly {
                day: MonthDay::Last,
            } => write!(f, "monthly on the last day"),
            RecurrenceSpec::Cron { expr } => write!(f, "cron `{expr}`"),
        }
    }
}
