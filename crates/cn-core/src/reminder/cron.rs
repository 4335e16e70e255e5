//! Five-field cron expression evaluator.
//!
//! Supported per-field grammar: `*`, `n`, `a-b`, lists `a,b,c`, and steps
//! `*/n`, `a-b/n` (and `a/n`, shorthand for `a-max/n`). Day-of-month and
//! day-of-week are combined with AND.
//!
//! Evaluation is a bounded minute-by-minute search. Days and hours that
//! cannot match are skipped whole, which keeps the worst case well below
//! the [`CRON_SEARCH_LIMIT_MINUTES`] cap.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Datelike, Duration, TimeZone, Timelike, Utc};
use serde::{Deserialize, Serialize};

use super::error::RecurrenceError;

/// Upper bound of the forward search: one (leap) year of minutes.
pub const CRON_SEARCH_LIMIT_MINUTES: u32 = 366 * 24 * 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CronFieldKind {
    Minute,
    Hour,
    DayOfMonth,
    Month,
    DayOfWeek,
}

impl CronFieldKind {
    const ALL: [CronFieldKind; 5] = [
        CronFieldKind::Minute,
        CronFieldKind::Hour,
        CronFieldKind::DayOfMonth,
        CronFieldKind::Month,
        CronFieldKind::DayOfWeek,
    ];

    /// Inclusive accepted range. Day-of-week accepts 7 as Sunday.
    fn bounds(self) -> (u32, u32) {
        match self {
            CronFieldKind::Minute => (0, 59),
            CronFieldKind::Hour => (0, 23),
            CronFieldKind::DayOfMonth => (1, 31),
            CronFieldKind::Month => (1, 12),
            CronFieldKind::DayOfWeek => (0, 7),
        }
    }

    /// Range that `*` expands to.
    fn wildcard_bounds(self) -> (u32, u32) {
        match self {
            CronFieldKind::DayOfWeek => (0, 6),
            other => other.bounds(),
        }
    }
}

impl fmt::Display for CronFieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CronFieldKind::Minute => "minute",
            CronFieldKind::Hour => "hour",
            CronFieldKind::DayOfMonth => "day-of-month",
            CronFieldKind::Month => "month",
            CronFieldKind::DayOfWeek => "day-of-week",
        };
        f.write_str(name)
    }
}

/// One parsed cron field: its source pattern and the set of matching values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CronField {
    pattern: String,
    mask: u64,
}

impl CronField {
    pub fn parse(kind: CronFieldKind, pattern: &str) -> Result<Self, RecurrenceError> {
        let invalid = |reason: &str| RecurrenceError::InvalidField {
            field: kind,
            pattern: pattern.to_string(),
            reason: reason.to_string(),
        };

        let mut mask = 0u64;
        for part in pattern.split(',') {
            let (range, step) = match part.split_once('/') {
                Some((range, step)) => {
                    let step: u32 = step.parse().map_err(|_| invalid("step is not a number"))?;
                    if step == 0 {
                        return Err(invalid("step must be at least 1"));
                    }
                    (range, Some(step))
                }
                None => (part, None),
            };

            let (min, max) = kind.bounds();
            let (start, end) = if range == "*" {
                kind.wildcard_bounds()
            } else if let Some((a, b)) = range.split_once('-') {
                let a = parse_value(a).ok_or_else(|| invalid("range start is not a number"))?;
                let b = parse_value(b).ok_or_else(|| invalid("range end is not a number"))?;
                if a > b {
                    return Err(invalid("range start exceeds range end"));
                }
                (a, b)
            } else {
                let value = parse_value(range).ok_or_else(|| invalid("value is not a number"))?;
                match step {
                    Some(_) => (value, kind.wildcard_bounds().1.max(value)),
                    None => (value, value),
                }
            };

            if start < min || end > max {
                return Err(invalid("value out of range"));
            }

            let step = step.unwrap_or(1) as usize;
            for value in (start..=end).step_by(step) {
                let value = if kind == CronFieldKind::DayOfWeek && value == 7 {
                    0
                } else {
                    value
                };
                mask |= 1u64 << value;
            }
        }

        Ok(Self {
            pattern: pattern.to_string(),
            mask,
        })
    }

    pub fn matches(&self, value: u32) -> bool {
        value < 64 && self.mask & (1u64 << value) != 0
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }
}

fn parse_value(s: &str) -> Option<u32> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

/// A parsed five-field cron expression (`minute hour dom month dow`).
///
/// Serialized as its source text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CronExpr {
    pub minute: CronField,
    pub hour: CronField,
    pub day_of_month: CronField,
    pub month: CronField,
    pub day_of_week: CronField,
}

impl CronExpr {
    pub fn parse(expr: &str) -> Result<Self, RecurrenceError> {
        let parts: Vec<&str> = expr.split_whitespace().collect();
        if parts.len() != 5 {
            return Err(RecurrenceError::FieldCount { found: parts.len() });
        }

        let fields = CronFieldKind::ALL
            .iter()
            .zip(&parts)
            .map(|(kind, pattern)| CronField::parse(*kind, pattern))
            .collect::<Result<Vec<_>, _>>()?;

        let [minute, hour, day_of_month, month, day_of_week]: [CronField; 5] = fields
            .try_into()
            .map_err(|_| RecurrenceError::FieldCount { found: parts.len() })?;

        Ok(Self {
            minute,
            hour,
            day_of_month,
            month,
            day_of_week,
        })
    }

    pub fn matches(&self, at: &DateTime<Utc>) -> bool {
        self.matches_day(at) && self.hour.matches(at.hour()) && self.minute.matches(at.minute())
    }

    fn matches_day(&self, at: &DateTime<Utc>) -> bool {
        self.month.matches(at.month())
            && self.day_of_month.matches(at.day())
            && self.day_of_week.matches(at.weekday().num_days_from_sunday())
    }

    /// Earliest whole minute strictly after `base` at which every field
    /// matches, searching at most [`CRON_SEARCH_LIMIT_MINUTES`] ahead.
    pub fn next_after(&self, base: DateTime<Utc>) -> Result<DateTime<Utc>, RecurrenceError> {
        let start = truncate_to_minute(base)
            .checked_add_signed(Duration::minutes(1))
            .ok_or(RecurrenceError::OutOfRange { base })?;
        let limit = start
            .checked_add_signed(Duration::minutes(i64::from(CRON_SEARCH_LIMIT_MINUTES)))
            .unwrap_or(DateTime::<Utc>::MAX_UTC);

        let mut candidate = start;
        while candidate < limit {
            let step = if !self.matches_day(&candidate) {
                start_of_next_day(candidate)
            } else if !self.hour.matches(candidate.hour()) {
                start_of_next_hour(candidate)
            } else if self.minute.matches(candidate.minute()) {
                return Ok(candidate);
            } else {
                candidate.checked_add_signed(Duration::minutes(1))
            };
            match step {
                Some(next) => candidate = next,
                None => return Err(RecurrenceError::OutOfRange { base }),
            }
        }

        Err(RecurrenceError::Exhausted {
            base,
            minutes: CRON_SEARCH_LIMIT_MINUTES,
        })
    }
}

fn truncate_to_minute(at: DateTime<Utc>) -> DateTime<Utc> {
    at.with_second(0)
        .and_then(|t| t.with_nanosecond(0))
        .unwrap_or(at)
}

fn start_of_next_day(at: DateTime<Utc>) -> Option<DateTime<Utc>> {
    let next = at.date_naive().succ_opt()?;
    next.and_hms_opt(0, 0, 0)
        .map(|naive| Utc.from_utc_datetime(&naive))
}

fn start_of_next_hour(at: DateTime<Utc>) -> Option<DateTime<Utc>> {
    (truncate_to_minute(at) - Duration::minutes(i64::from(at.minute())))
        .checked_add_signed(Duration::hours(1))
}

impl FromStr for CronExpr {
    type Err = RecurrenceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for CronExpr {
    type Error = RecurrenceError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<CronExpr> for String {
    fn from(expr: CronExpr) -> Self {
        expr.to_string()
    }
}

impl fmt::Display for CronExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {} {}",
            self.minute.pattern(),
            self.hour.pattern(),
            self.day_of_month.pattern(),
            self.month.pattern(),
            self.day_of_week.pattern()
        )
    }
}
