//! Due-task scanner.
//!
//! 到期任务扫描：发送通知，然后推进重复任务或标记一次性任务已通知。
//!
//! Per task the order is notify first, then write the store. A crash between
//! the two re-fires the task on the next tick, so delivery is at-least-once.
//! The write only lands if the task still has the schedule it was read with,
//! so an edit made while the notification was in flight wins.

use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use tracing::{debug, info, info_span, warn, Instrument};

use cn_core::clipboard::truncate_chars;
use cn_core::ports::{
    AppEvent, AppEventEmitterPort, ClockPort, NotificationPort, TaskNotification,
    TaskRepositoryPort,
};
use cn_core::reminder::{next_trigger, RecurrenceSpec, ReminderTask};

/// Upper bound on recurrence steps taken to skip occurrences missed while
/// the process was not running.
const MAX_CATCH_UP_STEPS: usize = 10_000;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanReport {
    pub notified: usize,
    pub rescheduled: usize,
    pub failed: usize,
}

pub struct ScanDueTasks {
    task_repo: Arc<dyn TaskRepositoryPort>,
    notifier: Arc<dyn NotificationPort>,
    emitter: Arc<dyn AppEventEmitterPort>,
    clock: Arc<dyn ClockPort>,
    body_len: usize,
}

impl ScanDueTasks {
    pub fn new(
        task_repo: Arc<dyn TaskRepositoryPort>,
        notifier: Arc<dyn NotificationPort>,
        emitter: Arc<dyn AppEventEmitterPort>,
        clock: Arc<dyn ClockPort>,
        body_len: usize,
    ) -> Self {
        Self {
            task_repo,
            notifier,
            emitter,
            clock,
            body_len,
        }
    }

    pub async fn execute(&self) -> Result<ScanReport> {
        let span = info_span!("usecase.scan_due_tasks.execute");

        async {
            let now = self.clock.now();
            let mut due = self
                .task_repo
                .list_due_tasks(now)
                .await
                .context("list due tasks")?;
            due.sort_by_key(|task| task.trigger_at);

            let mut report = ScanReport::default();
            if due.is_empty() {
                debug!("No due tasks");
                return Ok(report);
            }

            for task in &due {
                match self.fire(task, now).await {
                    Ok(rescheduled) => {
                        report.notified += 1;
                        if rescheduled {
                            report.rescheduled += 1;
                        }
                    }
                    Err(err) => {
                        report.failed += 1;
                        warn!(task_id = %task.id, error = ?err, "Failed to fire task");
                    }
                }
            }

            info!(
                notified = report.notified,
                rescheduled = report.rescheduled,
                failed = report.failed,
                "Due-task scan finished"
            );
            Ok(report)
        }
        .instrument(span)
        .await
    }

    /// Notify, then advance or retire the task. Returns whether it was
    /// rescheduled.
    async fn fire(&self, task: &ReminderTask, now: DateTime<Utc>) -> Result<bool> {
        let notification = TaskNotification {
            task_id: task.id.clone(),
            title: task.display_title(),
            body: truncate_chars(&task.content, self.body_len),
        };
        let title = notification.title.clone();
        // a failed notify leaves the task untouched so the next tick retries
        self.notifier
            .notify(notification)
            .await
            .context("send notification")?;
        // desktop notifications can't report clicks, the popup lists the
        // reminder instead and activates it from there
        if let Err(err) = self.emitter.emit(AppEvent::TaskNotified {
            task_id: task.id.clone(),
            title,
        }) {
            warn!(task_id = %task.id, error = ?err, "Failed to emit task-notified");
        }

        let (trigger_at, notified) = match &task.recurrence {
            Some(spec) => (advance_past(task.trigger_at, spec, now), false),
            None => (task.trigger_at, true),
        };
        let applied = self
            .task_repo
            .update_task_trigger(task, trigger_at, notified)
            .await
            .context("record fired task")?;
        if !applied {
            info!(task_id = %task.id, "Task changed while firing, keeping the edit");
            return Ok(false);
        }

        if task.is_recurring() {
            debug!(task_id = %task.id, next = %trigger_at, "Recurring task advanced");
        }
        Ok(task.is_recurring())
    }
}

/// Next trigger strictly after `trigger_at`, skipping occurrences that are
/// already in the past at `now`.
fn advance_past(trigger_at: DateTime<Utc>, spec: &RecurrenceSpec, now: DateTime<Utc>) -> DateTime<Utc> {
    let mut next = next_trigger(trigger_at, spec);
    let mut steps = 1;
    while next.at <= now && next.degraded.is_none() && steps < MAX_CATCH_UP_STEPS {
        next = next_trigger(next.at, spec);
        steps += 1;
    }
    next.at
}

#[cfg(test)]
mod tests {
    use super::*;
    use cn_core::reminder::IntervalUnit;

    fn at(s: &str) -> DateTime<Utc> {
        DateTime::parse_from_rfc3339(s).unwrap().with_timezone(&Utc)
    }

    #[test]
    fn advance_skips_missed_occurrences() {
        let spec = RecurrenceSpec::Interval {
            amount: 1,
            unit: IntervalUnit::Hour,
        };
        let next = advance_past(at("2024-01-01T00:00:00Z"), &spec, at("2024-01-01T05:30:00Z"));
        assert_eq!(next, at("2024-01-01T06:00:00Z"));
    }

    #[test]
    fn advance_always_moves_forward() {
        let spec = RecurrenceSpec::Interval {
            amount: 10,
            unit: IntervalUnit::Minute,
        };
        let trigger = at("2024-01-01T12:00:00Z");
        let next = advance_past(trigger, &spec, trigger);
        assert_eq!(next, at("2024-01-01T12:10:00Z"));
    }
}
