//! Pet-care task entity.
//!
//! A task carries everything the planner needs: how long it takes, how
//! important it is, when it is due during the day and how it recurs.
//!
//! Status follows a simple forward lifecycle:
//!
//!   PENDING ─────> IN_PROGRESS ─────> COMPLETED
//!      ^                                  |
//!      +──────── (recurring tasks) ───────+
//!
//! Completing a recurring task stamps `last_completed_date` and drops the
//! task straight back to `Pending`; eligibility for a later day is then
//! decided by [`Task::is_due`] from the completion date, not from status.

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;
use crate::timing::{self, validate_minute_of_day};

/// Task status.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    /// Not started yet (initial state)
    Pending,
    /// Currently being worked on
    InProgress,
    /// Finished. Only one-off tasks stay here.
    Completed,
}

impl TaskStatus {
    /// Wire name used in files and on the command line.
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Pending => "pending",
            TaskStatus::InProgress => "in_progress",
            TaskStatus::Completed => "completed",
        }
    }
}

impl Default for TaskStatus {
    fn default() -> Self {
        TaskStatus::Pending
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pending" => Ok(TaskStatus::Pending),
            "in_progress" | "in-progress" => Ok(TaskStatus::InProgress),
            "completed" => Ok(TaskStatus::Completed),
            other => Err(ValidationError::InvalidValue {
                field: "status".to_string(),
                message: format!("unknown status '{other}'"),
            }),
        }
    }
}

/// Recurrence rule governing how a completed task becomes due again.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Recurrence {
    /// One-off task
    None,
    /// Due again the day after completion
    Daily,
    /// Due again seven days after completion
    Weekly,
}

impl Recurrence {
    /// Days between a completion and the next occurrence.
    pub fn interval(&self) -> Option<Duration> {
        match self {
            Recurrence::None => None,
            Recurrence::Daily => Some(Duration::days(1)),
            Recurrence::Weekly => Some(Duration::days(7)),
        }
    }

    /// Wire name used in files and on the command line.
    pub fn as_str(&self) -> &'static str {
        match self {
            Recurrence::None => "none",
            Recurrence::Daily => "daily",
            Recurrence::Weekly => "weekly",
        }
    }
}

impl Default for Recurrence {
    fn default() -> Self {
        Recurrence::None
    }
}

impl fmt::Display for Recurrence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Recurrence {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "none" => Ok(Recurrence::None),
            "daily" => Ok(Recurrence::Daily),
            "weekly" => Ok(Recurrence::Weekly),
            other => Err(ValidationError::InvalidValue {
                field: "recurrence".to_string(),
                message: format!("unknown recurrence '{other}'"),
            }),
        }
    }
}

/// A single care task owned by a pet.
///
/// Fields are private so that the duration/priority/due-time invariants can
/// only be changed through validating setters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Task {
    name: String,
    description: String,
    /// Minutes, always > 0
    duration: u32,
    /// Higher is more important
    priority: u32,
    status: TaskStatus,
    /// Minutes after midnight, `None` when unscheduled
    due_time: Option<u16>,
    recurrence: Recurrence,
    last_completed_date: Option<NaiveDate>,
    /// Informational; eligibility never reads it
    next_due_date: Option<NaiveDate>,
}

fn checked_duration(duration: i64) -> Result<u32, ValidationError> {
    if duration <= 0 {
        return Err(ValidationError::NonPositiveDuration(duration));
    }
    u32::try_from(duration).map_err(|_| ValidationError::InvalidValue {
        field: "duration".to_string(),
        message: format!("{duration} minutes is too large"),
    })
}

fn checked_priority(priority: i64) -> Result<u32, ValidationError> {
    if priority < 0 {
        return Err(ValidationError::NegativePriority(priority));
    }
    u32::try_from(priority).map_err(|_| ValidationError::InvalidValue {
        field: "priority".to_string(),
        message: format!("{priority} is too large"),
    })
}

impl Task {
    /// Create an unscheduled, non-recurring task.
    ///
    /// # Errors
    /// Returns a [`ValidationError`] if `duration <= 0` or `priority < 0`.
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        duration: i64,
        priority: i64,
        status: TaskStatus,
    ) -> Result<Self, ValidationError> {
        Ok(Task {
            name: name.into(),
            description: description.into(),
            duration: checked_duration(duration)?,
            priority: checked_priority(priority)?,
            status,
            due_time: None,
            recurrence: Recurrence::None,
            last_completed_date: None,
            next_due_date: None,
        })
    }

    /// Set the due time (minutes after midnight).
    pub fn with_due_time(mut self, minute: u16) -> Result<Self, ValidationError> {
        self.set_due_time(Some(minute))?;
        Ok(self)
    }

    /// Set the recurrence rule.
    pub fn with_recurrence(mut self, recurrence: Recurrence) -> Self {
        self.recurrence = recurrence;
        self
    }

    /// Seed the completion history.
    pub fn with_last_completed(mut self, date: NaiveDate) -> Self {
        self.last_completed_date = Some(date);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// Duration in minutes.
    pub fn duration(&self) -> u32 {
        self.duration
    }

    pub fn priority(&self) -> u32 {
        self.priority
    }

    pub fn status(&self) -> TaskStatus {
        self.status
    }

    /// Due time in minutes after midnight.
    pub fn due_time(&self) -> Option<u16> {
        self.due_time
    }

    pub fn recurrence(&self) -> Recurrence {
        self.recurrence
    }

    pub fn last_completed_date(&self) -> Option<NaiveDate> {
        self.last_completed_date
    }

    pub fn next_due_date(&self) -> Option<NaiveDate> {
        self.next_due_date
    }

    pub fn is_recurring(&self) -> bool {
        self.recurrence != Recurrence::None
    }

    /// Due time rendered as `HH:MM`, or `unscheduled`.
    pub fn due_label(&self) -> String {
        timing::format_due_time(self.due_time)
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = description.into();
    }

    /// Change or clear the due time.
    ///
    /// # Errors
    /// Returns [`ValidationError::DueTimeOutOfRange`] for minutes past 23:59;
    /// the task keeps its previous due time.
    pub fn set_due_time(&mut self, due_time: Option<u16>) -> Result<(), ValidationError> {
        if let Some(minute) = due_time {
            validate_minute_of_day(minute)?;
        }
        self.due_time = due_time;
        Ok(())
    }

    pub fn set_recurrence(&mut self, recurrence: Recurrence) {
        self.recurrence = recurrence;
    }

    /// Mark the task as being worked on.
    pub fn mark_in_progress(&mut self) {
        self.status = TaskStatus::InProgress;
    }

    /// Mark the task as completed on `on_date` (default: today).
    ///
    /// Recurring tasks record the completion, compute `next_due_date` and
    /// go back to `Pending`.
    pub fn mark_completed(&mut self, on_date: Option<NaiveDate>) {
        let completed_on = on_date.unwrap_or_else(timing::today);
        self.status = TaskStatus::Completed;
        self.last_completed_date = Some(completed_on);

        if let Some(interval) = self.recurrence.interval() {
            // None when the next occurrence would fall past the calendar's end.
            self.next_due_date = completed_on.checked_add_signed(interval);
            self.status = TaskStatus::Pending;
        }

        tracing::debug!(
            task = %self.name,
            recurrence = %self.recurrence,
            completed_on = %completed_on,
            "task completed"
        );
    }

    /// Replace the duration.
    ///
    /// # Errors
    /// Returns [`ValidationError::NonPositiveDuration`] if `duration <= 0`;
    /// the previous duration is kept.
    pub fn update_task_duration(&mut self, duration: i64) -> Result<(), ValidationError> {
        self.duration = checked_duration(duration)?;
        Ok(())
    }

    /// Replace the priority.
    ///
    /// # Errors
    /// Returns [`ValidationError::NegativePriority`] if `priority < 0`;
    /// the previous priority is kept.
    pub fn update_task_priority(&mut self, priority: i64) -> Result<(), ValidationError> {
        self.priority = checked_priority(priority)?;
        Ok(())
    }

    /// Whether the task should be planned on `on_date`.
    pub fn is_due(&self, on_date: NaiveDate) -> bool {
        let interval = match self.recurrence.interval() {
            Some(interval) => interval,
            None => return self.status != TaskStatus::Completed,
        };

        match self.last_completed_date {
            None => true,
            Some(last) => last
                .checked_add_signed(interval)
                .is_some_and(|next| on_date >= next),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn pending(name: &str) -> Task {
        Task::new(name, "", 10, 1, TaskStatus::Pending).unwrap()
    }

    #[test]
    fn status_default() {
        assert_eq!(TaskStatus::default(), TaskStatus::Pending);
        assert_eq!(Recurrence::default(), Recurrence::None);
    }

    #[test]
    fn task_creation() {
        let task = Task::new("Morning walk", "Quick walk", 15, 1, TaskStatus::Pending).unwrap();
        assert_eq!(task.name(), "Morning walk");
        assert_eq!(task.description(), "Quick walk");
        assert_eq!(task.duration(), 15);
        assert_eq!(task.priority(), 1);
        assert_eq!(task.status(), TaskStatus::Pending);
        assert!(task.due_time().is_none());
        assert_eq!(task.recurrence(), Recurrence::None);
        assert!(task.last_completed_date().is_none());
        assert!(task.next_due_date().is_none());
    }

    #[test]
    fn task_creation_rejects_invalid_values() {
        assert_eq!(
            Task::new("Walk", "", 0, 1, TaskStatus::Pending).unwrap_err(),
            ValidationError::NonPositiveDuration(0)
        );
        assert_eq!(
            Task::new("Walk", "", 10, -1, TaskStatus::Pending).unwrap_err(),
            ValidationError::NegativePriority(-1)
        );
    }

    #[test]
    fn mark_in_progress_sets_status() {
        let mut task = pending("Brush");
        task.mark_in_progress();
        assert_eq!(task.status(), TaskStatus::InProgress);
    }

    #[test]
    fn mark_completed_one_off() {
        let mut task = pending("Morning walk");
        task.mark_completed(Some(date(2026, 10, 19)));

        assert_eq!(task.status(), TaskStatus::Completed);
        assert_eq!(task.last_completed_date(), Some(date(2026, 10, 19)));
        assert!(task.next_due_date().is_none());
    }

    #[test]
    fn mark_completed_defaults_to_today() {
        let mut task = pending("Morning walk");
        task.mark_completed(None);
        assert_eq!(task.last_completed_date(), Some(timing::today()));
    }

    #[test]
    fn mark_completed_daily_returns_to_pending() {
        let mut task = pending("Medication").with_recurrence(Recurrence::Daily);
        task.mark_in_progress();
        task.mark_completed(Some(date(2026, 10, 19)));

        assert_eq!(task.status(), TaskStatus::Pending);
        assert_eq!(task.last_completed_date(), Some(date(2026, 10, 19)));
        assert_eq!(task.next_due_date(), Some(date(2026, 10, 20)));
    }

    #[test]
    fn mark_completed_weekly_returns_to_pending() {
        let mut task = pending("Grooming").with_recurrence(Recurrence::Weekly);
        task.mark_completed(Some(date(2026, 10, 29)));

        assert_eq!(task.status(), TaskStatus::Pending);
        assert_eq!(task.next_due_date(), Some(date(2026, 11, 5)));
    }

    #[test]
    fn completion_at_end_of_calendar() {
        let mut task = pending("Grooming").with_recurrence(Recurrence::Weekly);
        task.mark_completed(Some(NaiveDate::MAX));

        assert_eq!(task.status(), TaskStatus::Pending);
        assert_eq!(task.last_completed_date(), Some(NaiveDate::MAX));
        assert_eq!(task.next_due_date(), None);
        assert!(!task.is_due(NaiveDate::MAX));

        let daily = pending("Walk")
            .with_recurrence(Recurrence::Daily)
            .with_last_completed(NaiveDate::MAX);
        assert!(!daily.is_due(NaiveDate::MAX));
    }

    #[test]
    fn recurrence_and_description_can_change() {
        let mut task = pending("Brush");
        assert!(!task.is_recurring());

        task.set_recurrence(Recurrence::Weekly);
        task.set_description("Brush teeth");
        assert!(task.is_recurring());
        assert_eq!(task.description(), "Brush teeth");

        task.set_recurrence(Recurrence::None);
        assert!(!task.is_recurring());
    }

    #[test]
    fn update_duration_validates() {
        let mut task = pending("Groom");
        task.update_task_duration(25).unwrap();
        assert_eq!(task.duration(), 25);

        for bad in [0, -5] {
            assert_eq!(
                task.update_task_duration(bad),
                Err(ValidationError::NonPositiveDuration(bad))
            );
            assert_eq!(task.duration(), 25);
        }
    }

    #[test]
    fn update_priority_validates() {
        let mut task = pending("Bath");
        task.update_task_priority(4).unwrap();
        assert_eq!(task.priority(), 4);
        task.update_task_priority(0).unwrap();
        assert_eq!(task.priority(), 0);

        assert_eq!(
            task.update_task_priority(-1),
            Err(ValidationError::NegativePriority(-1))
        );
        assert_eq!(task.priority(), 0);
    }

    #[test]
    fn due_time_validation() {
        let mut task = pending("Dinner").with_due_time(1080).unwrap();
        assert_eq!(task.due_time(), Some(1080));
        assert_eq!(task.due_label(), "18:00");

        assert!(task.set_due_time(Some(1440)).is_err());
        assert_eq!(task.due_time(), Some(1080));

        task.set_due_time(None).unwrap();
        assert_eq!(task.due_label(), "unscheduled");
    }

    #[test]
    fn is_due_one_off() {
        let today = date(2026, 10, 19);
        let mut task = pending("Vet visit");
        assert!(task.is_due(today));

        task.mark_in_progress();
        assert!(task.is_due(today));

        task.mark_completed(Some(today));
        assert!(!task.is_due(today));
        assert!(!task.is_due(date(2027, 1, 1)));
    }

    #[test]
    fn is_due_recurring_never_completed() {
        let today = date(2026, 10, 19);
        assert!(pending("Pill").with_recurrence(Recurrence::Daily).is_due(today));
        assert!(pending("Weigh-in").with_recurrence(Recurrence::Weekly).is_due(today));
    }

    #[test]
    fn is_due_daily_after_one_day() {
        let today = date(2026, 10, 19);
        let task = pending("Medication")
            .with_recurrence(Recurrence::Daily)
            .with_last_completed(date(2026, 10, 18));
        assert!(task.is_due(today));

        let done_today = pending("Medication")
            .with_recurrence(Recurrence::Daily)
            .with_last_completed(today);
        assert!(!done_today.is_due(today));
        assert!(done_today.is_due(date(2026, 10, 20)));
    }

    #[test]
    fn is_due_weekly_not_due_too_soon() {
        let today = date(2026, 10, 19);
        let task = Task::new("Weigh-in", "Weekly weight check", 5, 1, TaskStatus::Completed)
            .unwrap()
            .with_recurrence(Recurrence::Weekly)
            .with_last_completed(date(2026, 10, 16));

        assert!(!task.is_due(today));
        assert!(!task.is_due(date(2026, 10, 22)));
        assert!(task.is_due(date(2026, 10, 23)));
    }

    #[test]
    fn status_and_recurrence_parse() {
        assert_eq!("pending".parse::<TaskStatus>().unwrap(), TaskStatus::Pending);
        assert_eq!("IN_PROGRESS".parse::<TaskStatus>().unwrap(), TaskStatus::InProgress);
        assert_eq!("completed".parse::<TaskStatus>().unwrap(), TaskStatus::Completed);
        assert!("done".parse::<TaskStatus>().is_err());

        assert_eq!("".parse::<Recurrence>().unwrap(), Recurrence::None);
        assert_eq!("Daily".parse::<Recurrence>().unwrap(), Recurrence::Daily);
        assert_eq!("weekly".parse::<Recurrence>().unwrap(), Recurrence::Weekly);
        assert!("monthly".parse::<Recurrence>().is_err());
    }

    #[test]
    fn display_uses_wire_names() {
        assert_eq!(TaskStatus::InProgress.to_string(), "in_progress");
        assert_eq!(Recurrence::Weekly.to_string(), "weekly");
    }

    #[test]
    fn task_serialization() {
        let task = pending("Breakfast")
            .with_due_time(480)
            .unwrap()
            .with_recurrence(Recurrence::Daily);

        let json = serde_json::to_value(&task).unwrap();
        assert_eq!(json["name"], "Breakfast");
        assert_eq!(json["status"], "pending");
        assert_eq!(json["recurrence"], "daily");
        assert_eq!(json["due_time"], 480);
        assert!(json["last_completed_date"].is_null());
    }
}
