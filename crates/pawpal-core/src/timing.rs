//! Minute-of-day helpers and due-time ordering.
//!
//! Due times are stored as minutes after midnight (`0..=1439`). They are shown
//! to people as zero-padded `HH:MM`.

use chrono::{Local, NaiveDate};

use crate::error::ValidationError;
use crate::task::Task;

/// Number of minutes in a day; valid due times are strictly below this.
pub const MINUTES_PER_DAY: u16 = 24 * 60;

/// Label used for tasks without a due time.
pub const UNSCHEDULED_LABEL: &str = "unscheduled";

/// Today's date in the local timezone, the default planning date.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Check that a minute-of-day value is inside the day.
pub fn validate_minute_of_day(minute: u16) -> Result<u16, ValidationError> {
    if minute >= MINUTES_PER_DAY {
        return Err(ValidationError::DueTimeOutOfRange(u32::from(minute)));
    }
    Ok(minute)
}

/// Format a minute-of-day as `HH:MM`.
pub fn format_minute_of_day(minute: u16) -> String {
    format!("{:02}:{:02}", minute / 60, minute % 60)
}

/// Format an optional due time, using [`UNSCHEDULED_LABEL`] when unset.
pub fn format_due_time(due_time: Option<u16>) -> String {
    match due_time {
        Some(minute) => format_minute_of_day(minute),
        None => UNSCHEDULED_LABEL.to_string(),
    }
}

/// Parse `HH:MM` (hours 0-23, minutes 0-59) into a minute-of-day.
pub fn parse_minute_of_day(input: &str) -> Result<u16, ValidationError> {
    let invalid = || ValidationError::InvalidTimeOfDay(input.to_string());

    let (hours, minutes) = input.trim().split_once(':').ok_or_else(invalid)?;
    let hours: u16 = hours.parse().map_err(|_| invalid())?;
    let minutes: u16 = minutes.parse().map_err(|_| invalid())?;

    if hours > 23 || minutes > 59 {
        return Err(invalid());
    }
    Ok(hours * 60 + minutes)
}

/// Sort key shared by every due-time ordering: scheduled first, then by time.
pub(crate) fn due_time_key(due_time: Option<u16>) -> (bool, u16) {
    (due_time.is_none(), due_time.unwrap_or(0))
}

/// Order tasks by ascending due time, unscheduled tasks last.
///
/// The sort is stable, so tasks sharing a due time (or all unscheduled
/// tasks) keep their input order.
pub fn sort_by_time<'a, I>(tasks: I) -> Vec<&'a Task>
where
    I: IntoIterator<Item = &'a Task>,
{
    let mut sorted: Vec<&Task> = tasks.into_iter().collect();
    sorted.sort_by_key(|task| due_time_key(task.due_time()));
    sorted
}
