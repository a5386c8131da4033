//! Household files: an owner, their pets and each pet's tasks in TOML.
//!
//! ```toml
//! owner = "Jordan"
//!
//! [[pets]]
//! name = "Milo"
//!
//! [[pets.tasks]]
//! name = "Morning walk"
//! duration = 30
//! priority = 2
//! due = "07:30"
//! recurrence = "daily"
//! last_completed = "2026-10-18"
//! ```

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer};
use std::fmt::Display;
use std::path::Path;
use std::str::FromStr;

use pawpal_core::{parse_minute_of_day, Owner, Pet, Recurrence, Task, TaskStatus};

#[derive(Debug, Deserialize)]
struct HouseholdFile {
    owner: String,
    #[serde(default)]
    pets: Vec<PetEntry>,
}

#[derive(Debug, Deserialize)]
struct PetEntry {
    name: String,
    #[serde(default)]
    tasks: Vec<TaskEntry>,
}

#[derive(Debug, Deserialize)]
struct TaskEntry {
    name: String,
    #[serde(default)]
    description: String,
    duration: i64,
    #[serde(default)]
    priority: i64,
    #[serde(default, deserialize_with = "parse_text")]
    status: TaskStatus,
    /// `HH:MM`
    due: Option<String>,
    #[serde(default, deserialize_with = "parse_text")]
    recurrence: Recurrence,
    last_completed: Option<NaiveDate>,
}

/// Read a string field through `FromStr`, so file values accept the same
/// spellings as command-line flags.
fn parse_text<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: Display,
{
    let text = String::deserialize(deserializer)?;
    text.parse().map_err(serde::de::Error::custom)
}

impl TaskEntry {
    fn into_task(self) -> Result<Task, Box<dyn std::error::Error>> {
        let mut task = Task::new(
            self.name,
            self.description,
            self.duration,
            self.priority,
            self.status,
        )?
        .with_recurrence(self.recurrence);

        if let Some(due) = self.due {
            task.set_due_time(Some(parse_minute_of_day(&due)?))?;
        }
        if let Some(date) = self.last_completed {
            task = task.with_last_completed(date);
        }
        Ok(task)
    }
}

/// Parse a household from TOML text.
pub fn parse(content: &str) -> Result<Owner, Box<dyn std::error::Error>> {
    let file: HouseholdFile = toml::from_str(content)?;
    let mut owner = Owner::new(file.owner);

    for pet_entry in file.pets {
        let mut pet = Pet::new(&pet_entry.name);
        for task_entry in pet_entry.tasks {
            let task_name = task_entry.name.clone();
            let task = task_entry
                .into_task()
                .map_err(|e| format!("pet '{}', task '{}': {e}", pet_entry.name, task_name))?;
            if pet.add_task(task).is_some() {
                tracing::warn!(
                    pet = %pet_entry.name,
                    task = %task_name,
                    "duplicate task name replaced"
                );
            }
        }
        owner.add_pet(pet);
    }

    tracing::debug!(owner = owner.name(), pets = owner.pets().len(), "household loaded");
    Ok(owner)
}

/// Load a household file from disk.
pub fn load(path: &Path) -> Result<Owner, Box<dyn std::error::Error>> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| format!("cannot read household file {}: {e}", path.display()))?;
    parse(&content).map_err(|e| format!("{}: {e}", path.display()).into())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
owner = "Jordan"

[[pets]]
name = "Milo"

[[pets.tasks]]
name = "Morning walk"
description = "30-minute walk"
duration = 30
priority = 2
due = "07:30"
recurrence = "daily"
last_completed = "2026-10-18"

[[pets.tasks]]
name = "Medication"
duration = 5
priority = 3
status = "in_progress"
due = "08:00"

[[pets]]
name = "Luna"
"#;

    #[test]
    fn parses_owner_pets_and_tasks() {
        let owner = parse(SAMPLE).unwrap();
        assert_eq!(owner.name(), "Jordan");
        assert_eq!(owner.pets().len(), 2);

        let milo = owner.pet("Milo").unwrap();
        assert!(owner.owns(milo));
        let walk = milo.get_task("Morning walk").unwrap();
        assert_eq!(walk.due_time(), Some(450));
        assert_eq!(walk.recurrence(), Recurrence::Daily);
        assert_eq!(walk.last_completed_date(), NaiveDate::from_ymd_opt(2026, 10, 18));

        let meds = milo.get_task("Medication").unwrap();
        assert_eq!(meds.status(), TaskStatus::InProgress);
        assert_eq!(meds.description(), "");

        assert_eq!(owner.pet("Luna").unwrap().task_count(), 0);
    }

    #[test]
    fn rejects_invalid_duration_with_context() {
        let content = r#"
owner = "Jordan"
[[pets]]
name = "Milo"
[[pets.tasks]]
name = "Walk"
duration = 0
"#;
        let err = parse(content).unwrap_err().to_string();
        assert!(err.contains("pet 'Milo', task 'Walk'"), "{err}");
        assert!(err.contains("duration"), "{err}");
    }

    #[test]
    fn rejects_bad_due_time() {
        let content = r#"
owner = "Jordan"
[[pets]]
name = "Milo"
[[pets.tasks]]
name = "Walk"
duration = 10
due = "25:00"
"#;
        assert!(parse(content).is_err());
    }

    #[test]
    fn accepts_command_line_spellings() {
        let content = r#"
owner = "Jordan"
[[pets]]
name = "Milo"
[[pets.tasks]]
name = "Medication"
duration = 5
status = "in-progress"
recurrence = ""
[[pets.tasks]]
name = "Walk"
duration = 30
status = "Pending"
recurrence = "Daily"
"#;
        let owner = parse(content).unwrap();
        let milo = owner.pet("Milo").unwrap();

        let meds = milo.get_task("Medication").unwrap();
        assert_eq!(meds.status(), TaskStatus::InProgress);
        assert_eq!(meds.recurrence(), Recurrence::None);

        let walk = milo.get_task("Walk").unwrap();
        assert_eq!(walk.status(), TaskStatus::Pending);
        assert_eq!(walk.recurrence(), Recurrence::Daily);
    }

    #[test]
    fn rejects_unknown_recurrence() {
        let content = r#"
owner = "Jordan"
[[pets]]
name = "Milo"
[[pets.tasks]]
name = "Walk"
duration = 10
recurrence = "monthly"
"#;
        assert!(parse(content).is_err());
    }
}
