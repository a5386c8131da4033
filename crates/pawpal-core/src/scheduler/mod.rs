//! Daily plan builder.
//!
//! Builds a plan for one day in three steps:
//! - Collects due tasks across pets, honoring pet/status filters
//! - Ranks them: scheduled first, then earlier due time, higher priority,
//!   shorter duration
//! - Packs them greedily into the availability budget, skipping tasks that
//!   do not fit and continuing with the rest
//!
//! Same-time conflicts of the packed plan are returned alongside it in
//! [`DailyPlan`].

pub mod conflict;

use chrono::NaiveDate;
use std::cmp::Reverse;

use crate::pet::Pet;
use crate::storage::Config;
use crate::task::{Task, TaskStatus};
use crate::timing::{self, due_time_key};

pub use conflict::{detect_conflicts, detect_same_time_conflicts, Conflict};

/// A task selected for a plan, together with the pet it belongs to.
#[derive(Debug, Clone, Copy)]
pub struct PlanEntry<'a> {
    pub pet: &'a Pet,
    pub task: &'a Task,
}

impl<'a> PlanEntry<'a> {
    pub fn new(pet: &'a Pet, task: &'a Task) -> Self {
        Self { pet, task }
    }
}

/// Filters for a planning call. All fields are optional.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlanFilter {
    /// Only plan tasks of the pet with this name
    pub pet_name: Option<String>,
    /// Only plan tasks in this status. When unset, completed tasks are hidden.
    pub status: Option<TaskStatus>,
    /// Day to plan for (default: today)
    pub on_date: Option<NaiveDate>,
}

impl PlanFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn for_pet(mut self, pet_name: impl Into<String>) -> Self {
        self.pet_name = Some(pet_name.into());
        self
    }

    pub fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn on(mut self, date: NaiveDate) -> Self {
        self.on_date = Some(date);
        self
    }

    fn accepts_pet(&self, pet: &Pet) -> bool {
        match self.pet_name.as_deref() {
            Some(name) if !name.is_empty() => pet.name() == name,
            _ => true,
        }
    }

    fn accepts_status(&self, status: TaskStatus) -> bool {
        match self.status {
            Some(wanted) => status == wanted,
            None => status != TaskStatus::Completed,
        }
    }
}

/// Result of a planning call.
#[derive(Debug, Clone)]
pub struct DailyPlan<'a> {
    /// Day the plan was built for
    pub on_date: NaiveDate,
    /// Budget the plan was packed into, if any
    pub availability: Option<u32>,
    /// Planned entries in rank order
    pub entries: Vec<PlanEntry<'a>>,
    /// Same-time conflicts among `entries`
    pub same_time_conflicts: Vec<Conflict<'a>>,
    /// Due entries left out because they did not fit the budget
    pub overflow: Vec<PlanEntry<'a>>,
}

impl<'a> DailyPlan<'a> {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PlanEntry<'a>> {
        self.entries.iter()
    }

    /// Sum of planned task durations. Unlimited plans can exceed `u32`.
    pub fn total_minutes(&self) -> u64 {
        self.entries
            .iter()
            .map(|entry| u64::from(entry.task.duration()))
            .sum()
    }

    /// Budget left after packing; `None` when there is no budget.
    pub fn remaining_minutes(&self) -> Option<u64> {
        self.availability
            .map(|budget| u64::from(budget).saturating_sub(self.total_minutes()))
    }

    /// Overlap conflicts among the planned entries.
    pub fn overlap_conflicts(&self) -> Vec<Conflict<'a>> {
        detect_conflicts(&self.entries)
    }
}

impl<'p, 'a> IntoIterator for &'p DailyPlan<'a> {
    type Item = &'p PlanEntry<'a>;
    type IntoIter = std::slice::Iter<'p, PlanEntry<'a>>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Plans care tasks for a set of pets within an optional time budget.
#[derive(Debug, Clone, Copy)]
pub struct Scheduler<'a> {
    availability: Option<u32>,
    pets: &'a [Pet],
}

impl<'a> Scheduler<'a> {
    /// Create a scheduler. `availability` is the budget in minutes; `None`
    /// means every due task is planned.
    pub fn new(availability: Option<u32>, pets: &'a [Pet]) -> Self {
        Self { availability, pets }
    }

    /// Create a scheduler using the configured availability budget.
    pub fn from_config(config: &Config, pets: &'a [Pet]) -> Self {
        Self::new(config.planner.budget(), pets)
    }

    pub fn availability(&self) -> Option<u32> {
        self.availability
    }

    pub fn pets(&self) -> &'a [Pet] {
        self.pets
    }

    /// Build the plan for one day.
    pub fn generate_daily_plan(&self, filter: &PlanFilter) -> DailyPlan<'a> {
        let on_date = filter.on_date.unwrap_or_else(timing::today);

        let mut candidates = self.collect_candidates(filter, on_date);
        rank_candidates(&mut candidates);

        let (entries, overflow) = match self.availability {
            Some(budget) => pack_into_budget(candidates, budget),
            None => (candidates, Vec::new()),
        };
        let same_time_conflicts = detect_same_time_conflicts(&entries);

        tracing::info!(
            date = %on_date,
            planned = entries.len(),
            skipped = overflow.len(),
            same_time_conflicts = same_time_conflicts.len(),
            "daily plan generated"
        );

        DailyPlan {
            on_date,
            availability: self.availability,
            entries,
            same_time_conflicts,
            overflow,
        }
    }

    /// Overlap conflicts of any plan.
    pub fn detect_conflicts<'p>(&self, plan: &[PlanEntry<'p>]) -> Vec<Conflict<'p>> {
        detect_conflicts(plan)
    }

    /// Same-time conflicts of any plan.
    pub fn detect_same_time_conflicts<'p>(&self, plan: &[PlanEntry<'p>]) -> Vec<Conflict<'p>> {
        detect_same_time_conflicts(plan)
    }

    fn collect_candidates(&self, filter: &PlanFilter, on_date: NaiveDate) -> Vec<PlanEntry<'a>> {
        let mut collected = Vec::new();

        for pet in self.pets.iter().filter(|pet| filter.accepts_pet(pet)) {
            for task in pet.list_tasks() {
                if !filter.accepts_status(task.status()) {
                    tracing::trace!(pet = pet.name(), task = task.name(), "filtered by status");
                    continue;
                }
                if !task.is_due(on_date) {
                    tracing::trace!(pet = pet.name(), task = task.name(), "not due");
                    continue;
                }
                collected.push(PlanEntry::new(pet, task));
            }
        }

        tracing::debug!(candidates = collected.len(), date = %on_date, "collected candidates");
        collected
    }
}

/// Sort candidates into planning order. Stable, so full ties keep pet order
/// and then task insertion order.
fn rank_candidates(candidates: &mut [PlanEntry<'_>]) {
    candidates.sort_by_key(|entry| {
        let (unscheduled, due_time) = due_time_key(entry.task.due_time());
        (
            unscheduled,
            due_time,
            Reverse(entry.task.priority()),
            entry.task.duration(),
        )
    });
}

/// Greedy first-fit by rank: a task that would exceed the budget is skipped
/// and later tasks are still considered.
fn pack_into_budget<'a>(
    ranked: Vec<PlanEntry<'a>>,
    budget: u32,
) -> (Vec<PlanEntry<'a>>, Vec<PlanEntry<'a>>) {
    let mut planned = Vec::new();
    let mut overflow = Vec::new();
    let mut used: u32 = 0;

    for entry in ranked {
        let duration = entry.task.duration();
        match used.checked_add(duration) {
            Some(total) if total <= budget => {
                used = total;
                planned.push(entry);
            }
            _ => {
                tracing::debug!(
                    task = entry.task.name(),
                    duration,
                    used,
                    budget,
                    "task does not fit the remaining budget"
                );
                overflow.push(entry);
            }
        }
    }

    (planned, overflow)
}

/// Filter `(pet, task)` pairs by status and/or pet name without any
/// eligibility logic.
pub fn filter_entries<'a, I>(
    entries: I,
    status: Option<TaskStatus>,
    pet_name: Option<&str>,
) -> Vec<PlanEntry<'a>>
where
    I: IntoIterator<Item = PlanEntry<'a>>,
{
    entries
        .into_iter()
        .filter(|entry| status.map_or(true, |wanted| entry.task.status() == wanted))
        .filter(|entry| pet_name.map_or(true, |name| entry.pet.name() == name))
        .collect()
}

/// Stable sort of entries by due time, unscheduled last.
pub fn sort_entries_by_time(entries: &mut [PlanEntry<'_>]) {
    entries.sort_by_key(|entry| due_time_key(entry.task.due_time()));
}

/// Every `(pet, task)` pair of the given pets, pet by pet.
pub fn all_entries(pets: &[Pet]) -> impl Iterator<Item = PlanEntry<'_>> {
    pets.iter()
        .flat_map(|pet| pet.list_tasks().map(move |task| PlanEntry::new(pet, task)))
}
