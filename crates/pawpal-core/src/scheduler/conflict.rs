//! Conflict detection over a plan.
//!
//! Two notions of conflict are reported:
//! - same-time: two entries share the exact same due time
//! - overlap: `[due_time, due_time + duration)` intervals intersect
//!
//! Neither detector looks at dates or mutates tasks; unscheduled entries are
//! never in conflict.

use std::collections::HashMap;

use super::PlanEntry;

/// Two plan entries that collide. `first` is the entry already holding the
/// slot, `second` the one that collides with it.
#[derive(Debug, Clone, Copy)]
pub struct Conflict<'a> {
    pub first: PlanEntry<'a>,
    pub second: PlanEntry<'a>,
}

impl<'a> Conflict<'a> {
    pub fn new(first: PlanEntry<'a>, second: PlanEntry<'a>) -> Self {
        Self { first, second }
    }

    /// Start time of the entry that held the slot first.
    pub fn due_time(&self) -> Option<u16> {
        self.first.task.due_time()
    }

    /// `(pet A, task A, pet B, task B)` names.
    pub fn names(&self) -> (&'a str, &'a str, &'a str, &'a str) {
        (
            self.first.pet.name(),
            self.first.task.name(),
            self.second.pet.name(),
            self.second.task.name(),
        )
    }
}

/// Report entries that share a due time with an earlier entry.
///
/// Each later entry is paired only with the first entry seen at that time,
/// so `n` entries at one time produce `n - 1` records.
pub fn detect_same_time_conflicts<'a>(plan: &[PlanEntry<'a>]) -> Vec<Conflict<'a>> {
    let mut first_at: HashMap<u16, PlanEntry<'a>> = HashMap::new();
    let mut conflicts = Vec::new();

    for entry in plan {
        let Some(due_time) = entry.task.due_time() else {
            continue;
        };
        match first_at.get(&due_time) {
            Some(first) => conflicts.push(Conflict::new(*first, *entry)),
            None => {
                first_at.insert(due_time, *entry);
            }
        }
    }

    conflicts
}

/// Report entries whose interval starts before the latest-ending interval
/// seen so far ends.
///
/// The sweep keeps a single tracker, the entry with the latest end time, so
/// a long entry can be paired with several later short ones. It does not
/// report every intersecting pair.
pub fn detect_conflicts<'a>(plan: &[PlanEntry<'a>]) -> Vec<Conflict<'a>> {
    let mut timed: Vec<(u64, PlanEntry<'a>)> = plan
        .iter()
        .filter_map(|entry| entry.task.due_time().map(|due| (u64::from(due), *entry)))
        .collect();
    timed.sort_by_key(|(start, _)| *start);

    let mut conflicts = Vec::new();
    let mut tracked: Option<(u64, PlanEntry<'a>)> = None;

    for (start, entry) in timed {
        // u64 so `start + duration` cannot wrap for any u32 duration.
        let end = start + u64::from(entry.task.duration());
        match tracked {
            Some((tracked_end, tracked_entry)) => {
                if start < tracked_end {
                    conflicts.push(Conflict::new(tracked_entry, entry));
                }
                if end > tracked_end {
                    tracked = Some((end, entry));
                }
            }
            None => tracked = Some((end, entry)),
        }
    }

    conflicts
}
