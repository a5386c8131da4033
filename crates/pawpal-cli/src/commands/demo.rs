use chrono::{Days, NaiveDate};
use clap::Args;

use pawpal_core::timing::today;
use pawpal_core::{
    sort_by_time, Config, Owner, Pet, PlanFilter, Recurrence, Scheduler, Task, TaskStatus,
};

use crate::output::Output;

/// Availability budget of the demo household, in minutes.
const DEMO_AVAILABILITY: u32 = 120;

#[derive(Args)]
pub struct DemoArgs {
    /// Day to treat as today (YYYY-MM-DD), defaults to the local date
    #[arg(long)]
    date: Option<NaiveDate>,
    /// Output as JSON
    #[arg(long)]
    json: bool,
}

/// Jordan's household: Milo with walk, breakfast and medication, Luna with
/// playtime and grooming.
pub fn demo_household() -> Result<Owner, Box<dyn std::error::Error>> {
    let mut owner = Owner::new("Jordan");

    let mut milo = Pet::new("Milo");
    milo.add_task(
        Task::new("Morning walk", "30-minute walk", 30, 2, TaskStatus::Pending)?
            .with_due_time(450)?,
    );
    milo.add_task(
        Task::new("Breakfast", "Feed kibble", 10, 3, TaskStatus::Pending)?.with_due_time(480)?,
    );
    milo.add_task(
        Task::new("Medication", "Daily pill", 5, 3, TaskStatus::InProgress)?.with_due_time(480)?,
    );

    let mut luna = Pet::new("Luna");
    luna.add_task(
        Task::new("Playtime", "20-minute play", 20, 1, TaskStatus::Pending)?.with_due_time(1080)?,
    );
    luna.add_task(
        Task::new("Grooming", "Brush fur", 15, 1, TaskStatus::Pending)?.with_due_time(540)?,
    );

    owner.add_pet(milo);
    owner.add_pet(luna);
    Ok(owner)
}

fn task_mut<'o>(
    owner: &'o mut Owner,
    pet: &str,
    task: &str,
) -> Result<&'o mut Task, Box<dyn std::error::Error>> {
    owner
        .pet_mut(pet)
        .and_then(|p| p.get_task_mut(task))
        .ok_or_else(|| format!("demo household has no task '{task}' for {pet}").into())
}

pub fn run(args: DemoArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_or_default();
    let mut out = Output::from_config(&config, args.json);
    let day = args.date.unwrap_or_else(today);

    let mut owner = demo_household()?;

    {
        let pick = |pet: &str, task: &str| owner.pet(pet).and_then(|p| p.get_task(task));
        let unsorted: Vec<&Task> = [
            ("Milo", "Breakfast"),
            ("Luna", "Playtime"),
            ("Milo", "Morning walk"),
            ("Luna", "Grooming"),
            ("Milo", "Medication"),
        ]
        .into_iter()
        .filter_map(|(pet, task)| pick(pet, task))
        .collect();

        out.task_list("Tasks before sorting", unsorted.iter().copied());
        out.task_list("Tasks after sorting", sort_by_time(unsorted.iter().copied()));

        let scheduler = Scheduler::new(Some(DEMO_AVAILABILITY), owner.pets());
        let milo_plan = scheduler.generate_daily_plan(&PlanFilter::new().for_pet("Milo").on(day));
        out.entries("Filtered plan (pet = Milo)", &milo_plan.entries);

        let pending = PlanFilter::new().with_status(TaskStatus::Pending).on(day);
        let pending_plan = scheduler.generate_daily_plan(&pending);
        out.entries("Filtered plan (status = pending)", &pending_plan.entries);
    }

    let walk = task_mut(&mut owner, "Milo", "Morning walk")?;
    walk.set_recurrence(Recurrence::Daily);
    walk.mark_completed(Some(day));
    let grooming = task_mut(&mut owner, "Luna", "Grooming")?;
    grooming.set_recurrence(Recurrence::Weekly);
    grooming.mark_completed(Some(day));

    let scheduler = Scheduler::new(Some(DEMO_AVAILABILITY), owner.pets());
    let plan_today = scheduler.generate_daily_plan(&PlanFilter::new().on(day));
    out.plan("Plan after completion (today)", &plan_today);
    out.conflicts(
        "Warning: tasks share the same due time",
        &plan_today.same_time_conflicts,
    );

    let tomorrow = day
        .checked_add_days(Days::new(1))
        .ok_or("date out of range")?;
    let plan_tomorrow = scheduler.generate_daily_plan(&PlanFilter::new().on(tomorrow));
    out.plan("Plan for tomorrow (daily recurrence)", &plan_tomorrow);

    let next_week = day
        .checked_add_days(Days::new(7))
        .ok_or("date out of range")?;
    let plan_next_week = scheduler.generate_daily_plan(&PlanFilter::new().on(next_week));
    out.plan("Plan for next week (weekly recurrence)", &plan_next_week);

    out.finish()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()
    }

    fn names(plan: &pawpal_core::DailyPlan<'_>) -> Vec<String> {
        plan.iter().map(|e| e.task.name().to_string()).collect()
    }

    #[test]
    fn household_has_five_tasks() {
        let owner = demo_household().unwrap();
        assert_eq!(owner.get_all_tasks().len(), 5);
        assert!(owner.pets().iter().all(|pet| owner.owns(pet)));
    }

    #[test]
    fn completed_recurring_tasks_return_on_their_interval() {
        let mut owner = demo_household().unwrap();
        for (pet, task, recurrence) in [
            ("Milo", "Morning walk", Recurrence::Daily),
            ("Luna", "Grooming", Recurrence::Weekly),
        ] {
            let task = task_mut(&mut owner, pet, task).unwrap();
            task.set_recurrence(recurrence);
            task.mark_completed(Some(day()));
        }

        let scheduler = Scheduler::new(Some(DEMO_AVAILABILITY), owner.pets());
        let today = scheduler.generate_daily_plan(&PlanFilter::new().on(day()));
        assert_eq!(names(&today), vec!["Medication", "Breakfast", "Playtime"]);
        assert_eq!(today.same_time_conflicts.len(), 1);

        let tomorrow = scheduler
            .generate_daily_plan(&PlanFilter::new().on(day().succ_opt().unwrap()));
        assert!(names(&tomorrow).contains(&"Morning walk".to_string()));
        assert!(!names(&tomorrow).contains(&"Grooming".to_string()));

        let next_week = day().checked_add_days(Days::new(7)).unwrap();
        let later = scheduler.generate_daily_plan(&PlanFilter::new().on(next_week));
        assert!(names(&later).contains(&"Grooming".to_string()));
    }

    #[test]
    fn missing_task_is_an_error() {
        let mut owner = demo_household().unwrap();
        assert!(task_mut(&mut owner, "Milo", "Bath").is_err());
        assert!(task_mut(&mut owner, "Rex", "Walk").is_err());
    }
}
