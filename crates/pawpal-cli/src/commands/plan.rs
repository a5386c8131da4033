use chrono::NaiveDate;
use clap::Args;
use std::path::PathBuf;

use pawpal_core::{Config, PlanFilter, Scheduler, TaskStatus};

use crate::household;
use crate::output::Output;

#[derive(Args)]
pub struct PlanArgs {
    /// Household file (TOML)
    file: PathBuf,
    /// Only plan tasks of this pet
    #[arg(long)]
    pet: Option<String>,
    /// Only plan tasks with this status (pending, in_progress, completed)
    #[arg(long)]
    status: Option<TaskStatus>,
    /// Day to plan (YYYY-MM-DD), defaults to today
    #[arg(long)]
    date: Option<NaiveDate>,
    /// Availability budget in minutes, overrides the config
    #[arg(long, conflicts_with = "unlimited")]
    availability: Option<u32>,
    /// Plan every due task regardless of time
    #[arg(long)]
    unlimited: bool,
    /// Output as JSON
    #[arg(long)]
    json: bool,
}

impl PlanArgs {
    /// `--unlimited`, then `--availability`, then the configured budget.
    fn budget(&self, config: &Config) -> Option<u32> {
        if self.unlimited {
            return None;
        }
        self.availability.or_else(|| config.planner.budget())
    }

    fn filter(&self) -> PlanFilter {
        let mut filter = PlanFilter::new();
        if let Some(pet) = &self.pet {
            filter = filter.for_pet(pet.as_str());
        }
        if let Some(status) = self.status {
            filter = filter.with_status(status);
        }
        if let Some(date) = self.date {
            filter = filter.on(date);
        }
        filter
    }
}

pub fn run(args: PlanArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_or_default();
    let owner = household::load(&args.file)?;
    let mut out = Output::from_config(&config, args.json);

    let scheduler = Scheduler::new(args.budget(&config), owner.pets());
    let plan = scheduler.generate_daily_plan(&args.filter());

    let title = format!("Plan for {} ({})", owner.name(), plan.on_date);
    out.plan(&title, &plan);
    out.conflicts(
        "Warning: tasks share the same due time",
        &plan.same_time_conflicts,
    );
    out.conflicts("Warning: tasks overlap", &plan.overlap_conflicts());

    out.finish()?;
    Ok(())
}
