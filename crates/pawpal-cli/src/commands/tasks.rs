use clap::Args;
use std::path::PathBuf;

use pawpal_core::scheduler::{all_entries, filter_entries, sort_entries_by_time};
use pawpal_core::{Config, TaskStatus};

use crate::household;
use crate::output::Output;

#[derive(Args)]
pub struct TasksArgs {
    /// Household file (TOML)
    file: PathBuf,
    /// Only list tasks of this pet
    #[arg(long)]
    pet: Option<String>,
    /// Only list tasks with this status (pending, in_progress, completed)
    #[arg(long)]
    status: Option<TaskStatus>,
    /// Output as JSON
    #[arg(long)]
    json: bool,
}

pub fn run(args: TasksArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_or_default();
    let owner = household::load(&args.file)?;
    let mut out = Output::from_config(&config, args.json);

    let pet = args.pet.as_deref().filter(|name| !name.is_empty());
    if let Some(name) = pet {
        if owner.pet(name).is_none() {
            tracing::warn!(pet = name, "no such pet in household");
        }
    }

    let mut entries = filter_entries(all_entries(owner.pets()), args.status, pet);
    sort_entries_by_time(&mut entries);

    out.entries(&format!("Tasks for {}", owner.name()), &entries);
    out.finish()?;
    Ok(())
}
