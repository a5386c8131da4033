//! Text and JSON rendering of task lists, plans and conflicts.
//!
//! Text sections are printed as they are added. JSON sections are collected
//! and printed as a single array by [`Output::finish`].

use serde_json::{json, Value};

use pawpal_core::{format_minute_of_day, Config, Conflict, DailyPlan, PlanEntry, Task};

pub struct Output {
    json: bool,
    unscheduled_label: String,
    sections: Vec<Value>,
}

impl Output {
    pub fn new(json: bool, unscheduled_label: impl Into<String>) -> Self {
        Self {
            json,
            unscheduled_label: unscheduled_label.into(),
            sections: Vec::new(),
        }
    }

    /// `--json` wins over the configured default format.
    pub fn from_config(config: &Config, json_flag: bool) -> Self {
        Self::new(json_flag || config.display.json, &config.display.unscheduled_label)
    }

    fn due(&self, due_time: Option<u16>) -> String {
        due_time
            .map(format_minute_of_day)
            .unwrap_or_else(|| self.unscheduled_label.clone())
    }

    fn heading(title: &str) {
        println!("{title}");
        println!("{}", "-".repeat(title.chars().count()));
    }

    fn task_json(&self, task: &Task) -> Value {
        json!({
            "task": task.name(),
            "description": task.description(),
            "due": self.due(task.due_time()),
            "duration": task.duration(),
            "priority": task.priority(),
            "status": task.status(),
            "recurrence": task.recurrence(),
        })
    }

    fn entry_json(&self, entry: &PlanEntry<'_>) -> Value {
        let mut value = self.task_json(entry.task);
        value["pet"] = json!(entry.pet.name());
        value
    }

    fn print_entries(&self, entries: &[PlanEntry<'_>]) {
        for entry in entries {
            println!(
                "{:<6} | {:<18} | due: {:<12} | {}",
                entry.pet.name(),
                entry.task.name(),
                self.due(entry.task.due_time()),
                entry.task.status()
            );
        }
    }

    /// Bare task list, one task per row.
    pub fn task_list<'t>(&mut self, title: &str, tasks: impl IntoIterator<Item = &'t Task>) {
        let tasks: Vec<&Task> = tasks.into_iter().collect();
        if self.json {
            let items: Vec<Value> = tasks.iter().map(|task| self.task_json(task)).collect();
            self.sections.push(json!({ "title": title, "tasks": items }));
            return;
        }

        Self::heading(title);
        for task in tasks {
            println!(
                "{:<18} | due: {:<12} | status: {}",
                task.name(),
                self.due(task.due_time()),
                task.status()
            );
        }
        println!();
    }

    /// `(pet, task)` rows without plan totals.
    pub fn entries(&mut self, title: &str, entries: &[PlanEntry<'_>]) {
        if self.json {
            let items: Vec<Value> = entries.iter().map(|entry| self.entry_json(entry)).collect();
            self.sections.push(json!({ "title": title, "entries": items }));
            return;
        }

        Self::heading(title);
        self.print_entries(entries);
        println!();
    }

    /// A daily plan with its totals and the tasks left over budget.
    pub fn plan(&mut self, title: &str, plan: &DailyPlan<'_>) {
        if self.json {
            let entries: Vec<Value> = plan.iter().map(|entry| self.entry_json(entry)).collect();
            let overflow: Vec<Value> = plan
                .overflow
                .iter()
                .map(|entry| self.entry_json(entry))
                .collect();
            self.sections.push(json!({
                "title": title,
                "date": plan.on_date.to_string(),
                "availability": plan.availability,
                "total_minutes": plan.total_minutes(),
                "remaining_minutes": plan.remaining_minutes(),
                "entries": entries,
                "overflow": overflow,
            }));
            return;
        }

        Self::heading(title);
        self.print_entries(&plan.entries);
        match plan.availability {
            Some(budget) => println!("total: {} of {budget} min", plan.total_minutes()),
            None => println!("total: {} min", plan.total_minutes()),
        }
        for entry in &plan.overflow {
            println!(
                "over budget: {}: {} ({} min)",
                entry.pet.name(),
                entry.task.name(),
                entry.task.duration()
            );
        }
        println!();
    }

    /// Conflict pairs. Text mode prints nothing when there are none.
    pub fn conflicts(&mut self, title: &str, conflicts: &[Conflict<'_>]) {
        if self.json {
            let items: Vec<Value> = conflicts
                .iter()
                .map(|conflict| {
                    let (pet_a, task_a, pet_b, task_b) = conflict.names();
                    json!({
                        "due": self.due(conflict.due_time()),
                        "first": { "pet": pet_a, "task": task_a },
                        "second": { "pet": pet_b, "task": task_b },
                    })
                })
                .collect();
            self.sections.push(json!({ "title": title, "conflicts": items }));
            return;
        }

        if conflicts.is_empty() {
            return;
        }
        Self::heading(title);
        for conflict in conflicts {
            let (pet_a, task_a, pet_b, task_b) = conflict.names();
            println!(
                "{:<12} | {pet_a}: {task_a}  <->  {pet_b}: {task_b}",
                self.due(conflict.due_time())
            );
        }
        println!();
    }

    /// Print collected JSON sections. No-op in text mode.
    pub fn finish(self) -> Result<(), serde_json::Error> {
        if self.json {
            println!("{}", serde_json::to_string_pretty(&self.sections)?);
        }
        Ok(())
    }
}
