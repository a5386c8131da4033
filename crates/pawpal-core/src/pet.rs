//! Pets and the tasks they own.

use indexmap::IndexMap;
use serde::Serialize;

use crate::task::Task;

/// A pet holding its care tasks, keyed by task name.
///
/// Tasks iterate in insertion order; replacing a task keeps its slot.
#[derive(Debug, Clone, Serialize)]
pub struct Pet {
    id: String,
    name: String,
    /// Id of the owner this pet was added to. Never owns the owner.
    owner_id: Option<String>,
    tasks: IndexMap<String, Task>,
}

impl Pet {
    /// Create a pet with no tasks and no owner.
    pub fn new(name: impl Into<String>) -> Self {
        Pet {
            id: format!("pet-{}", uuid::Uuid::new_v4()),
            name: name.into(),
            owner_id: None,
            tasks: IndexMap::new(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn owner_id(&self) -> Option<&str> {
        self.owner_id.as_deref()
    }

    pub(crate) fn set_owner_id(&mut self, owner_id: &str) {
        self.owner_id = Some(owner_id.to_string());
    }

    /// Add a task, replacing any existing task with the same name.
    ///
    /// Returns the replaced task, if any.
    pub fn add_task(&mut self, task: Task) -> Option<Task> {
        self.tasks.insert(task.name().to_string(), task)
    }

    pub fn get_task(&self, name: &str) -> Option<&Task> {
        self.tasks.get(name)
    }

    pub fn get_task_mut(&mut self, name: &str) -> Option<&mut Task> {
        self.tasks.get_mut(name)
    }

    /// Remove a task by name. Unknown names are a no-op.
    pub fn remove_task(&mut self, name: &str) -> Option<Task> {
        self.tasks.shift_remove(name)
    }

    /// All tasks in insertion order.
    pub fn list_tasks(&self) -> impl Iterator<Item = &Task> {
        self.tasks.values()
    }

    pub fn task_count(&self) -> usize {
        self.tasks.len()
    }
}
