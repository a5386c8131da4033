//! # PawPal Core Library
//!
//! This library provides the planning logic for PawPal, a pet-care task
//! planner. The CLI is a thin layer over the same core library.
//!
//! ## Architecture
//!
//! - **Tasks**: care tasks with duration, priority, due time and recurrence
//! - **Pets/Owner**: plain containers; the owner owns its pets, pets own tasks
//! - **Scheduler**: collects due tasks, ranks them and packs them into the
//!   daily availability budget
//! - **Conflicts**: same-time and overlapping tasks in a plan
//! - **Storage**: TOML-based configuration
//!
//! ## Key Components
//!
//! - [`Task`]: a single care task and its eligibility rules
//! - [`Scheduler`]: daily plan builder
//! - [`DailyPlan`]: planned entries plus their same-time conflicts
//! - [`Config`]: application configuration management

pub mod error;
pub mod owner;
pub mod pet;
pub mod scheduler;
pub mod storage;
pub mod task;
pub mod timing;

pub use error::{ConfigError, CoreError, ValidationError};
pub use owner::Owner;
pub use pet::Pet;
pub use scheduler::{
    detect_conflicts, detect_same_time_conflicts, Conflict, DailyPlan, PlanEntry, PlanFilter,
    Scheduler,
};
pub use storage::Config;
pub use task::{Recurrence, Task, TaskStatus};
pub use timing::{format_due_time, format_minute_of_day, parse_minute_of_day, sort_by_time};
