pub mod config;
pub mod demo;
pub mod plan;
pub mod tasks;
