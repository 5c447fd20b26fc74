//! CLI subcommand implementations.

pub mod reference;
pub mod tasks;
