//! CLI subcommand implementations.

pub mod common;
pub mod once;
pub mod price;
pub mod run;
