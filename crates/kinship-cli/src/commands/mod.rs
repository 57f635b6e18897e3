//! CLI command implementations

pub mod completions;
pub mod load;
pub mod query;
pub mod shell;
pub mod show;
