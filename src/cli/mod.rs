//! CLI command handlers
//!
//! Each subcommand is implemented in its own module.

pub mod assess;
pub mod dashboard;
pub mod helpers;
pub mod init;
pub mod task;
