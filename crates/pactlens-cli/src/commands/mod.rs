//! CLI subcommand implementations

pub mod auth;
pub mod contracts;
pub mod shared;
