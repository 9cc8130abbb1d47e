//! Subcommand implementations.

pub mod config;
pub mod hosts;
pub mod port;
pub mod socket;
