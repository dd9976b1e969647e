//! Library half of the `lightning` binary: argument definitions, provider
//! factories and one module per command.

pub mod cli;
pub mod commands;
pub mod factories;
