//! MROSC console CLI library.
//!
//! The `mrosc` binary is a thin wrapper around [`cli::Cli`].

pub mod cli;
pub mod commands;
pub mod error;
pub mod output;

pub use cli::{Cli, CommandContext, OutputFormat};
pub use error::CliError;
