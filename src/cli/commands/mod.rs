//! CLI command implementations.
//!
//! Each command implements the [`Command`] trait, which provides a uniform
//! interface for executing commands and reporting results.
//!
//! # Architecture
//!
//! Commands are dispatched via [`CommandDispatcher`], which routes CLI
//! subcommands to their implementations. This allows:
//! - Single binary with subcommands (`zephir-installer install`, `zephir-installer check`)
//! - Shared initialization logic
//! - Consistent global flag handling

pub mod check;
pub mod dispatcher;
pub mod install;

pub use dispatcher::{Command, CommandContext, CommandDispatcher, CommandResult};
