//! Shell command execution and host platform queries.

pub mod command;
pub mod mock;
pub mod platform;

pub use command::{CommandRunner, OutputLine, ProcessRunner};
pub use mock::{Invocation, MockRunner};
pub use platform::{is_ci, is_elevated, privilege_prefix};
