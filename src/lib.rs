pub mod cli;
pub mod error;
pub mod logging;
pub mod platform;
pub mod process;
pub mod runner;
pub mod signal;
pub mod stream;

pub use error::{ListrunError, Result, ReturnCode};
pub use platform::{select_command, CommandSpec, Platform};
pub use process::ExitReport;
pub use runner::{Runner, RunnerConfig};
