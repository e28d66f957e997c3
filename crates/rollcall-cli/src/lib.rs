mod args;
mod commands;
mod handlers;
pub mod logging;
pub mod presentation;
pub mod types;

pub use args::{Cli, ClassCommand, Commands, ConfigCommand, StudentCommand, TimerCommand};
pub use commands::run;
