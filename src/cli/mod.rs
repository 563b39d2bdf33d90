mod commands;
mod launch_args;

pub use commands::*;
pub use launch_args::{Command, LaunchArgs};
