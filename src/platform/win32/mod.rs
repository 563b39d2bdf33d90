mod convert;
mod display_config;

pub use display_config::Win32DisplayConfig;
