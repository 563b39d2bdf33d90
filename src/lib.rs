pub mod cli;
pub mod config;
pub mod display;
pub mod platform;
