use std::process::ExitCode;

use clap::Parser;
use exact_refresh::cli::{self, LaunchArgs};
use exact_refresh::display::DisplayConfigError;
use exact_refresh::platform::NativeDisplayConfig;

fn main() -> ExitCode {
    env_logger::init();

    let args = LaunchArgs::parse();
    let api = NativeDisplayConfig::new();

    match cli::run(&args, &api, &mut std::io::stdout().lock()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::debug!("Invocation failed:\n{e:?}");
            eprintln!("Error: {e:#}");

            if let Some(DisplayConfigError::NotFound { .. }) = e.downcast_ref::<DisplayConfigError>() {
                eprintln!("Use 'exact-refresh list' to see available monitors.");
            }

            ExitCode::FAILURE
        }
    }
}
