use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::display::Resolution;

const ABOUT: &str = "Set an exact monitor refresh rate as a numerator/denominator \
pair, bypassing the rounding of the standard display settings.";

#[derive(Parser, Debug)]
#[command(version, about = ABOUT, long_about = None)]
pub struct LaunchArgs {
    /// JSON config file. Defaults to $EXACT_REFRESH_CONFIG when set.
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Lists all monitors when omitted.
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// List all active monitors.
    List {
        /// Print the listing as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Set the refresh rate of one monitor, e.g. `set 0 59.89` or `set "ASUS VW193D" 59.89`.
    Set {
        /// Index shown by `list`, or part of the monitor name.
        monitor: String,

        /// Refresh rate in Hz, with up to two decimals.
        #[arg(allow_hyphen_values = true)]
        hz: String,

        /// Also change the resolution.
        #[arg(long, value_name = "WxH")]
        resolution: Option<Resolution>,

        /// Fail instead of picking the first monitor when the name matches several.
        #[arg(long)]
        strict: bool,

        /// Ask the OS to validate the change without applying it.
        #[arg(long)]
        dry_run: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_subcommand() {
        let args = LaunchArgs::try_parse_from(["exact-refresh"]).unwrap();
        assert!(args.command.is_none());
        assert!(args.config.is_none());
    }

    #[test]
    fn test_set_arguments() {
        let args = LaunchArgs::try_parse_from([
            "exact-refresh",
            "set",
            "ASUS VW193D",
            "59.89",
            "--resolution",
            "1920x1080",
            "--dry-run",
        ])
        .unwrap();

        assert_eq!(
            args.command,
            Some(Command::Set {
                monitor: "ASUS VW193D".to_string(),
                hz: "59.89".to_string(),
                resolution: Some(Resolution::new(1920, 1080)),
                strict: false,
                dry_run: true,
            })
        );
    }

    #[test]
    fn test_negative_rate_reaches_validation() {
        let args = LaunchArgs::try_parse_from(["exact-refresh", "set", "0", "-60"]).unwrap();
        assert!(matches!(args.command, Some(Command::Set { ref hz, .. }) if hz == "-60"));
    }

    #[test]
    fn test_bad_resolution_is_rejected() {
        assert!(LaunchArgs::try_parse_from([
            "exact-refresh",
            "set",
            "0",
            "60",
            "--resolution",
            "big"
        ])
        .is_err());
    }

    #[test]
    fn test_verify_cli() {
        use clap::CommandFactory;
        LaunchArgs::command().debug_assert();
    }
}
