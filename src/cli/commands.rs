use std::io::Write;

use anyhow::{Context, Result};

use super::{Command, LaunchArgs};
use crate::config::{ListFormat, ToolConfig};
use crate::display::{
    self, names, DisplayConfigApi, MatchPolicy, RationalRate, Resolution, Snapshot,
};

/// Everything `set` needs after the command line and config are merged.
#[derive(Debug, Clone, PartialEq)]
pub struct SetRequest {
    pub monitor: String,
    pub hz: String,
    pub resolution: Option<Resolution>,
    pub policy: MatchPolicy,
    pub dry_run: bool,
}

/// Run one invocation. Output goes to `out`; failures come back as errors.
pub fn run<A, W>(args: &LaunchArgs, api: &A, out: &mut W) -> Result<()>
where
    A: DisplayConfigApi + ?Sized,
    W: Write,
{
    let config = ToolConfig::resolve(args.config.as_deref())?;

    match &args.command {
        None => list(api, config.list_format, out),
        Some(Command::List { json }) => {
            let format = if *json {
                ListFormat::Json
            } else {
                config.list_format
            };
            list(api, format, out)
        }
        Some(Command::Set {
            monitor,
            hz,
            resolution,
            strict,
            dry_run,
        }) => {
            let request = SetRequest {
                monitor: monitor.clone(),
                hz: hz.clone(),
                resolution: *resolution,
                policy: if *strict {
                    MatchPolicy::Unique
                } else {
                    config.match_policy
                },
                dry_run: *dry_run,
            };
            set(api, &request, out)
        }
    }
}

pub fn list<A, W>(api: &A, format: ListFormat, out: &mut W) -> Result<()>
where
    A: DisplayConfigApi + ?Sized,
    W: Write,
{
    let snapshot = Snapshot::load(api).context("loading display configuration")?;
    let entries = display::describe(api, &snapshot);

    match format {
        ListFormat::Text => {
            writeln!(out, "Active monitors:")?;
            writeln!(out)?;
            for entry in &entries {
                writeln!(out, "{}", entry.to_text())?;
                writeln!(out)?;
            }
        }
        ListFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, &entries)?;
            writeln!(out)?;
        }
    }

    Ok(())
}

pub fn set<A, W>(api: &A, request: &SetRequest, out: &mut W) -> Result<()>
where
    A: DisplayConfigApi + ?Sized,
    W: Write,
{
    // rejected before the topology is even read
    let hz = display::parse_hz(&request.hz)?;
    let rate = RationalRate::from_hz(hz)?;

    let mut snapshot = Snapshot::load(api).context("loading display configuration")?;
    let index = display::locate(api, &snapshot, &request.monitor, request.policy)?;

    let name = names::resolve_target_name(api, &snapshot, index);
    writeln!(out, "Target: [{index}] {}", names::display_name(&name))?;
    writeln!(out, "Setting refresh rate: {rate}")?;
    if let Some(resolution) = request.resolution {
        writeln!(out, "Setting resolution: {resolution}")?;
    }

    let outcome = display::apply_rate(&mut snapshot, index, rate, request.resolution)?;
    log::debug!("Mutation of path {index}: {outcome:?}");

    if request.dry_run {
        display::validate(api, &snapshot)?;
        writeln!(out, "Configuration is valid, nothing was applied.")?;
        return Ok(());
    }

    display::commit(api, snapshot)?;
    writeln!(out, "Success!")?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display::fake::FakeDisplayConfig;
    use crate::display::{DisplayConfigError, COMMIT_FLAGS, VALIDATE_FLAGS};

    fn request(monitor: &str, hz: &str) -> SetRequest {
        SetRequest {
            monitor: monitor.to_string(),
            hz: hz.to_string(),
            resolution: None,
            policy: MatchPolicy::FirstMatch,
            dry_run: false,
        }
    }

    #[test]
    fn test_list_text() {
        let fake = FakeDisplayConfig::sample();
        let mut out = Vec::new();

        list(&fake, ListFormat::Text, &mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("Active monitors:\n\n[0] \\\\.\\DISPLAY1\n"));
        assert!(text.contains("    Name: ASUS VW193D\n    Resolution: 1920x1080\n    Refresh: 60.00 Hz (60/1)\n"));
    }

    #[test]
    fn test_list_json() {
        let fake = FakeDisplayConfig::sample();
        let mut out = Vec::new();

        list(&fake, ListFormat::Json, &mut out).unwrap();

        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value.as_array().unwrap().len(), 2);
        assert_eq!(value[1]["name"], "Dell U2415");
    }

    #[test]
    fn test_set_prints_and_commits() {
        let fake = FakeDisplayConfig::sample();
        let mut out = Vec::new();

        set(&fake, &request("dell", "74.97"), &mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert_eq!(
            text,
            "Target: [1] Dell U2415\nSetting refresh rate: 74.97 Hz (7497/100)\nSuccess!\n"
        );
        let applied = fake.applied();
        assert_eq!(applied.len(), 1);
        assert_eq!(applied[0].flags, COMMIT_FLAGS);
    }

    #[test]
    fn test_invalid_rate_never_queries() {
        let fake = FakeDisplayConfig::sample();
        let mut out = Vec::new();

        let err = set(&fake, &request("0", "600"), &mut out).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<DisplayConfigError>(),
            Some(DisplayConfigError::InvalidRate { .. })
        ));
        assert_eq!(fake.query_calls(), 0);
        assert!(out.is_empty());
    }

    #[test]
    fn test_dry_run_only_validates() {
        let fake = FakeDisplayConfig::sample();
        let mut out = Vec::new();
        let request = SetRequest {
            dry_run: true,
            resolution: Some(Resolution::new(1280, 1024)),
            ..request("0", "75")
        };

        set(&fake, &request, &mut out).unwrap();

        let applied = fake.applied();
        assert_eq!(applied.len(), 1);
        assert_eq!(applied[0].flags, VALIDATE_FLAGS);
        assert!(String::from_utf8(out).unwrap().contains("Setting resolution: 1280x1024\n"));
    }

    #[test]
    fn test_not_found_is_reported() {
        let fake = FakeDisplayConfig::sample();
        let mut out = Vec::new();

        let err = set(&fake, &request("benq", "60"), &mut out).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<DisplayConfigError>(),
            Some(DisplayConfigError::NotFound { .. })
        ));
        assert!(fake.applied().is_empty());
    }

    #[test]
    fn test_strict_flag_overrides_config() {
        let fake = FakeDisplayConfig::sample();
        let dell = Snapshot::load(&fake).unwrap().paths()[1].target.identity;
        let fake = fake.with_target_name(dell, "ASUS PG279Q");
        let args = LaunchArgs {
            config: None,
            command: Some(Command::Set {
                monitor: "asus".to_string(),
                hz: "60".to_string(),
                resolution: None,
                strict: true,
                dry_run: false,
            }),
        };

        let err = run(&args, &fake, &mut Vec::new()).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<DisplayConfigError>(),
            Some(DisplayConfigError::Ambiguous { .. })
        ));
    }
}
