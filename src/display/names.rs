use super::{DeviceNameRequest, DisplayConfigApi, Snapshot};

/// Shown in place of a name the OS could not provide.
pub const UNKNOWN_NAME: &str = "(unknown)";

/// Friendly name of the monitor on the given path, or an empty string.
pub fn resolve_target_name<A: DisplayConfigApi + ?Sized>(
    api: &A,
    snapshot: &Snapshot,
    path_index: usize,
) -> String {
    let Some(path) = snapshot.path(path_index) else {
        return String::new();
    };

    resolve(api, DeviceNameRequest::Target(path.target.identity))
}

/// GDI device name of the path's source (e.g. `\\.\DISPLAY1`), or an empty string.
pub fn resolve_source_name<A: DisplayConfigApi + ?Sized>(
    api: &A,
    snapshot: &Snapshot,
    path_index: usize,
) -> String {
    let Some(path) = snapshot.path(path_index) else {
        return String::new();
    };

    resolve(api, DeviceNameRequest::Source(path.source.identity))
}

fn resolve<A: DisplayConfigApi + ?Sized>(api: &A, request: DeviceNameRequest) -> String {
    match api.device_name(request) {
        Ok(name) => name,
        Err(code) => {
            // names are cosmetic
            log::debug!("Failed to resolve name for {request:?}: status {code}");
            String::new()
        }
    }
}

pub fn display_name(name: &str) -> &str {
    if name.is_empty() {
        UNKNOWN_NAME
    } else {
        name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display::fake::FakeDisplayConfig;
    use crate::display::StatusCode;

    #[test]
    fn test_resolves_target_and_source_names() {
        let fake = FakeDisplayConfig::sample();
        let snapshot = Snapshot::load(&fake).unwrap();

        assert_eq!(resolve_target_name(&fake, &snapshot, 0), "ASUS VW193D");
        assert_eq!(resolve_target_name(&fake, &snapshot, 1), "Dell U2415");
        assert_eq!(resolve_source_name(&fake, &snapshot, 1), r"\\.\DISPLAY2");
    }

    #[test]
    fn test_failure_degrades_to_empty() {
        let fake = FakeDisplayConfig::sample();
        let snapshot = Snapshot::load(&fake).unwrap();
        fake.set_name_status(StatusCode::INVALID_PARAMETER);

        assert_eq!(resolve_target_name(&fake, &snapshot, 0), "");
        assert_eq!(resolve_source_name(&fake, &snapshot, 0), "");
        assert_eq!(display_name(""), "(unknown)");
    }

    #[test]
    fn test_out_of_range_path_has_no_name() {
        let fake = FakeDisplayConfig::sample();
        let snapshot = Snapshot::load(&fake).unwrap();

        assert_eq!(resolve_target_name(&fake, &snapshot, 5), "");
        assert_eq!(fake.name_calls(), 0);
    }

    #[test]
    fn test_every_call_asks_the_os() {
        let fake = FakeDisplayConfig::sample();
        let snapshot = Snapshot::load(&fake).unwrap();

        resolve_target_name(&fake, &snapshot, 0);
        resolve_target_name(&fake, &snapshot, 0);
        assert_eq!(fake.name_calls(), 2);
    }
}
