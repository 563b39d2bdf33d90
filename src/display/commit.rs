use super::{CommitFlags, DisplayConfigApi, DisplayConfigError, Result, Snapshot};

/// Apply now, exactly as supplied, without asking for confirmation, and keep it
/// across reboots.
pub const COMMIT_FLAGS: CommitFlags = CommitFlags(
    CommitFlags::APPLY.bits()
        | CommitFlags::USE_SUPPLIED_DISPLAY_CONFIG.bits()
        | CommitFlags::ALLOW_CHANGES.bits()
        | CommitFlags::SAVE_TO_DATABASE.bits(),
);

/// Ask the OS whether the supplied configuration would be accepted.
pub const VALIDATE_FLAGS: CommitFlags = CommitFlags(
    CommitFlags::VALIDATE.bits() | CommitFlags::USE_SUPPLIED_DISPLAY_CONFIG.bits(),
);

/// Hand the whole topology back to the OS in one call.
///
/// The topology is not re-checked against the live one; the OS rejects it if it
/// no longer fits.
pub fn commit<A: DisplayConfigApi + ?Sized>(api: &A, snapshot: Snapshot) -> Result<()> {
    submit(api, &snapshot, COMMIT_FLAGS)?;

    log::info!(
        "Committed display config with {} paths and {} modes",
        snapshot.path_count(),
        snapshot.modes().len()
    );

    Ok(())
}

/// Check the topology without applying it.
pub fn validate<A: DisplayConfigApi + ?Sized>(api: &A, snapshot: &Snapshot) -> Result<()> {
    submit(api, snapshot, VALIDATE_FLAGS)
}

fn submit<A: DisplayConfigApi + ?Sized>(
    api: &A,
    snapshot: &Snapshot,
    flags: CommitFlags,
) -> Result<()> {
    let code = api.apply_config(snapshot.paths(), snapshot.modes(), flags);
    if !code.is_success() {
        return Err(DisplayConfigError::ApplyRejected { code });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display::fake::FakeDisplayConfig;
    use crate::display::StatusCode;

    #[test]
    fn test_commit_flags() {
        assert_eq!(COMMIT_FLAGS.bits(), 0x6A0);
        assert_eq!(VALIDATE_FLAGS.bits(), 0x60);
        assert!(!VALIDATE_FLAGS.contains(CommitFlags::APPLY));
    }

    #[test]
    fn test_commit_hands_over_full_topology() {
        let fake = FakeDisplayConfig::sample();
        let snapshot = Snapshot::load(&fake).unwrap();
        let expected = snapshot.clone();

        commit(&fake, snapshot).unwrap();

        let applied = fake.applied();
        assert_eq!(applied.len(), 1);
        assert_eq!(applied[0].flags, COMMIT_FLAGS);
        assert_eq!(applied[0].paths, expected.paths());
        assert_eq!(applied[0].modes, expected.modes());
    }

    #[test]
    fn test_rejection_keeps_status() {
        let fake = FakeDisplayConfig::sample();
        fake.set_apply_status(StatusCode(1610));
        let snapshot = Snapshot::load(&fake).unwrap();

        let err = commit(&fake, snapshot).unwrap_err();
        assert!(matches!(
            err,
            DisplayConfigError::ApplyRejected {
                code: StatusCode(1610)
            }
        ));
    }

    #[test]
    fn test_validate_uses_validate_flags() {
        let fake = FakeDisplayConfig::sample();
        let snapshot = Snapshot::load(&fake).unwrap();

        validate(&fake, &snapshot).unwrap();
        assert_eq!(fake.applied()[0].flags, VALIDATE_FLAGS);

        fake.set_apply_status(StatusCode::INVALID_PARAMETER);
        assert!(validate(&fake, &snapshot).is_err());
    }
}
