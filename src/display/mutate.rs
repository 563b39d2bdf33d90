use super::{DisplayConfigError, ModeKind, RationalRate, Resolution, Result, Snapshot};

/// Which records `apply_rate` managed to update besides the path itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MutationOutcome {
    pub target_mode_updated: bool,
    pub source_mode_updated: bool,
}

/// Set the refresh rate of one path, and optionally its resolution.
///
/// The path's own refresh rate is always written. The linked target mode gets
/// the same v-sync frequency, and with a resolution the target active size and
/// the source mode size follow. A missing or mis-tagged mode is skipped; the OS
/// decides whether the result is still acceptable when it is committed.
pub fn apply_rate(
    snapshot: &mut Snapshot,
    path_index: usize,
    rate: RationalRate,
    resolution: Option<Resolution>,
) -> Result<MutationOutcome> {
    let path_count = snapshot.path_count();
    let Some(path) = snapshot.path_mut(path_index) else {
        return Err(DisplayConfigError::InvalidPathIndex {
            index: path_index,
            path_count,
        });
    };

    path.target.refresh_rate = rate;
    let source_index = path.source.mode_index;
    let target_index = path.target.mode_index;

    let mut outcome = MutationOutcome::default();

    match snapshot
        .mode_mut(target_index, ModeKind::Target)
        .and_then(|mode| mode.as_target_mut())
    {
        Some(target) => {
            target.signal.v_sync_freq = rate;
            if let Some(resolution) = resolution {
                target.signal.active_size = resolution;
            }
            outcome.target_mode_updated = true;
        }
        None => log::warn!(
            "Path {path_index} has no target mode at index {}, only the path refresh rate was set",
            target_index.offset()
        ),
    }

    if let Some(resolution) = resolution {
        match snapshot
            .mode_mut(source_index, ModeKind::Source)
            .and_then(|mode| mode.as_source_mut())
        {
            Some(source) => {
                source.width = resolution.width;
                source.height = resolution.height;
                outcome.source_mode_updated = true;
            }
            None => log::warn!(
                "Path {path_index} has no source mode at index {}, desktop size left unchanged",
                source_index.offset()
            ),
        }
    }

    Ok(outcome)
}
