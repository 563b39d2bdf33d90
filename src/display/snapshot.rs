use super::{
    DisplayConfigApi, DisplayConfigError, DisplayMode, DisplayPath, ModeIndex, ModeKind,
    QueryStage, Resolution, Result, SourceMode, StatusCode, TargetMode,
};

/// One copy of the active display topology.
///
/// Mode indices stored in the paths point into this snapshot's `modes` and mean
/// nothing for any other snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Snapshot {
    paths: Vec<DisplayPath>,
    modes: Vec<DisplayMode>,
}

impl Snapshot {
    /// Query the OS for the currently active paths and their modes.
    ///
    /// Sizing and fetching are two OS calls, but either both succeed or no
    /// snapshot is produced. If the topology changed in between (e.g. a monitor
    /// was plugged in) the fetch is reported as failed.
    pub fn load<A: DisplayConfigApi + ?Sized>(api: &A) -> Result<Self> {
        let sizes = api
            .buffer_sizes()
            .map_err(|code| DisplayConfigError::QueryFailed {
                stage: QueryStage::BufferSizes,
                code,
            })?;

        log::debug!(
            "Display config needs {} paths and {} modes",
            sizes.paths,
            sizes.modes
        );

        let raw = api
            .query_config(sizes)
            .map_err(|code| DisplayConfigError::QueryFailed {
                stage: QueryStage::Fetch,
                code,
            })?;

        if raw.paths.len() != sizes.paths || raw.modes.len() != sizes.modes {
            log::debug!(
                "Topology changed while querying: expected {}/{}, got {}/{}",
                sizes.paths,
                sizes.modes,
                raw.paths.len(),
                raw.modes.len()
            );

            return Err(DisplayConfigError::QueryFailed {
                stage: QueryStage::Fetch,
                code: StatusCode::INSUFFICIENT_BUFFER,
            });
        }

        Ok(Self {
            paths: raw.paths,
            modes: raw.modes,
        })
    }

    pub fn from_parts(paths: Vec<DisplayPath>, modes: Vec<DisplayMode>) -> Self {
        Self { paths, modes }
    }

    pub fn into_parts(self) -> (Vec<DisplayPath>, Vec<DisplayMode>) {
        (self.paths, self.modes)
    }

    pub fn paths(&self) -> &[DisplayPath] {
        &self.paths
    }

    pub fn modes(&self) -> &[DisplayMode] {
        &self.modes
    }

    pub fn path_count(&self) -> usize {
        self.paths.len()
    }

    pub fn path(&self, index: usize) -> Option<&DisplayPath> {
        self.paths.get(index)
    }

    pub(crate) fn path_mut(&mut self, index: usize) -> Option<&mut DisplayPath> {
        self.paths.get_mut(index)
    }

    /// Mode at `index` if it is set, in range and tagged as `kind`.
    pub(crate) fn mode_mut(
        &mut self,
        index: ModeIndex,
        kind: ModeKind,
    ) -> Option<&mut DisplayMode> {
        if index.is_invalid() {
            return None;
        }
        self.modes
            .get_mut(usize::from(index.offset()))
            .filter(|mode| mode.kind() == kind)
    }

    fn mode(&self, index: ModeIndex, kind: ModeKind) -> Option<&DisplayMode> {
        if index.is_invalid() {
            return None;
        }
        self.modes
            .get(usize::from(index.offset()))
            .filter(|mode| mode.kind() == kind)
    }

    /// Source mode of a path, if its index is in range and tagged as a source.
    pub fn source_mode(&self, path_index: usize) -> Option<&SourceMode> {
        let path = self.path(path_index)?;
        self.mode(path.source.mode_index, ModeKind::Source)?
            .as_source()
    }

    /// Target mode of a path, if its index is in range and tagged as a target.
    pub fn target_mode(&self, path_index: usize) -> Option<&TargetMode> {
        let path = self.path(path_index)?;
        self.mode(path.target.mode_index, ModeKind::Target)?
            .as_target()
    }

    /// Desktop resolution of a path, falling back to the signal's active size.
    pub fn resolution(&self, path_index: usize) -> Resolution {
        if let Some(mode) = self.source_mode(path_index) {
            if mode.width != 0 {
                return Resolution::new(mode.width, mode.height);
            }
        }

        self.target_mode(path_index)
            .map(|mode| mode.signal.active_size)
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display::fake::{sample_topology, FakeDisplayConfig};
    use crate::display::{BufferSizes, ModePayload, RationalRate, RawConfig};

    #[test]
    fn test_load_active_topology() {
        let fake = FakeDisplayConfig::new(sample_topology());

        let snapshot = Snapshot::load(&fake).unwrap();
        assert_eq!(snapshot.path_count(), 2);
        assert_eq!(snapshot.modes().len(), 4);
        assert_eq!(snapshot.resolution(0), Resolution::new(1920, 1080));
        assert_eq!(snapshot.resolution(1), Resolution::new(2560, 1440));
        assert_eq!(
            snapshot.target_mode(1).unwrap().signal.v_sync_freq,
            RationalRate::new(60000, 1001)
        );
    }

    #[test]
    fn test_sizing_failure() {
        let fake = FakeDisplayConfig::new(sample_topology());
        fake.set_sizes_status(StatusCode(31));

        let err = Snapshot::load(&fake).unwrap_err();
        assert!(matches!(
            err,
            DisplayConfigError::QueryFailed {
                stage: QueryStage::BufferSizes,
                code: StatusCode(31)
            }
        ));
    }

    #[test]
    fn test_fetch_failure_after_sizing_yields_no_snapshot() {
        let fake = FakeDisplayConfig::new(sample_topology());
        fake.set_query_status(StatusCode::INVALID_PARAMETER);

        let err = Snapshot::load(&fake).unwrap_err();
        assert!(matches!(
            err,
            DisplayConfigError::QueryFailed {
                stage: QueryStage::Fetch,
                code: StatusCode::INVALID_PARAMETER
            }
        ));
        assert_eq!(fake.query_calls(), 1);
        assert!(fake.applied().is_empty());
    }

    #[test]
    fn test_hotplug_between_calls_is_not_truncated() {
        let fake = FakeDisplayConfig::new(sample_topology());
        fake.report_sizes(BufferSizes { paths: 1, modes: 2 });

        let err = Snapshot::load(&fake).unwrap_err();
        assert!(matches!(
            err,
            DisplayConfigError::QueryFailed {
                stage: QueryStage::Fetch,
                code: StatusCode::INSUFFICIENT_BUFFER
            }
        ));
    }

    #[test]
    fn test_shrunk_topology_is_reported_as_failure() {
        let fake = FakeDisplayConfig::new(sample_topology());
        fake.report_sizes(BufferSizes { paths: 3, modes: 6 });

        assert!(matches!(
            Snapshot::load(&fake),
            Err(DisplayConfigError::QueryFailed {
                stage: QueryStage::Fetch,
                ..
            })
        ));
    }

    #[test]
    fn test_mode_lookup_checks_role_and_bounds() {
        let RawConfig { mut paths, modes } = sample_topology();
        // point the source role at a target mode, and the target role past the end
        paths[0].source.mode_index = paths[0].target.mode_index;
        paths[1].target.mode_index = ModeIndex::from_raw(0x0001_0009);
        let snapshot = Snapshot::from_parts(paths, modes);

        assert!(snapshot.source_mode(0).is_none());
        assert!(snapshot.target_mode(0).is_some());
        assert!(snapshot.target_mode(1).is_none());
        assert!(snapshot.target_mode(7).is_none());
        assert_eq!(snapshot.resolution(0), Resolution::new(1920, 1080));
        assert!(matches!(snapshot.modes()[1].payload, ModePayload::Target(_)));
    }

    #[test]
    fn test_resolution_without_modes_is_zero() {
        let RawConfig { mut paths, modes } = sample_topology();
        paths[0].source.mode_index = ModeIndex::INVALID;
        paths[0].target.mode_index = ModeIndex::INVALID;
        let snapshot = Snapshot::from_parts(paths, modes);

        assert_eq!(snapshot.resolution(0), Resolution::default());
    }

    #[test]
    fn test_unset_index_never_resolves_in_large_mode_table() {
        let RawConfig { mut paths, .. } = sample_topology();
        paths[0].source.mode_index = ModeIndex::INVALID;
        paths[0].target.mode_index = ModeIndex::INVALID;
        // offset 0xFFFF is in range here
        let modes = vec![DisplayMode::source(Default::default(), Default::default()); 0x1_0000];
        let mut snapshot = Snapshot::from_parts(paths, modes);

        assert!(snapshot.source_mode(0).is_none());
        assert!(snapshot.target_mode(0).is_none());
        assert!(snapshot
            .mode_mut(ModeIndex::INVALID, ModeKind::Source)
            .is_none());
        assert!(snapshot
            .mode_mut(ModeIndex::from_raw(0xFFFF), ModeKind::Source)
            .is_some());
    }
}
