//! In-memory display configuration for tests that run without a display subsystem.

use std::collections::HashMap;

use parking_lot::Mutex;

use super::{
    AdapterId, BufferSizes, CommitFlags, DeviceIdentity, DeviceNameRequest, DisplayConfigApi,
    DisplayMode, DisplayPath, ModeIndex, PathSource, PathTarget, Point, RationalRate, RawConfig,
    Resolution, SourceMode, StatusCode, TargetMode, VideoSignalInfo,
};

/// What the fake received in one `apply_config` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppliedConfig {
    pub paths: Vec<DisplayPath>,
    pub modes: Vec<DisplayMode>,
    pub flags: CommitFlags,
}

#[derive(Debug, Default)]
struct FakeState {
    topology: RawConfig,
    target_names: HashMap<DeviceIdentity, String>,
    source_names: HashMap<DeviceIdentity, String>,
    reported_sizes: Option<BufferSizes>,
    sizes_status: StatusCode,
    query_status: StatusCode,
    name_status: StatusCode,
    apply_status: StatusCode,
    query_calls: usize,
    name_calls: usize,
    applied: Vec<AppliedConfig>,
}

#[derive(Debug, Default)]
pub struct FakeDisplayConfig {
    state: Mutex<FakeState>,
}

impl FakeDisplayConfig {
    pub fn new(topology: RawConfig) -> Self {
        Self {
            state: Mutex::new(FakeState {
                topology,
                ..Default::default()
            }),
        }
    }

    /// Two monitors: an ASUS on `\\.\DISPLAY1` and a Dell on `\\.\DISPLAY2`.
    pub fn sample() -> Self {
        let topology = sample_topology();
        let targets: Vec<_> = topology.paths.iter().map(|p| p.target.identity).collect();
        let sources: Vec<_> = topology.paths.iter().map(|p| p.source.identity).collect();

        Self::new(topology)
            .with_target_name(targets[0], "ASUS VW193D")
            .with_target_name(targets[1], "Dell U2415")
            .with_source_name(sources[0], r"\\.\DISPLAY1")
            .with_source_name(sources[1], r"\\.\DISPLAY2")
    }

    pub fn with_target_name(self, identity: DeviceIdentity, name: &str) -> Self {
        self.state
            .lock()
            .target_names
            .insert(identity, name.to_string());
        self
    }

    pub fn with_source_name(self, identity: DeviceIdentity, name: &str) -> Self {
        self.state
            .lock()
            .source_names
            .insert(identity, name.to_string());
        self
    }

    /// Report these sizes instead of the real ones, as if the topology changed
    /// right after sizing.
    pub fn report_sizes(&self, sizes: BufferSizes) {
        self.state.lock().reported_sizes = Some(sizes);
    }

    pub fn set_sizes_status(&self, status: StatusCode) {
        self.state.lock().sizes_status = status;
    }

    pub fn set_query_status(&self, status: StatusCode) {
        self.state.lock().query_status = status;
    }

    pub fn set_name_status(&self, status: StatusCode) {
        self.state.lock().name_status = status;
    }

    pub fn set_apply_status(&self, status: StatusCode) {
        self.state.lock().apply_status = status;
    }

    pub fn query_calls(&self) -> usize {
        self.state.lock().query_calls
    }

    pub fn name_calls(&self) -> usize {
        self.state.lock().name_calls
    }

    pub fn applied(&self) -> Vec<AppliedConfig> {
        self.state.lock().applied.clone()
    }
}

impl DisplayConfigApi for FakeDisplayConfig {
    fn buffer_sizes(&self) -> Result<BufferSizes, StatusCode> {
        let state = self.state.lock();
        if !state.sizes_status.is_success() {
            return Err(state.sizes_status);
        }

        Ok(state.reported_sizes.unwrap_or(BufferSizes {
            paths: state.topology.paths.len(),
            modes: state.topology.modes.len(),
        }))
    }

    fn query_config(&self, sizes: BufferSizes) -> Result<RawConfig, StatusCode> {
        let mut state = self.state.lock();
        state.query_calls += 1;

        if !state.query_status.is_success() {
            return Err(state.query_status);
        }

        if state.topology.paths.len() > sizes.paths || state.topology.modes.len() > sizes.modes {
            return Err(StatusCode::INSUFFICIENT_BUFFER);
        }

        Ok(state.topology.clone())
    }

    fn device_name(&self, request: DeviceNameRequest) -> Result<String, StatusCode> {
        let mut state = self.state.lock();
        state.name_calls += 1;

        if !state.name_status.is_success() {
            return Err(state.name_status);
        }

        let name = match request {
            DeviceNameRequest::Target(identity) => state.target_names.get(&identity),
            DeviceNameRequest::Source(identity) => state.source_names.get(&identity),
        };

        // The OS fills an empty name for monitors without EDID data
        Ok(name.cloned().unwrap_or_default())
    }

    fn apply_config(
        &self,
        paths: &[DisplayPath],
        modes: &[DisplayMode],
        flags: CommitFlags,
    ) -> StatusCode {
        let mut state = self.state.lock();
        state.applied.push(AppliedConfig {
            paths: paths.to_vec(),
            modes: modes.to_vec(),
            flags,
        });

        state.apply_status
    }
}

/// Two active paths on one adapter. Path 0 runs 1920x1080 at 60 Hz, path 1
/// runs 2560x1440 at 59.94 Hz and uses the high bits of its target index.
pub fn sample_topology() -> RawConfig {
    let adapter = AdapterId {
        low_part: 0x0000_D2A1,
        high_part: 0,
    };
    let identity = |id| DeviceIdentity { adapter, id };

    let path = |index: u32, source_mode: u32, target_mode: u32| DisplayPath {
        source: PathSource {
            identity: identity(index),
            mode_index: ModeIndex::from_raw(source_mode),
            status_flags: 1,
        },
        target: PathTarget {
            identity: identity(0x1100 + index),
            mode_index: ModeIndex::from_raw(target_mode),
            refresh_rate: RationalRate::default(),
            output_technology: 10,
            rotation: 1,
            scaling: 1,
            scan_line_ordering: 1,
            target_available: true,
            status_flags: 1,
        },
        flags: 1,
    };

    let source_mode = |index: u32, width, height, x| {
        DisplayMode::source(
            identity(index),
            SourceMode {
                width,
                height,
                pixel_format: 4,
                position: Point { x, y: 0 },
            },
        )
    };

    let target_mode = |index: u32, pixel_rate, size: Resolution, v_sync| {
        DisplayMode::target(
            identity(0x1100 + index),
            TargetMode {
                signal: VideoSignalInfo {
                    pixel_rate,
                    h_sync_freq: RationalRate::new(67_500, 1),
                    v_sync_freq: v_sync,
                    active_size: size,
                    total_size: Resolution::new(size.width + 280, size.height + 45),
                    video_standard: 255,
                    scan_line_ordering: 1,
                },
            },
        )
    };

    let mut paths = vec![path(0, 0, 1), path(1, 2, 0x0001_0003)];
    paths[0].target.refresh_rate = RationalRate::new(60, 1);
    paths[1].target.refresh_rate = RationalRate::new(60000, 1001);

    RawConfig {
        paths,
        modes: vec![
            source_mode(0, 1920, 1080, 0),
            target_mode(0, 148_500_000, Resolution::new(1920, 1080), RationalRate::new(60, 1)),
            source_mode(1, 2560, 1440, 1920),
            target_mode(
                1,
                241_500_000,
                Resolution::new(2560, 1440),
                RationalRate::new(60000, 1001),
            ),
        ],
    }
}
