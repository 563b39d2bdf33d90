use std::fmt;
use std::ops::BitOr;

use super::{DeviceIdentity, DisplayMode, DisplayPath};

/// Raw status returned by the display configuration API. Zero is success.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct StatusCode(pub i32);

impl StatusCode {
    pub const SUCCESS: StatusCode = StatusCode(0);
    pub const INVALID_DATA: StatusCode = StatusCode(13);
    pub const NOT_SUPPORTED: StatusCode = StatusCode(50);
    pub const INVALID_PARAMETER: StatusCode = StatusCode(87);
    pub const INSUFFICIENT_BUFFER: StatusCode = StatusCode(122);

    pub fn is_success(self) -> bool {
        self == Self::SUCCESS
    }
}

impl fmt::Display for StatusCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (0x{:08X})", self.0, self.0 as u32)
    }
}

/// Array lengths needed to hold the active topology.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BufferSizes {
    pub paths: usize,
    pub modes: usize,
}

/// Result of one topology fetch. The vectors hold exactly what the OS reported.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RawConfig {
    pub paths: Vec<DisplayPath>,
    pub modes: Vec<DisplayMode>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceNameRequest {
    /// Friendly monitor name, e.g. `DELL U2415`
    Target(DeviceIdentity),
    /// GDI device name, e.g. `\\.\DISPLAY1`
    Source(DeviceIdentity),
}

/// Flags for `SetDisplayConfig`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CommitFlags(pub u32);

impl CommitFlags {
    pub const USE_SUPPLIED_DISPLAY_CONFIG: CommitFlags = CommitFlags(0x0000_0020);
    pub const VALIDATE: CommitFlags = CommitFlags(0x0000_0040);
    pub const APPLY: CommitFlags = CommitFlags(0x0000_0080);
    pub const SAVE_TO_DATABASE: CommitFlags = CommitFlags(0x0000_0200);
    pub const ALLOW_CHANGES: CommitFlags = CommitFlags(0x0000_0400);

    pub const fn bits(self) -> u32 {
        self.0
    }

    pub const fn contains(self, other: CommitFlags) -> bool {
        self.0 & other.0 == other.0
    }
}

impl BitOr for CommitFlags {
    type Output = CommitFlags;

    fn bitor(self, rhs: CommitFlags) -> CommitFlags {
        CommitFlags(self.0 | rhs.0)
    }
}

/// The operating system's display configuration entry points.
///
/// Every call blocks until the OS answers. Implementations must not cache
/// anything between calls.
pub trait DisplayConfigApi {
    /// Buffer sizes for the currently active paths only.
    fn buffer_sizes(&self) -> Result<BufferSizes, StatusCode>;

    /// Fetch the active topology into buffers of the given sizes.
    fn query_config(&self, sizes: BufferSizes) -> Result<RawConfig, StatusCode>;

    fn device_name(&self, request: DeviceNameRequest) -> Result<String, StatusCode>;

    fn apply_config(
        &self,
        paths: &[DisplayPath],
        modes: &[DisplayMode],
        flags: CommitFlags,
    ) -> StatusCode;
}
