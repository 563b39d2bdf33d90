use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::RationalRate;

/// Opaque 64-bit handle of a display adapter, split the way the OS hands it out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct AdapterId {
    pub low_part: u32,
    pub high_part: i32,
}

/// Adapter plus adapter-local id. Identifies a path source, a path target or a mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct DeviceIdentity {
    pub adapter: AdapterId,
    pub id: u32,
}

/// Index of a mode record, as stored in a path.
///
/// The low 16 bits are the offset into the snapshot's mode array. The high 16 bits
/// carry other data (e.g. a clone group or a desktop image index) and never take
/// part in indexing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ModeIndex(u32);

impl ModeIndex {
    pub const INVALID: ModeIndex = ModeIndex(u32::MAX);

    pub const fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    pub const fn raw(self) -> u32 {
        self.0
    }

    pub const fn offset(self) -> u16 {
        (self.0 & 0xFFFF) as u16
    }

    pub const fn high_bits(self) -> u16 {
        (self.0 >> 16) as u16
    }

    pub const fn is_invalid(self) -> bool {
        self.0 == Self::INVALID.0
    }
}

impl Default for ModeIndex {
    fn default() -> Self {
        Self::INVALID
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PathSource {
    pub identity: DeviceIdentity,
    pub mode_index: ModeIndex,
    pub status_flags: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PathTarget {
    pub identity: DeviceIdentity,
    pub mode_index: ModeIndex,
    pub refresh_rate: RationalRate,
    // Passed back to the OS untouched
    pub output_technology: i32,
    pub rotation: i32,
    pub scaling: i32,
    pub scan_line_ordering: i32,
    pub target_available: bool,
    pub status_flags: u32,
}

/// One active source -> target connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DisplayPath {
    pub source: PathSource,
    pub target: PathTarget,
    pub flags: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Resolution {
    pub width: u32,
    pub height: u32,
}

impl Resolution {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid resolution '{0}', expected WIDTHxHEIGHT")]
pub struct ParseResolutionError(String);

impl FromStr for Resolution {
    type Err = ParseResolutionError;

    /// Parses `1920x1080`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseResolutionError(s.to_string());

        let (width, height) = s
            .trim()
            .split_once(|c: char| c == 'x' || c == 'X')
            .ok_or_else(err)?;
        let width: u32 = width.trim().parse().map_err(|_| err())?;
        let height: u32 = height.trim().parse().map_err(|_| err())?;

        if width == 0 || height == 0 {
            return Err(err());
        }

        Ok(Self { width, height })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

/// Pixel geometry of a desktop source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SourceMode {
    pub width: u32,
    pub height: u32,
    pub pixel_format: i32,
    pub position: Point,
}

/// Timing of the signal sent to a monitor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct VideoSignalInfo {
    pub pixel_rate: u64,
    pub h_sync_freq: RationalRate,
    pub v_sync_freq: RationalRate,
    pub active_size: Resolution,
    pub total_size: Resolution,
    pub video_standard: u32,
    pub scan_line_ordering: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TargetMode {
    pub signal: VideoSignalInfo,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DesktopImageInfo {
    pub path_source_size: Point,
    pub desktop_image_region: Rect,
    pub desktop_image_clip: Rect,
}

/// Role of a mode record. Selects which payload is meaningful.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModeKind {
    Source,
    Target,
    DesktopImage,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModePayload {
    Source(SourceMode),
    Target(TargetMode),
    DesktopImage(DesktopImageInfo),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayMode {
    pub identity: DeviceIdentity,
    pub payload: ModePayload,
}

impl DisplayMode {
    pub fn source(identity: DeviceIdentity, mode: SourceMode) -> Self {
        Self {
            identity,
            payload: ModePayload::Source(mode),
        }
    }

    pub fn target(identity: DeviceIdentity, mode: TargetMode) -> Self {
        Self {
            identity,
            payload: ModePayload::Target(mode),
        }
    }

    pub fn kind(&self) -> ModeKind {
        match self.payload {
            ModePayload::Source(_) => ModeKind::Source,
            ModePayload::Target(_) => ModeKind::Target,
            ModePayload::DesktopImage(_) => ModeKind::DesktopImage,
        }
    }

    pub fn as_source(&self) -> Option<&SourceMode> {
        match &self.payload {
            ModePayload::Source(mode) => Some(mode),
            _ => None,
        }
    }

    pub fn as_source_mut(&mut self) -> Option<&mut SourceMode> {
        match &mut self.payload {
            ModePayload::Source(mode) => Some(mode),
            _ => None,
        }
    }

    pub fn as_target(&self) -> Option<&TargetMode> {
        match &self.payload {
            ModePayload::Target(mode) => Some(mode),
            _ => None,
        }
    }

    pub fn as_target_mut(&mut self) -> Option<&mut TargetMode> {
        match &mut self.payload {
            ModePayload::Target(mode) => Some(mode),
            _ => None,
        }
    }
}
