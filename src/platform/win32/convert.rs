//! Conversions between the Win32 CCD structs and the crate's display model.

use std::mem::zeroed;

use windows::Win32::Devices::Display::*;
use windows::Win32::Foundation::*;

use crate::display::{
    AdapterId, DesktopImageInfo, DeviceIdentity, DisplayMode, DisplayPath, ModeIndex,
    ModePayload, PathSource, PathTarget, Point, RationalRate, Rect, Resolution, SourceMode,
    TargetMode, VideoSignalInfo,
};

pub fn identity(adapter: LUID, id: u32) -> DeviceIdentity {
    DeviceIdentity {
        adapter: AdapterId {
            low_part: adapter.LowPart,
            high_part: adapter.HighPart,
        },
        id,
    }
}

pub fn luid(adapter: AdapterId) -> LUID {
    LUID {
        LowPart: adapter.low_part,
        HighPart: adapter.high_part,
    }
}

fn rational(raw: DISPLAYCONFIG_RATIONAL) -> RationalRate {
    RationalRate::new(raw.Numerator, raw.Denominator)
}

fn raw_rational(rate: RationalRate) -> DISPLAYCONFIG_RATIONAL {
    DISPLAYCONFIG_RATIONAL {
        Numerator: rate.numerator,
        Denominator: rate.denominator,
    }
}

fn region(raw: DISPLAYCONFIG_2DREGION) -> Resolution {
    Resolution::new(raw.cx, raw.cy)
}

fn raw_region(size: Resolution) -> DISPLAYCONFIG_2DREGION {
    DISPLAYCONFIG_2DREGION {
        cx: size.width,
        cy: size.height,
    }
}

fn point(raw: POINTL) -> Point {
    Point { x: raw.x, y: raw.y }
}

fn raw_point(point: Point) -> POINTL {
    POINTL {
        x: point.x,
        y: point.y,
    }
}

fn rect(raw: RECTL) -> Rect {
    Rect {
        left: raw.left,
        top: raw.top,
        right: raw.right,
        bottom: raw.bottom,
    }
}

fn raw_rect(rect: Rect) -> RECTL {
    RECTL {
        left: rect.left,
        top: rect.top,
        right: rect.right,
        bottom: rect.bottom,
    }
}

pub fn path_from_raw(raw: &DISPLAYCONFIG_PATH_INFO) -> DisplayPath {
    let source = &raw.sourceInfo;
    let target = &raw.targetInfo;

    // SAFETY: every variant of these unions is a plain u32, so reading the index is always defined
    let (source_index, target_index) =
        unsafe { (source.Anonymous.modeInfoIdx, target.Anonymous.modeInfoIdx) };

    DisplayPath {
        source: PathSource {
            identity: identity(source.adapterId, source.id),
            mode_index: ModeIndex::from_raw(source_index),
            status_flags: source.statusFlags,
        },
        target: PathTarget {
            identity: identity(target.adapterId, target.id),
            mode_index: ModeIndex::from_raw(target_index),
            refresh_rate: rational(target.refreshRate),
            output_technology: target.outputTechnology.0,
            rotation: target.rotation.0,
            scaling: target.scaling.0,
            scan_line_ordering: target.scanLineOrdering.0,
            target_available: target.targetAvailable.as_bool(),
            status_flags: target.statusFlags,
        },
        flags: raw.flags,
    }
}

pub fn path_to_raw(path: &DisplayPath) -> DISPLAYCONFIG_PATH_INFO {
    // SAFETY: all-zero is a valid value for this plain C struct
    let mut raw: DISPLAYCONFIG_PATH_INFO = unsafe { zeroed() };

    let source = &mut raw.sourceInfo;
    source.adapterId = luid(path.source.identity.adapter);
    source.id = path.source.identity.id;
    source.Anonymous.modeInfoIdx = path.source.mode_index.raw();
    source.statusFlags = path.source.status_flags;

    let target = &mut raw.targetInfo;
    target.adapterId = luid(path.target.identity.adapter);
    target.id = path.target.identity.id;
    target.Anonymous.modeInfoIdx = path.target.mode_index.raw();
    target.outputTechnology = DISPLAYCONFIG_VIDEO_OUTPUT_TECHNOLOGY(path.target.output_technology);
    target.rotation = DISPLAYCONFIG_ROTATION(path.target.rotation);
    target.scaling = DISPLAYCONFIG_SCALING(path.target.scaling);
    target.refreshRate = raw_rational(path.target.refresh_rate);
    target.scanLineOrdering = DISPLAYCONFIG_SCANLINE_ORDERING(path.target.scan_line_ordering);
    target.targetAvailable = BOOL::from(path.target.target_available);
    target.statusFlags = path.target.status_flags;

    raw.flags = path.flags;
    raw
}

/// Returns `None` for a mode type this crate does not know.
pub fn mode_from_raw(raw: &DISPLAYCONFIG_MODE_INFO) -> Option<DisplayMode> {
    // SAFETY: the union is only read through the variant named by infoType
    let payload = unsafe {
        match raw.infoType {
            DISPLAYCONFIG_MODE_INFO_TYPE_SOURCE => {
                let mode = &raw.Anonymous.sourceMode;
                ModePayload::Source(SourceMode {
                    width: mode.width,
                    height: mode.height,
                    pixel_format: mode.pixelFormat.0,
                    position: point(mode.position),
                })
            }
            DISPLAYCONFIG_MODE_INFO_TYPE_TARGET => {
                let signal = &raw.Anonymous.targetMode.targetVideoSignalInfo;
                ModePayload::Target(TargetMode {
                    signal: VideoSignalInfo {
                        pixel_rate: signal.pixelRate,
                        h_sync_freq: rational(signal.hSyncFreq),
                        v_sync_freq: rational(signal.vSyncFreq),
                        active_size: region(signal.activeSize),
                        total_size: region(signal.totalSize),
                        video_standard: signal.Anonymous.videoStandard,
                        scan_line_ordering: signal.scanLineOrdering.0,
                    },
                })
            }
            DISPLAYCONFIG_MODE_INFO_TYPE_DESKTOP_IMAGE => {
                let info = &raw.Anonymous.desktopImageInfo;
                ModePayload::DesktopImage(DesktopImageInfo {
                    path_source_size: point(info.PathSourceSize),
                    desktop_image_region: rect(info.DesktopImageRegion),
                    desktop_image_clip: rect(info.DesktopImageClip),
                })
            }
            _ => return None,
        }
    };

    Some(DisplayMode {
        identity: identity(raw.adapterId, raw.id),
        payload,
    })
}

pub fn mode_to_raw(mode: &DisplayMode) -> DISPLAYCONFIG_MODE_INFO {
    // SAFETY: all-zero is a valid value for this plain C struct
    let mut raw: DISPLAYCONFIG_MODE_INFO = unsafe { zeroed() };
    raw.id = mode.identity.id;
    raw.adapterId = luid(mode.identity.adapter);

    match &mode.payload {
        ModePayload::Source(source) => {
            raw.infoType = DISPLAYCONFIG_MODE_INFO_TYPE_SOURCE;
            raw.Anonymous.sourceMode = DISPLAYCONFIG_SOURCE_MODE {
                width: source.width,
                height: source.height,
                pixelFormat: DISPLAYCONFIG_PIXELFORMAT(source.pixel_format),
                position: raw_point(source.position),
            };
        }
        ModePayload::Target(target) => {
            let signal = &target.signal;
            // SAFETY: all-zero is a valid value for this plain C struct
            let mut info: DISPLAYCONFIG_VIDEO_SIGNAL_INFO = unsafe { zeroed() };
            info.pixelRate = signal.pixel_rate;
            info.hSyncFreq = raw_rational(signal.h_sync_freq);
            info.vSyncFreq = raw_rational(signal.v_sync_freq);
            info.activeSize = raw_region(signal.active_size);
            info.totalSize = raw_region(signal.total_size);
            info.Anonymous.videoStandard = signal.video_standard;
            info.scanLineOrdering = DISPLAYCONFIG_SCANLINE_ORDERING(signal.scan_line_ordering);

            raw.infoType = DISPLAYCONFIG_MODE_INFO_TYPE_TARGET;
            raw.Anonymous.targetMode = DISPLAYCONFIG_TARGET_MODE {
                targetVideoSignalInfo: info,
            };
        }
        ModePayload::DesktopImage(image) => {
            raw.infoType = DISPLAYCONFIG_MODE_INFO_TYPE_DESKTOP_IMAGE;
            raw.Anonymous.desktopImageInfo = DISPLAYCONFIG_DESKTOP_IMAGE_INFO {
                PathSourceSize: raw_point(image.path_source_size),
                DesktopImageRegion: raw_rect(image.desktop_image_region),
                DesktopImageClip: raw_rect(image.desktop_image_clip),
            };
        }
    }

    raw
}

/// Trim the UTF-16 string to remove NULL at end. Works even if no NULL is found.
pub fn trim_end_null(s: &[u16]) -> &[u16] {
    match s.iter().position(|&c| c == 0) {
        Some(end) => &s[..end],
        None => s,
    }
}
