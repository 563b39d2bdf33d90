use std::mem::{size_of, zeroed};

use windows::Win32::Devices::Display::*;
use windows::Win32::Foundation::*;

use super::convert::{luid, mode_from_raw, mode_to_raw, path_from_raw, path_to_raw, trim_end_null};
use crate::display::{
    BufferSizes, CommitFlags, DeviceIdentity, DeviceNameRequest, DisplayConfigApi, DisplayMode,
    DisplayPath, RawConfig, StatusCode,
};

/// The CCD entry points of user32.
#[derive(Debug, Default)]
pub struct Win32DisplayConfig {}

impl Win32DisplayConfig {
    pub fn new() -> Self {
        Self {}
    }
}

/// user32 reports status either as `WIN32_ERROR` or as a bare `LONG`.
trait IntoStatus {
    fn into_status(self) -> StatusCode;
}

impl IntoStatus for WIN32_ERROR {
    fn into_status(self) -> StatusCode {
        StatusCode(self.0 as i32)
    }
}

impl IntoStatus for i32 {
    fn into_status(self) -> StatusCode {
        StatusCode(self)
    }
}

fn check(status: StatusCode) -> Result<(), StatusCode> {
    if status.is_success() {
        Ok(())
    } else {
        Err(status)
    }
}

impl DisplayConfigApi for Win32DisplayConfig {
    fn buffer_sizes(&self) -> Result<BufferSizes, StatusCode> {
        let mut paths = 0u32;
        let mut modes = 0u32;

        // SAFETY: both out pointers refer to live locals
        let status = unsafe {
            GetDisplayConfigBufferSizes(QDC_ONLY_ACTIVE_PATHS, &mut paths, &mut modes)
        }
        .into_status();
        check(status)?;

        Ok(BufferSizes {
            paths: paths as usize,
            modes: modes as usize,
        })
    }

    fn query_config(&self, sizes: BufferSizes) -> Result<RawConfig, StatusCode> {
        let mut path_count =
            u32::try_from(sizes.paths).map_err(|_| StatusCode::INVALID_PARAMETER)?;
        let mut mode_count =
            u32::try_from(sizes.modes).map_err(|_| StatusCode::INVALID_PARAMETER)?;

        // SAFETY: all-zero is a valid value for these plain C structs
        let (mut raw_paths, mut raw_modes) = unsafe {
            (
                vec![zeroed::<DISPLAYCONFIG_PATH_INFO>(); sizes.paths],
                vec![zeroed::<DISPLAYCONFIG_MODE_INFO>(); sizes.modes],
            )
        };

        // SAFETY: the counts passed in match the lengths of the buffers
        let status = unsafe {
            QueryDisplayConfig(
                QDC_ONLY_ACTIVE_PATHS,
                &mut path_count,
                raw_paths.as_mut_ptr(),
                &mut mode_count,
                raw_modes.as_mut_ptr(),
                None,
            )
        }
        .into_status();
        check(status)?;

        // The OS lowers the counts to what it actually wrote
        raw_paths.truncate(path_count as usize);
        raw_modes.truncate(mode_count as usize);

        let paths = raw_paths.iter().map(path_from_raw).collect();
        let modes = raw_modes
            .iter()
            .map(mode_from_raw)
            .collect::<Option<Vec<_>>>()
            .ok_or(StatusCode::INVALID_DATA)?;

        Ok(RawConfig { paths, modes })
    }

    fn device_name(&self, request: DeviceNameRequest) -> Result<String, StatusCode> {
        match request {
            DeviceNameRequest::Target(identity) => target_name(identity),
            DeviceNameRequest::Source(identity) => source_name(identity),
        }
    }

    fn apply_config(
        &self,
        paths: &[DisplayPath],
        modes: &[DisplayMode],
        flags: CommitFlags,
    ) -> StatusCode {
        let raw_paths: Vec<_> = paths.iter().map(path_to_raw).collect();
        let raw_modes: Vec<_> = modes.iter().map(mode_to_raw).collect();

        // SAFETY: the slices outlive the call and carry their own lengths
        unsafe {
            SetDisplayConfig(
                Some(&raw_paths),
                Some(&raw_modes),
                SET_DISPLAY_CONFIG_FLAGS(flags.bits()),
            )
        }
        .into_status()
    }
}

fn header(
    kind: DISPLAYCONFIG_DEVICE_INFO_TYPE,
    size: usize,
    identity: DeviceIdentity,
) -> DISPLAYCONFIG_DEVICE_INFO_HEADER {
    DISPLAYCONFIG_DEVICE_INFO_HEADER {
        r#type: kind,
        size: size as u32,
        adapterId: luid(identity.adapter),
        id: identity.id,
    }
}

fn target_name(identity: DeviceIdentity) -> Result<String, StatusCode> {
    // SAFETY: all-zero is a valid value for this plain C struct
    let mut packet: DISPLAYCONFIG_TARGET_DEVICE_NAME = unsafe { zeroed() };
    packet.header = header(
        DISPLAYCONFIG_DEVICE_INFO_GET_TARGET_NAME,
        size_of::<DISPLAYCONFIG_TARGET_DEVICE_NAME>(),
        identity,
    );

    // SAFETY: the header sits at the start of the packet and announces its full size
    let status = unsafe { DisplayConfigGetDeviceInfo(&mut packet.header) }.into_status();
    check(status)?;

    Ok(String::from_utf16_lossy(trim_end_null(&packet.monitorFriendlyDeviceName)))
}

fn source_name(identity: DeviceIdentity) -> Result<String, StatusCode> {
    // SAFETY: all-zero is a valid value for this plain C struct
    let mut packet: DISPLAYCONFIG_SOURCE_DEVICE_NAME = unsafe { zeroed() };
    packet.header = header(
        DISPLAYCONFIG_DEVICE_INFO_GET_SOURCE_NAME,
        size_of::<DISPLAYCONFIG_SOURCE_DEVICE_NAME>(),
        identity,
    );

    // SAFETY: the header sits at the start of the packet and announces its full size
    let status = unsafe { DisplayConfigGetDeviceInfo(&mut packet.header) }.into_status();
    check(status)?;

    Ok(String::from_utf16_lossy(trim_end_null(&packet.viewGdiDeviceName)))
}
