use crate::display::{
    BufferSizes, CommitFlags, DeviceNameRequest, DisplayConfigApi, DisplayMode, DisplayPath,
    RawConfig, StatusCode,
};

/// Stand-in for platforms without a display configuration API.
#[derive(Debug, Default)]
pub struct UnsupportedDisplayConfig {}

impl UnsupportedDisplayConfig {
    pub fn new() -> Self {
        Self {}
    }
}

impl DisplayConfigApi for UnsupportedDisplayConfig {
    fn buffer_sizes(&self) -> Result<BufferSizes, StatusCode> {
        Err(StatusCode::NOT_SUPPORTED)
    }

    fn query_config(&self, _sizes: BufferSizes) -> Result<RawConfig, StatusCode> {
        Err(StatusCode::NOT_SUPPORTED)
    }

    fn device_name(&self, _request: DeviceNameRequest) -> Result<String, StatusCode> {
        Err(StatusCode::NOT_SUPPORTED)
    }

    fn apply_config(
        &self,
        _paths: &[DisplayPath],
        _modes: &[DisplayMode],
        _flags: CommitFlags,
    ) -> StatusCode {
        StatusCode::NOT_SUPPORTED
    }
}
