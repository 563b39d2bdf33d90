use serde::Serialize;

use super::{names, DisplayConfigApi, RationalRate, Resolution, Snapshot};

/// One active path as shown to an operator.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonitorEntry {
    pub index: usize,
    pub source_name: String,
    pub name: String,
    pub resolution: Resolution,
    pub refresh_rate: RationalRate,
    pub refresh_hz: f64,
    /// v-sync of the linked target mode, if there is one
    pub v_sync: Option<RationalRate>,
}

pub fn describe<A: DisplayConfigApi + ?Sized>(api: &A, snapshot: &Snapshot) -> Vec<MonitorEntry> {
    snapshot
        .paths()
        .iter()
        .enumerate()
        .map(|(index, path)| MonitorEntry {
            index,
            source_name: names::resolve_source_name(api, snapshot, index),
            name: names::resolve_target_name(api, snapshot, index),
            resolution: snapshot.resolution(index),
            refresh_rate: path.target.refresh_rate,
            refresh_hz: path.target.refresh_rate.to_hz(),
            v_sync: snapshot
                .target_mode(index)
                .map(|mode| mode.signal.v_sync_freq),
        })
        .collect()
}

impl MonitorEntry {
    /// Multi-line text block used by `list`.
    pub fn to_text(&self) -> String {
        format!(
            "[{}] {}\n    Name: {}\n    Resolution: {}\n    Refresh: {}",
            self.index,
            self.source_name,
            names::display_name(&self.name),
            self.resolution,
            self.refresh_rate,
        )
    }
}
