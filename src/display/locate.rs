use serde::{Deserialize, Serialize};

use super::{names, DisplayConfigApi, DisplayConfigError, Result, Snapshot};

/// How a name token picks between several matching monitors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchPolicy {
    /// The first path in topology order wins.
    #[default]
    FirstMatch,
    /// More than one match is an error.
    Unique,
}

/// Find the path an operator means by `token`.
///
/// An in-range index always wins over a name. Otherwise the token is matched
/// case-insensitively against each monitor's friendly name.
pub fn locate<A: DisplayConfigApi + ?Sized>(
    api: &A,
    snapshot: &Snapshot,
    token: &str,
    policy: MatchPolicy,
) -> Result<usize> {
    if let Ok(index) = token.trim().parse::<usize>() {
        if index < snapshot.path_count() {
            return Ok(index);
        }
    }

    let needle = token.to_lowercase();
    let mut candidates = Vec::new();

    for index in 0..snapshot.path_count() {
        let name = names::resolve_target_name(api, snapshot, index);
        if name.is_empty() || !name.to_lowercase().contains(&needle) {
            continue;
        }

        log::debug!("Monitor '{name}' at path {index} matches '{token}'");

        match policy {
            MatchPolicy::FirstMatch => return Ok(index),
            MatchPolicy::Unique => candidates.push(index),
        }
    }

    match candidates.as_slice() {
        [] => Err(DisplayConfigError::NotFound {
            token: token.to_string(),
        }),
        [index] => Ok(*index),
        _ => Err(DisplayConfigError::Ambiguous {
            token: token.to_string(),
            candidates,
        }),
    }
}
