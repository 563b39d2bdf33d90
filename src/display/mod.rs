//! Display topology model and the load, locate, mutate, commit cycle.

mod api;
mod commit;
mod error;
pub mod fake;
mod listing;
mod locate;
mod mutate;
pub mod names;
mod rational;
mod snapshot;
mod types;

pub use api::*;
pub use commit::{commit, validate, COMMIT_FLAGS, VALIDATE_FLAGS};
pub use error::*;
pub use listing::{describe, MonitorEntry};
pub use locate::{locate, MatchPolicy};
pub use mutate::{apply_rate, MutationOutcome};
pub use rational::*;
pub use snapshot::Snapshot;
pub use types::*;
