//! Observable page state exposed to automated browser checks.
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FxSnapshot {
    /// Theme currently held by the controller.
    pub theme: Option<String>,
    /// Theme found in durable storage.
    pub stored_theme: Option<String>,
    /// Stat cards whose entrance has not played yet.
    pub entrances_pending: usize,
    pub counters_running: usize,
    pub counters_finished: usize,
    pub pulses_active: usize,
}
