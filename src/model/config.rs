use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::geometry::Axis;

/// Configuration read from `corkboard.toml`. Every section is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub activation: ActivationConstraint,
    #[serde(default)]
    pub keyboard: KeyboardCodes,
    #[serde(default)]
    pub sorting: SortingConfig,
}

/// When a pointer or touch press turns into a drag
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivationConstraint {
    /// Press duration (ms) after which the drag starts
    #[serde(default = "default_delay_ms")]
    pub delay_ms: u64,
    /// Movement (px) that starts the drag before the delay elapses
    #[serde(default = "default_distance")]
    pub distance: f64,
    /// Movement (px) that aborts a pending press
    #[serde(default = "default_tolerance")]
    pub tolerance: f64,
}

impl ActivationConstraint {
    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }
}

impl Default for ActivationConstraint {
    fn default() -> Self {
        ActivationConstraint {
            delay_ms: default_delay_ms(),
            distance: default_distance(),
            tolerance: default_tolerance(),
        }
    }
}

fn default_delay_ms() -> u64 {
    250
}

fn default_distance() -> f64 {
    3.0
}

fn default_tolerance() -> f64 {
    10.0
}

/// Key codes (DOM `KeyboardEvent.code` names) driving keyboard drags
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyboardCodes {
    #[serde(default = "default_start_codes")]
    pub start: Vec<String>,
    #[serde(default = "default_cancel_codes")]
    pub cancel: Vec<String>,
    #[serde(default = "default_end_codes")]
    pub end: Vec<String>,
}

impl Default for KeyboardCodes {
    fn default() -> Self {
        KeyboardCodes {
            start: default_start_codes(),
            cancel: default_cancel_codes(),
            end: default_end_codes(),
        }
    }
}

fn default_start_codes() -> Vec<String> {
    vec!["Space".into(), "Enter".into()]
}

fn default_cancel_codes() -> Vec<String> {
    vec!["Escape".into()]
}

fn default_end_codes() -> Vec<String> {
    vec!["Space".into(), "Enter".into()]
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortingConfig {
    /// Direction items are stacked inside a list. Decides which half of a
    /// sibling counts as "after" it when an item enters a new list.
    #[serde(default)]
    pub item_axis: Axis,
}
