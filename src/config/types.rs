use serde::{Deserialize, Serialize};

/// Store tuning knobs.
///
/// ```toml
/// notification_capacity = 128
/// action_capacity = 32
/// log_transitions = true
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Snapshots buffered per subscriber before the oldest are dropped (default: 64).
    #[serde(default = "default_notification_capacity")]
    pub notification_capacity: usize,
    /// Actions buffered per action subscriber before the oldest are dropped (default: 64).
    #[serde(default = "default_action_capacity")]
    pub action_capacity: usize,
    /// Log every adopted transition at debug level (default: false).
    #[serde(default)]
    pub log_transitions: bool,
}

fn default_notification_capacity() -> usize {
    64
}

fn default_action_capacity() -> usize {
    64
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            notification_capacity: default_notification_capacity(),
            action_capacity: default_action_capacity(),
            log_transitions: false,
        }
    }
}
