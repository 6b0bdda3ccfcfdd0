use serde::{Deserialize, Serialize};

/// Global handler configuration.
///
/// The response timeout is fixed and not part of the configuration.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    /// Capacity of the channel carrying events to the application.
    pub event_buffer: usize,
    /// Maximum level of emitted log records (`error`, `warn`, `info`,
    /// `debug` or `trace`).
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            event_buffer: 64,
            log_level: "info".to_string(),
        }
    }
}
