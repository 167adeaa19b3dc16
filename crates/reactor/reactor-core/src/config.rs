//! Reactor configuration.

use serde::{Deserialize, Serialize};

use crate::time::Timescale;

/// Per-reactor sizing and tick policy.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Maximum events retained per tick; the rest are counted and dropped.
    pub max_events_per_tick: usize,

    /// Longest delta, in seconds, passed to reactions in one tick. `None`
    /// disables clamping, so a host hitch (a breakpoint, a suspended tab)
    /// arrives whole: looping reactions jump ahead by whole iterations and
    /// finite ones complete in that tick. Hosts that want hitches to read as
    /// a single short frame should set something like `Some(0.25)`.
    pub max_delta: Option<f32>,

    /// Timescale for loaded reactions whose settings do not name one.
    pub default_timescale: Timescale,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_events_per_tick: 1024,
            max_delta: None,
            default_timescale: Timescale::Dependent,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_take_defaults() {
        let cfg: Config = serde_json::from_str(r#"{ "max_delta": 0.1 }"#).unwrap();
        assert_eq!(cfg.max_events_per_tick, 1024);
        assert_eq!(cfg.max_delta, Some(0.1));
        assert_eq!(cfg.default_timescale, Timescale::Dependent);
    }
}
