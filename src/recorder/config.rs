use std::time::Duration;

/// Tunable thresholds and cadences for session recording.
#[derive(Debug, Clone)]
pub struct RecorderConfig {
    /// Frames at or below this confidence are dropped silently.
    pub min_confidence: f64,

    /// How often the sampling loop asks the analyzer for a frame. The
    /// recorder's one-sample-per-second dedup bounds the effective rate no
    /// matter how short this is.
    pub sample_interval: Duration,

    /// How often the elapsed-time ticker checks for auto-stop.
    pub tick_interval: Duration,
}

impl Default for RecorderConfig {
    fn default() -> Self {
        Self {
            min_confidence: 0.3,
            sample_interval: Duration::from_millis(500),
            tick_interval: Duration::from_secs(1),
        }
    }
}
