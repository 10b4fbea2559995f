use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Frame-ingest counters for one recording run.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IngestSnapshot {
    /// Frames stored as samples.
    pub accepted: u64,
    /// Frames dropped for low confidence.
    pub below_threshold: u64,
    /// Frames dropped by the one-sample-per-second rule.
    pub duplicate_second: u64,
    /// Ticks where the analyzer saw no face.
    pub empty_frames: u64,
    /// Ticks where the analyzer itself failed.
    pub analyzer_errors: u64,
    pub last_accepted_at: Option<DateTime<Utc>>,
}

impl Default for IngestSnapshot {
    fn default() -> Self {
        Self {
            accepted: 0,
            below_threshold: 0,
            duplicate_second: 0,
            empty_frames: 0,
            analyzer_errors: 0,
            last_accepted_at: None,
        }
    }
}
