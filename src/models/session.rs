//! Session-related data models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::sample::EmotionSample;
use super::summary::SessionSummary;

/// One bounded recording interval. Samples are appended while the session is
/// active; `stopped_at` and `summary` are set exactly once, on stop.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmotionSession {
    pub id: String,
    pub started_at: DateTime<Utc>,
    pub stopped_at: Option<DateTime<Utc>>,
    pub target_secs: u64,
    pub is_active: bool,
    pub samples: Vec<EmotionSample>,
    pub summary: Option<SessionSummary>,
}

impl EmotionSession {
    pub fn new(target_secs: u64, started_at: DateTime<Utc>) -> Self {
        Self {
            id: new_session_id(started_at),
            started_at,
            stopped_at: None,
            target_secs,
            is_active: true,
            samples: Vec::new(),
            summary: None,
        }
    }

    /// Recorded duration in whole seconds: stop minus start for a finished
    /// session, 0 while still active (callers track live elapsed time
    /// themselves, excluding pauses).
    pub fn duration_secs(&self) -> u64 {
        match self.stopped_at {
            Some(stopped_at) => (stopped_at - self.started_at).num_seconds().max(0) as u64,
            None => 0,
        }
    }
}

/// Start date+time plus a random suffix, e.g. `20260805-142501-9f3ab2c4`.
fn new_session_id(started_at: DateTime<Utc>) -> String {
    let suffix = Uuid::new_v4().simple().to_string();
    format!("{}-{}", started_at.format("%Y%m%d-%H%M%S"), &suffix[..8])
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn new_session_starts_active_and_empty() {
        let started_at = Utc.with_ymd_and_hms(2026, 8, 5, 14, 25, 1).unwrap();
        let session = EmotionSession::new(60, started_at);
        assert!(session.is_active);
        assert!(session.samples.is_empty());
        assert!(session.summary.is_none());
        assert!(session.stopped_at.is_none());
        assert_eq!(session.target_secs, 60);
    }

    #[test]
    fn session_id_carries_start_timestamp_and_suffix() {
        let started_at = Utc.with_ymd_and_hms(2026, 8, 5, 14, 25, 1).unwrap();
        let session = EmotionSession::new(60, started_at);
        assert!(session.id.starts_with("20260805-142501-"));
        assert_eq!(session.id.len(), "20260805-142501-".len() + 8);
    }

    #[test]
    fn duration_is_zero_until_stopped() {
        let started_at = Utc.with_ymd_and_hms(2026, 8, 5, 14, 25, 1).unwrap();
        let mut session = EmotionSession::new(60, started_at);
        assert_eq!(session.duration_secs(), 0);
        session.stopped_at = Some(started_at + chrono::Duration::seconds(45));
        assert_eq!(session.duration_secs(), 45);
    }
}
