mod types;

pub use types::IngestSnapshot;

use std::sync::Arc;

use chrono::Utc;
use tokio::sync::Mutex;

use crate::recorder::RecordOutcome;

/// Shared counter of what happened to each incoming frame. Cheap to clone;
/// clones observe the same counters.
pub struct IngestMetrics {
    inner: Arc<Mutex<IngestSnapshot>>,
}

impl IngestMetrics {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(IngestSnapshot::default())),
        }
    }

    pub async fn record_outcome(&self, outcome: RecordOutcome) {
        let mut state = self.inner.lock().await;
        match outcome {
            RecordOutcome::Accepted => {
                state.accepted += 1;
                state.last_accepted_at = Some(Utc::now());
            }
            RecordOutcome::BelowThreshold => state.below_threshold += 1,
            RecordOutcome::DuplicateSecond => state.duplicate_second += 1,
            RecordOutcome::NotRecording => {}
        }
    }

    pub async fn record_empty_frame(&self) {
        self.inner.lock().await.empty_frames += 1;
    }

    pub async fn record_analyzer_error(&self) {
        self.inner.lock().await.analyzer_errors += 1;
    }

    pub async fn snapshot(&self) -> IngestSnapshot {
        self.inner.lock().await.clone()
    }

    pub async fn reset(&self) {
        *self.inner.lock().await = IngestSnapshot::default();
    }
}

impl Default for IngestMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for IngestMetrics {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}
