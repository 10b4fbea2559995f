use anyhow::{anyhow, bail, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::analysis::summarize;
use crate::models::{EmotionSample, EmotionScores, EmotionSession};

use super::RecorderConfig;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum RecorderStatus {
    Idle,
    Recording,
    Paused,
}

impl Default for RecorderStatus {
    fn default() -> Self {
        RecorderStatus::Idle
    }
}

/// What happened to one incoming frame. Dropped frames are expected behavior,
/// not errors, so they are reported as data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordOutcome {
    Accepted,
    /// Confidence at or below the minimum; frame discarded silently.
    BelowThreshold,
    /// Same elapsed second as the last stored sample; the first frame of a
    /// second wins.
    DuplicateSecond,
    /// No session is recording (idle or paused).
    NotRecording,
}

/// Pure session state machine. Holds no clock: callers supply wall-clock
/// timestamps and elapsed seconds, which keeps every transition directly
/// drivable from tests.
#[derive(Debug, Default)]
pub struct RecorderState {
    status: RecorderStatus,
    session: Option<EmotionSession>,
}

impl RecorderState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(&self) -> RecorderStatus {
        self.status
    }

    pub fn session(&self) -> Option<&EmotionSession> {
        self.session.as_ref()
    }

    pub fn sample_count(&self) -> usize {
        self.session.as_ref().map_or(0, |s| s.samples.len())
    }

    /// Idle -> Recording. Allocates a fresh session with a new id and an
    /// empty sample sequence.
    pub fn begin(&mut self, target_secs: u64, started_at: DateTime<Utc>) -> Result<&EmotionSession> {
        if self.status != RecorderStatus::Idle {
            bail!("session already active");
        }
        if target_secs == 0 {
            bail!("target_secs must be greater than zero");
        }

        self.session = Some(EmotionSession::new(target_secs, started_at));
        self.status = RecorderStatus::Recording;
        Ok(self.session.as_ref().unwrap())
    }

    /// Ingest one raw classification. Only accepts while Recording, the frame
    /// confidence clears the minimum, and the elapsed second is new.
    pub fn record(
        &mut self,
        scores: EmotionScores,
        elapsed_secs: u64,
        config: &RecorderConfig,
    ) -> RecordOutcome {
        if self.status != RecorderStatus::Recording {
            return RecordOutcome::NotRecording;
        }
        let session = match self.session.as_mut() {
            Some(session) => session,
            None => return RecordOutcome::NotRecording,
        };

        let (_, confidence) = scores.dominant();
        if confidence <= config.min_confidence {
            return RecordOutcome::BelowThreshold;
        }

        if let Some(last) = session.samples.last() {
            if elapsed_secs <= last.timestamp_secs {
                return RecordOutcome::DuplicateSecond;
            }
        }

        session
            .samples
            .push(EmotionSample::from_scores(elapsed_secs, scores));
        RecordOutcome::Accepted
    }

    /// Recording -> Paused. No samples are accepted while paused.
    pub fn pause(&mut self) -> Result<()> {
        if self.status != RecorderStatus::Recording {
            bail!("no recording session to pause");
        }
        self.status = RecorderStatus::Paused;
        Ok(())
    }

    /// Paused -> Recording.
    pub fn resume(&mut self) -> Result<()> {
        if self.status != RecorderStatus::Paused {
            bail!("no paused session to resume");
        }
        self.status = RecorderStatus::Recording;
        Ok(())
    }

    /// Finalize the active session: set the stop timestamp, compute the
    /// summary over the accumulated samples, and hand the session to the
    /// caller. The session is moved out, so a later stop can never touch it.
    pub fn stop(&mut self, stopped_at: DateTime<Utc>) -> Result<EmotionSession> {
        if self.status == RecorderStatus::Idle {
            bail!("no active session to stop");
        }

        let mut session = self
            .session
            .take()
            .ok_or_else(|| anyhow!("missing session"))?;
        session.stopped_at = Some(stopped_at);
        session.is_active = false;
        session.summary = Some(summarize(&session.samples));

        self.status = RecorderStatus::Idle;
        Ok(session)
    }
}
