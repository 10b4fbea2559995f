use serde::{Deserialize, Serialize};

use super::emotion::{Emotion, EmotionScores};

/// A single accepted per-frame classification. Immutable once constructed;
/// `dominant` and `confidence` are derived from `scores` at construction time
/// and never recomputed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EmotionSample {
    /// Elapsed whole seconds since session start. Strictly increasing across
    /// a session's sample sequence.
    pub timestamp_secs: u64,
    pub scores: EmotionScores,
    pub dominant: Emotion,
    pub confidence: f64,
}

impl EmotionSample {
    pub fn from_scores(timestamp_secs: u64, scores: EmotionScores) -> Self {
        let (dominant, confidence) = scores.dominant();
        Self {
            timestamp_secs,
            scores,
            dominant,
            confidence,
        }
    }
}
