use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::emotion::Emotion;
use super::sample::EmotionSample;

/// Aggregate statistics derived from a session's full sample sequence.
/// Computed exactly once when the session stops and never revised.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SessionSummary {
    pub dominant_emotion: Emotion,
    /// Average confidence of the dominant category, as a rounded percent.
    pub dominant_percentage: u32,
    /// Mean confidence per category. Empty when the session has no samples;
    /// iteration order is the canonical category order.
    pub average_emotions: BTreeMap<Emotion, f64>,
    /// Count of adjacent samples whose dominant category differs.
    pub emotion_changes: u32,
    /// `5 * (1 - changes / max(1, n - 1))`, in [0,5], one decimal place.
    pub stability_score: f64,
    /// Mean of all sample confidences as a rounded percent.
    pub confidence_score: u32,
    pub total_data_points: usize,
    /// Up to 5 high-confidence, strongly expressive samples, in order.
    pub peak_moments: Vec<EmotionSample>,
}

impl SessionSummary {
    /// Summary of a session with no samples. Stability defaults to 5.0, the
    /// same value a single-sample session gets.
    pub fn empty() -> Self {
        Self {
            dominant_emotion: Emotion::Neutral,
            dominant_percentage: 0,
            average_emotions: BTreeMap::new(),
            emotion_changes: 0,
            stability_score: 5.0,
            confidence_score: 0,
            total_data_points: 0,
            peak_moments: Vec::new(),
        }
    }
}
