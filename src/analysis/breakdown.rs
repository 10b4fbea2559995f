use serde::{Deserialize, Serialize};

use crate::models::{Emotion, EmotionSample};

/// Per-category row of the report's breakdown table.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CategoryBreakdown {
    pub emotion: Emotion,
    /// Mean confidence across all samples.
    pub average: f64,
    /// Highest confidence observed in any sample.
    pub max: f64,
    /// Number of samples for which this category was dominant.
    pub dominant_count: usize,
    pub tier: ActivityTier,
}

/// Coarse activity tier for a category, thresholded on its average score.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum ActivityTier {
    High,
    Medium,
    Low,
}

impl ActivityTier {
    pub fn from_average(average: f64) -> Self {
        if average > 0.3 {
            ActivityTier::High
        } else if average > 0.1 {
            ActivityTier::Medium
        } else {
            ActivityTier::Low
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityTier::High => "high",
            ActivityTier::Medium => "medium",
            ActivityTier::Low => "low",
        }
    }
}

/// One row per category in canonical order. Empty when there are no samples.
pub fn category_breakdown(samples: &[EmotionSample]) -> Vec<CategoryBreakdown> {
    if samples.is_empty() {
        return Vec::new();
    }

    Emotion::ALL
        .iter()
        .map(|&emotion| {
            let total: f64 = samples.iter().map(|s| s.scores.get(emotion)).sum();
            let average = total / samples.len() as f64;
            let max = samples
                .iter()
                .map(|s| s.scores.get(emotion))
                .fold(0.0_f64, f64::max);
            let dominant_count = samples.iter().filter(|s| s.dominant == emotion).count();

            CategoryBreakdown {
                emotion,
                average,
                max,
                dominant_count,
                tier: ActivityTier::from_average(average),
            }
        })
        .collect()
}
