use serde::{Deserialize, Serialize};

use crate::models::{Emotion, EmotionSample};

const MAX_TIMELINE_CHUNKS: usize = 5;

/// One contiguous chronological chunk of the session.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TimelineEntry {
    /// Timestamp of the first sample in the chunk.
    pub start_secs: u64,
    /// Timestamp of the last sample in the chunk.
    pub end_secs: u64,
    /// Most frequent dominant category in the chunk; ties resolve to the
    /// earliest category in canonical order.
    pub dominant: Emotion,
    /// Mean sample confidence in the chunk, as a rounded percent.
    pub confidence_percent: u32,
}

/// Partition the samples into at most 5 roughly equal chronological chunks
/// (`min(5, ceil(n / 3))`) and aggregate each one.
pub fn build_timeline(samples: &[EmotionSample]) -> Vec<TimelineEntry> {
    if samples.is_empty() {
        return Vec::new();
    }

    let chunk_count = MAX_TIMELINE_CHUNKS.min(samples.len().div_ceil(3));
    let stride = samples.len() as f64 / chunk_count as f64;

    let mut timeline = Vec::with_capacity(chunk_count);
    for i in 0..chunk_count {
        let start = (stride * i as f64).floor() as usize;
        let end = (stride * (i + 1) as f64).floor() as usize;
        let chunk = &samples[start..end.min(samples.len())];
        if chunk.is_empty() {
            continue;
        }

        let total_confidence: f64 = chunk.iter().map(|s| s.confidence).sum();
        timeline.push(TimelineEntry {
            start_secs: chunk[0].timestamp_secs,
            end_secs: chunk[chunk.len() - 1].timestamp_secs,
            dominant: dominant_by_frequency(chunk),
            confidence_percent: (total_confidence / chunk.len() as f64 * 100.0).round() as u32,
        });
    }

    timeline
}

fn dominant_by_frequency(chunk: &[EmotionSample]) -> Emotion {
    let mut best = Emotion::ALL[0];
    let mut best_count = 0;
    for &emotion in &Emotion::ALL {
        let count = chunk.iter().filter(|s| s.dominant == emotion).count();
        if count > best_count {
            best = emotion;
            best_count = count;
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::EmotionScores;

    fn sample(timestamp_secs: u64, dominant: Emotion, confidence: f64) -> EmotionSample {
        let mut scores = EmotionScores::default();
        scores.set(dominant, confidence);
        EmotionSample::from_scores(timestamp_secs, scores)
    }

    fn run(timestamps: std::ops::Range<u64>, dominant: Emotion) -> Vec<EmotionSample> {
        timestamps.map(|t| sample(t, dominant, 0.6)).collect()
    }

    #[test]
    fn empty_samples_yield_empty_timeline() {
        assert!(build_timeline(&[]).is_empty());
    }

    #[test]
    fn small_sessions_collapse_to_one_chunk() {
        let samples = run(0..2, Emotion::Neutral);
        let timeline = build_timeline(&samples);
        assert_eq!(timeline.len(), 1);
        assert_eq!(timeline[0].start_secs, 0);
        assert_eq!(timeline[0].end_secs, 1);
    }

    #[test]
    fn chunk_count_is_capped_at_five() {
        let samples = run(0..40, Emotion::Neutral);
        assert_eq!(build_timeline(&samples).len(), 5);
    }

    #[test]
    fn chunk_count_scales_with_ceil_of_thirds() {
        // 7 samples -> ceil(7/3) = 3 chunks
        let samples = run(0..7, Emotion::Neutral);
        assert_eq!(build_timeline(&samples).len(), 3);
    }

    #[test]
    fn chunks_are_contiguous_and_cover_all_samples() {
        let samples = run(0..11, Emotion::Neutral);
        let timeline = build_timeline(&samples);
        assert_eq!(timeline[0].start_secs, 0);
        assert_eq!(timeline.last().unwrap().end_secs, 10);
        for pair in timeline.windows(2) {
            assert_eq!(pair[1].start_secs, pair[0].end_secs + 1);
        }
    }

    #[test]
    fn chunk_dominant_is_by_frequency_with_canonical_tie_break() {
        let mut samples = run(0..2, Emotion::Surprised);
        samples.extend(run(2..4, Emotion::Fearful));
        // 2 surprised vs 2 fearful: Fearful comes first in canonical order.
        let timeline = build_timeline(&samples);
        assert_eq!(timeline.len(), 1);
        assert_eq!(timeline[0].dominant, Emotion::Fearful);
    }

    #[test]
    fn chunk_confidence_is_rounded_mean_percent() {
        let samples = vec![
            sample(0, Emotion::Happy, 0.8),
            sample(1, Emotion::Happy, 0.9),
        ];
        let timeline = build_timeline(&samples);
        assert_eq!(timeline[0].confidence_percent, 85);
    }
}
