use std::collections::BTreeMap;

use crate::models::{Emotion, EmotionSample, SessionSummary};

const PEAK_CONFIDENCE_THRESHOLD: f64 = 0.8;
const PEAK_SCORE_THRESHOLD: f64 = 0.7;
const MAX_PEAK_MOMENTS: usize = 5;

/// Aggregate a session's sample sequence into its summary statistics.
///
/// Pure and idempotent: identical input always yields a bit-identical
/// summary. Safe to call on an in-progress session's samples as well as the
/// final sequence.
pub fn summarize(samples: &[EmotionSample]) -> SessionSummary {
    if samples.is_empty() {
        return SessionSummary::empty();
    }

    let average_emotions = average_scores(samples);
    let (dominant_emotion, dominant_average) = dominant_of_averages(&average_emotions);
    let emotion_changes = count_emotion_changes(samples);

    let mean_confidence =
        samples.iter().map(|s| s.confidence).sum::<f64>() / samples.len() as f64;

    SessionSummary {
        dominant_emotion,
        dominant_percentage: (dominant_average * 100.0).round() as u32,
        average_emotions,
        emotion_changes,
        stability_score: stability_score(emotion_changes, samples.len()),
        confidence_score: (mean_confidence * 100.0).round() as u32,
        total_data_points: samples.len(),
        peak_moments: peak_moments(samples),
    }
}

fn average_scores(samples: &[EmotionSample]) -> BTreeMap<Emotion, f64> {
    let mut averages = BTreeMap::new();
    for &emotion in &Emotion::ALL {
        let total: f64 = samples.iter().map(|s| s.scores.get(emotion)).sum();
        averages.insert(emotion, total / samples.len() as f64);
    }
    averages
}

/// Argmax over the averaged vector, ties resolved by canonical order.
fn dominant_of_averages(averages: &BTreeMap<Emotion, f64>) -> (Emotion, f64) {
    let mut best = Emotion::ALL[0];
    let mut best_average = averages.get(&best).copied().unwrap_or(0.0);
    for &emotion in &Emotion::ALL[1..] {
        let average = averages.get(&emotion).copied().unwrap_or(0.0);
        if average > best_average {
            best = emotion;
            best_average = average;
        }
    }
    (best, best_average)
}

fn count_emotion_changes(samples: &[EmotionSample]) -> u32 {
    samples
        .windows(2)
        .filter(|pair| pair[0].dominant != pair[1].dominant)
        .count() as u32
}

/// `5 * (1 - changes / max(1, n - 1))`, clamped to [0,5] and rounded to one
/// decimal place. Defined as 5 for n <= 1.
pub fn stability_score(emotion_changes: u32, sample_count: usize) -> f64 {
    if sample_count <= 1 {
        return 5.0;
    }
    let transitions = (sample_count - 1).max(1) as f64;
    let raw = 5.0 * (1.0 - emotion_changes as f64 / transitions);
    (raw.max(0.0) * 10.0).round() / 10.0
}

fn peak_moments(samples: &[EmotionSample]) -> Vec<EmotionSample> {
    samples
        .iter()
        .filter(|s| {
            s.confidence > PEAK_CONFIDENCE_THRESHOLD
                && s.scores.get(s.dominant) > PEAK_SCORE_THRESHOLD
        })
        .take(MAX_PEAK_MOMENTS)
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::EmotionScores;

    fn sample(timestamp_secs: u64, dominant: Emotion, confidence: f64) -> EmotionSample {
        let mut scores = EmotionScores::default();
        for &emotion in &Emotion::ALL {
            scores.set(emotion, 0.02);
        }
        scores.set(dominant, confidence);
        EmotionSample::from_scores(timestamp_secs, scores)
    }

    #[test]
    fn empty_input_yields_zero_value_summary() {
        let summary = summarize(&[]);
        assert_eq!(summary.dominant_emotion, Emotion::Neutral);
        assert_eq!(summary.dominant_percentage, 0);
        assert!(summary.average_emotions.is_empty());
        assert_eq!(summary.emotion_changes, 0);
        assert_eq!(summary.stability_score, 5.0);
        assert_eq!(summary.confidence_score, 0);
        assert_eq!(summary.total_data_points, 0);
        assert!(summary.peak_moments.is_empty());
    }

    #[test]
    fn three_sample_scenario_matches_expected_stats() {
        let samples = vec![
            sample(0, Emotion::Happy, 0.9),
            sample(1, Emotion::Happy, 0.85),
            sample(2, Emotion::Sad, 0.75),
        ];
        let summary = summarize(&samples);
        assert_eq!(summary.dominant_emotion, Emotion::Happy);
        assert_eq!(summary.emotion_changes, 1);
        // round((0.9 + 0.85 + 0.75) / 3 * 100) = 83
        assert_eq!(summary.confidence_score, 83);
        assert_eq!(summary.total_data_points, 3);
    }

    #[test]
    fn summarize_is_deterministic() {
        let samples = vec![
            sample(0, Emotion::Neutral, 0.6),
            sample(1, Emotion::Happy, 0.82),
            sample(2, Emotion::Happy, 0.95),
        ];
        assert_eq!(summarize(&samples), summarize(&samples));
    }

    #[test]
    fn averages_stay_within_unit_interval() {
        let samples = vec![
            sample(0, Emotion::Surprised, 1.0),
            sample(1, Emotion::Angry, 0.31),
            sample(2, Emotion::Angry, 0.99),
        ];
        let summary = summarize(&samples);
        for (_, average) in &summary.average_emotions {
            assert!((0.0..=1.0).contains(average));
        }
    }

    #[test]
    fn identical_dominants_count_zero_changes() {
        let samples: Vec<_> = (0..6).map(|t| sample(t, Emotion::Neutral, 0.5)).collect();
        assert_eq!(summarize(&samples).emotion_changes, 0);
        assert_eq!(summarize(&samples).stability_score, 5.0);
    }

    #[test]
    fn alternating_dominants_count_n_minus_one_changes() {
        let samples: Vec<_> = (0..6)
            .map(|t| {
                let dominant = if t % 2 == 0 { Emotion::Happy } else { Emotion::Sad };
                sample(t, dominant, 0.6)
            })
            .collect();
        let summary = summarize(&samples);
        assert_eq!(summary.emotion_changes, 5);
        assert_eq!(summary.stability_score, 0.0);
    }

    #[test]
    fn stability_is_non_increasing_in_changes() {
        let mut previous = f64::INFINITY;
        for changes in 0..=9 {
            let score = stability_score(changes, 10);
            assert!(score <= previous);
            previous = score;
        }
    }

    #[test]
    fn stability_is_five_for_tiny_sequences() {
        assert_eq!(stability_score(0, 0), 5.0);
        assert_eq!(stability_score(0, 1), 5.0);
    }

    #[test]
    fn peak_moments_capped_at_five_and_chronological() {
        let samples: Vec<_> = (0..8).map(|t| sample(t, Emotion::Happy, 0.95)).collect();
        let peaks = summarize(&samples).peak_moments;
        assert_eq!(peaks.len(), 5);
        let timestamps: Vec<_> = peaks.iter().map(|s| s.timestamp_secs).collect();
        assert_eq!(timestamps, vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn peak_moments_require_both_thresholds() {
        // High confidence but the dominant score itself sits at 0.7: not a peak.
        let mut scores = EmotionScores::default();
        scores.happy = 0.7;
        let borderline = EmotionSample {
            confidence: 0.85,
            ..EmotionSample::from_scores(0, scores)
        };
        let samples = vec![borderline, sample(1, Emotion::Happy, 0.81)];
        let peaks = summarize(&samples).peak_moments;
        assert_eq!(peaks.len(), 1);
        assert_eq!(peaks[0].timestamp_secs, 1);
    }

    #[test]
    fn dominant_percentage_is_rounded_average_percent() {
        let samples = vec![
            sample(0, Emotion::Happy, 0.9),
            sample(1, Emotion::Happy, 0.8),
        ];
        let summary = summarize(&samples);
        // mean happy score = (0.9 + 0.8) / 2 = 0.85
        assert_eq!(summary.dominant_percentage, 85);
    }
}
