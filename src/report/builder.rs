use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::analysis::{
    build_timeline, category_breakdown, summarize, CategoryBreakdown, TimelineEntry,
};
use crate::models::{Emotion, EmotionSession, SessionSummary};

/// Qualitative stability label, thresholded on the ratio of dominant-emotion
/// changes to total samples. Computed independently of the summary's numeric
/// `stability_score`, which divides by the transition count instead; the two
/// deliberately stay separate.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum StabilityLabel {
    VeryStable,
    Stable,
    FairlyDynamic,
    HighlyDynamic,
}

impl StabilityLabel {
    pub fn from_changes(emotion_changes: u32, total_data_points: usize) -> Self {
        if total_data_points == 0 {
            return StabilityLabel::VeryStable;
        }
        let change_ratio = emotion_changes as f64 / total_data_points as f64;
        if change_ratio < 0.1 {
            StabilityLabel::VeryStable
        } else if change_ratio < 0.3 {
            StabilityLabel::Stable
        } else if change_ratio < 0.5 {
            StabilityLabel::FairlyDynamic
        } else {
            StabilityLabel::HighlyDynamic
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            StabilityLabel::VeryStable => "very stable",
            StabilityLabel::Stable => "stable",
            StabilityLabel::FairlyDynamic => "fairly dynamic",
            StabilityLabel::HighlyDynamic => "highly dynamic",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionInfoSection {
    pub started_at: DateTime<Utc>,
    pub duration_secs: u64,
    pub total_samples: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuickSummarySection {
    pub dominant_emotion: Emotion,
    pub dominant_percentage: u32,
    pub confidence_score: u32,
    pub emotion_changes: u32,
    pub stability: StabilityLabel,
}

/// The five fixed report sections as plain data, ready for rendering.
/// Sample-dependent sections are empty (not absent) for a zero-sample
/// session; the renderer turns that into explicit no-data notices.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmotionReport {
    pub session_id: String,
    pub info: SessionInfoSection,
    pub quick_summary: Option<QuickSummarySection>,
    pub breakdown: Vec<CategoryBreakdown>,
    pub timeline: Vec<TimelineEntry>,
    pub insights: Vec<String>,
}

/// Assemble the report sections from a finalized session. Falls back to
/// computing the summary on the fly if the session was never finalized (the
/// calculator is pure, so this cannot disturb an existing summary).
pub fn build_report(session: &EmotionSession) -> EmotionReport {
    let summary = session
        .summary
        .clone()
        .unwrap_or_else(|| summarize(&session.samples));

    let quick_summary = if session.samples.is_empty() {
        None
    } else {
        Some(QuickSummarySection {
            dominant_emotion: summary.dominant_emotion,
            dominant_percentage: summary.dominant_percentage,
            confidence_score: summary.confidence_score,
            emotion_changes: summary.emotion_changes,
            stability: StabilityLabel::from_changes(
                summary.emotion_changes,
                summary.total_data_points,
            ),
        })
    };

    EmotionReport {
        session_id: session.id.clone(),
        info: SessionInfoSection {
            started_at: session.started_at,
            duration_secs: session.duration_secs(),
            total_samples: session.samples.len(),
        },
        quick_summary,
        breakdown: category_breakdown(&session.samples),
        timeline: build_timeline(&session.samples),
        insights: build_insights(session, &summary),
    }
}

/// Ordered rule walk; every matching rule contributes, and the generic
/// tracking recommendation always comes last.
fn build_insights(session: &EmotionSession, summary: &SessionSummary) -> Vec<String> {
    let mut insights = Vec::new();

    if summary.total_data_points == 0 {
        insights.push("Not enough data to generate insights".to_string());
        return insights;
    }

    if session.duration_secs() < 30 {
        insights.push(
            "Session was very short; record at least 30 seconds for a more accurate picture"
                .to_string(),
        );
    }

    if summary.confidence_score < 60 {
        insights.push(
            "Average confidence was low; check the lighting and face position".to_string(),
        );
    } else if summary.confidence_score > 80 {
        insights.push("Average confidence was high; detection conditions were optimal".to_string());
    }

    match summary.dominant_emotion {
        Emotion::Happy => {
            insights.push("A positive mood dominated this session".to_string());
        }
        Emotion::Neutral => {
            insights.push("Emotions stayed calm and neutral".to_string());
        }
        Emotion::Sad | Emotion::Angry | Emotion::Fearful => {
            insights.push(
                "Negative emotions were dominant; consider a relaxing activity".to_string(),
            );
        }
        _ => {}
    }

    match StabilityLabel::from_changes(summary.emotion_changes, summary.total_data_points) {
        StabilityLabel::VeryStable => {
            insights.push("Emotions were very consistent throughout the session".to_string());
        }
        StabilityLabel::HighlyDynamic => {
            insights.push(
                "Emotions shifted frequently; outside factors may be influencing the session"
                    .to_string(),
            );
        }
        _ => {}
    }

    insights.push("Record sessions regularly to track emotional patterns over time".to_string());
    insights
}

/// `"1m 30s"`-style duration used by the rendered report.
pub fn format_duration(secs: u64) -> String {
    format!("{}m {}s", secs / 60, secs % 60)
}
