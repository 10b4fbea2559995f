//! Facial emotion session tracking and reporting.
//!
//! An injectable [`sensing::ExpressionAnalyzer`] feeds per-frame confidence
//! vectors into a [`recorder::SessionController`], which filters and
//! accumulates them into an [`models::EmotionSession`] (at most one sample
//! per second, low-confidence frames dropped). Stopping the session computes
//! its [`models::SessionSummary`]; [`report::build_report`] lays the result
//! out as five fixed sections and [`report::render_pdf`] produces the
//! paginated document.

pub mod analysis;
pub mod metrics;
pub mod models;
pub mod recorder;
pub mod report;
pub mod sensing;
mod utils;

pub use analysis::summarize;
pub use models::{Emotion, EmotionSample, EmotionScores, EmotionSession, SessionSummary};
pub use recorder::{RecorderConfig, RecorderStatus, SessionController};
pub use report::{build_report, render_pdf, EmotionReport};
pub use sensing::ExpressionAnalyzer;
