pub mod builder;
pub mod pdf;

pub use builder::{
    build_report, format_duration, EmotionReport, QuickSummarySection, SessionInfoSection,
    StabilityLabel,
};
pub use pdf::{default_report_filename, render_pdf};
