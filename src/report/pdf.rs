use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use printpdf::{
    BuiltinFont, Color, IndirectFontRef, Line, Mm, PdfDocument, PdfDocumentReference,
    PdfLayerIndex, PdfLayerReference, PdfPageIndex, Point, Rgb,
};

use crate::report::builder::{format_duration, EmotionReport};

const PAGE_WIDTH_MM: f64 = 210.0;
const PAGE_HEIGHT_MM: f64 = 297.0;
const MARGIN_MM: f64 = 20.0;
/// Content never enters this strip at the bottom of a page; the footer pass
/// draws into it.
const FOOTER_ZONE_MM: f64 = 30.0;

const TITLE_SIZE: f64 = 24.0;
const SECTION_SIZE: f64 = 12.0;
const BODY_SIZE: f64 = 10.0;
const TABLE_SIZE: f64 = 9.0;

const HEADING_COLOR: (f64, f64, f64) = (0.15, 0.39, 0.92);
const BODY_COLOR: (f64, f64, f64) = (0.29, 0.33, 0.39);
const MUTED_COLOR: (f64, f64, f64) = (0.47, 0.47, 0.47);
const RULE_COLOR: (f64, f64, f64) = (0.78, 0.78, 0.78);

/// Render the report as a paginated A4 PDF. Fails as a whole on any
/// rendering-engine error; there is no partial document.
pub fn render_pdf(report: &EmotionReport) -> Result<Vec<u8>> {
    let writer = PdfReportWriter::new()?;
    writer.render(report)
}

/// Default download name, e.g. `emotion-report-2026-08-05.pdf`.
pub fn default_report_filename(date: DateTime<Utc>) -> String {
    format!("emotion-report-{}.pdf", date.format("%Y-%m-%d"))
}

struct PdfReportWriter {
    doc: PdfDocumentReference,
    pages: Vec<(PdfPageIndex, PdfLayerIndex)>,
    /// Distance from the top of the current page to the next baseline.
    cursor_mm: f64,
    regular: IndirectFontRef,
    bold: IndirectFontRef,
}

impl PdfReportWriter {
    fn new() -> Result<Self> {
        let (doc, page, layer) = PdfDocument::new(
            "Emotion Analysis Report",
            Mm(PAGE_WIDTH_MM as f32),
            Mm(PAGE_HEIGHT_MM as f32),
            "content",
        );
        let regular = doc
            .add_builtin_font(BuiltinFont::Helvetica)
            .context("failed to load report font")?;
        let bold = doc
            .add_builtin_font(BuiltinFont::HelveticaBold)
            .context("failed to load report font")?;

        Ok(Self {
            doc,
            pages: vec![(page, layer)],
            cursor_mm: MARGIN_MM,
            regular,
            bold,
        })
    }

    fn render(mut self, report: &EmotionReport) -> Result<Vec<u8>> {
        self.add_title();
        self.add_session_info(report);
        self.add_quick_summary(report);
        self.add_breakdown(report);
        self.add_timeline(report);
        self.add_insights(report);
        self.add_footers();

        self.doc
            .save_to_bytes()
            .context("failed to serialize report PDF")
    }

    fn add_title(&mut self) {
        self.text(self.cursor_mm, "Moodtrace", TITLE_SIZE, true, HEADING_COLOR);
        self.cursor_mm += 10.0;
        self.text(
            self.cursor_mm,
            "Emotion Analysis Report",
            16.0,
            false,
            BODY_COLOR,
        );
        self.cursor_mm += 15.0;
    }

    fn add_session_info(&mut self, report: &EmotionReport) {
        let lines = [
            format!("Session: {}", report.session_id),
            format!(
                "Date: {}",
                report.info.started_at.format("%Y-%m-%d %H:%M:%S UTC")
            ),
            format!("Duration: {}", format_duration(report.info.duration_secs)),
            format!("Total detections: {} data points", report.info.total_samples),
        ];
        for line in lines {
            self.body_line(&line, MUTED_COLOR);
        }
        self.cursor_mm += 9.0;
    }

    fn add_quick_summary(&mut self, report: &EmotionReport) {
        self.section_title("Quick Summary");

        let Some(quick) = &report.quick_summary else {
            self.body_line("No emotion data was captured in this session", MUTED_COLOR);
            self.cursor_mm += 9.0;
            return;
        };

        let lines = [
            format!(
                "Most frequent emotion: {} ({}%)",
                quick.dominant_emotion.display_name(),
                quick.dominant_percentage
            ),
            format!("Average confidence: {}%", quick.confidence_score),
            format!("Emotion changes: {}", quick.emotion_changes),
            format!("Stability: {}", quick.stability.as_str()),
        ];
        for line in lines {
            self.body_line(&line, BODY_COLOR);
        }
        self.cursor_mm += 9.0;
    }

    fn add_breakdown(&mut self, report: &EmotionReport) {
        self.section_title("Emotion Breakdown");

        if report.breakdown.is_empty() {
            self.body_line("No data to display", MUTED_COLOR);
            self.cursor_mm += 9.0;
            return;
        }

        self.ensure_space(8.0 + report.breakdown.len() as f64 * 6.0);

        let columns = [
            (0.0, "Emotion"),
            (40.0, "Average"),
            (70.0, "Max"),
            (100.0, "Frequency"),
            (130.0, "Level"),
        ];
        for (offset, header) in columns {
            self.text_at(
                MARGIN_MM + offset,
                self.cursor_mm,
                header,
                TABLE_SIZE,
                true,
                BODY_COLOR,
            );
        }
        self.cursor_mm += 3.0;
        self.rule(MARGIN_MM, MARGIN_MM + 160.0, self.cursor_mm);
        self.cursor_mm += 5.0;

        for row in &report.breakdown {
            let cells = [
                row.emotion.display_name().to_string(),
                format!("{}%", (row.average * 100.0).round() as u32),
                format!("{}%", (row.max * 100.0).round() as u32),
                format!("{}x", row.dominant_count),
                row.tier.as_str().to_string(),
            ];
            for ((offset, _), cell) in columns.iter().zip(cells.iter()) {
                self.text_at(
                    MARGIN_MM + offset,
                    self.cursor_mm,
                    cell,
                    TABLE_SIZE,
                    false,
                    BODY_COLOR,
                );
            }
            self.cursor_mm += 6.0;
        }
        self.cursor_mm += 9.0;
    }

    fn add_timeline(&mut self, report: &EmotionReport) {
        self.section_title("Emotion Timeline");

        if report.timeline.is_empty() {
            self.body_line("No timeline to display", MUTED_COLOR);
            self.cursor_mm += 9.0;
            return;
        }

        for entry in &report.timeline {
            let line = format!(
                "{}-{}s: {} ({}%)",
                entry.start_secs,
                entry.end_secs,
                entry.dominant.display_name(),
                entry.confidence_percent
            );
            self.body_line(&line, BODY_COLOR);
        }
        self.cursor_mm += 9.0;
    }

    fn add_insights(&mut self, report: &EmotionReport) {
        self.section_title("Insights & Recommendations");

        for insight in &report.insights {
            self.body_line(&format!("- {insight}"), BODY_COLOR);
        }
        self.cursor_mm += 9.0;
    }

    /// Stamp every page with the separator rule, the generator line, the
    /// generation date and the page indicator.
    fn add_footers(&mut self) {
        let generated_on = Utc::now().format("%Y-%m-%d").to_string();
        let page_count = self.pages.len();

        for (index, (page, layer)) in self.pages.iter().enumerate() {
            let layer = self.doc.get_page(page.clone()).get_layer(layer.clone());

            draw_rule(
                &layer,
                MARGIN_MM,
                PAGE_WIDTH_MM - MARGIN_MM,
                PAGE_HEIGHT_MM - 25.0,
            );

            layer.set_fill_color(color(MUTED_COLOR));
            layer.use_text(
                "Generated by moodtrace",
                8.0,
                Mm(MARGIN_MM as f32),
                Mm(15.0),
                &self.regular,
            );
            layer.use_text(generated_on.clone(), 8.0, Mm(MARGIN_MM as f32), Mm(8.0), &self.regular);
            layer.use_text(
                format!("Page {}/{}", index + 1, page_count),
                8.0,
                Mm((PAGE_WIDTH_MM - MARGIN_MM - 20.0) as f32),
                Mm(15.0),
                &self.regular,
            );
        }
    }

    fn section_title(&mut self, title: &str) {
        self.ensure_space(22.0);
        self.text(self.cursor_mm, title, SECTION_SIZE, true, HEADING_COLOR);
        self.cursor_mm += 10.0;
    }

    fn body_line(&mut self, line: &str, rgb: (f64, f64, f64)) {
        self.ensure_space(6.0);
        self.text(self.cursor_mm, line, BODY_SIZE, false, rgb);
        self.cursor_mm += 6.0;
    }

    fn ensure_space(&mut self, needed_mm: f64) {
        if self.cursor_mm + needed_mm <= PAGE_HEIGHT_MM - FOOTER_ZONE_MM {
            return;
        }
        let (page, layer) = self
            .doc
            .add_page(Mm(PAGE_WIDTH_MM as f32), Mm(PAGE_HEIGHT_MM as f32), "content");
        self.pages.push((page, layer));
        self.cursor_mm = MARGIN_MM;
    }

    fn text(&self, cursor_mm: f64, line: &str, size: f64, bold: bool, rgb: (f64, f64, f64)) {
        self.text_at(MARGIN_MM, cursor_mm, line, size, bold, rgb);
    }

    fn text_at(
        &self,
        x_mm: f64,
        cursor_mm: f64,
        line: &str,
        size: f64,
        bold: bool,
        rgb: (f64, f64, f64),
    ) {
        let layer = self.current_layer();
        let font = if bold { &self.bold } else { &self.regular };
        layer.set_fill_color(color(rgb));
        layer.use_text(line, size as f32, Mm(x_mm as f32), Mm((PAGE_HEIGHT_MM - cursor_mm) as f32), font);
    }

    fn rule(&self, x_start_mm: f64, x_end_mm: f64, cursor_mm: f64) {
        draw_rule(
            &self.current_layer(),
            x_start_mm,
            x_end_mm,
            PAGE_HEIGHT_MM - cursor_mm,
        );
    }

    fn current_layer(&self) -> PdfLayerReference {
        let (page, layer) = self.pages.last().cloned().expect("document always has a page");
        self.doc.get_page(page).get_layer(layer)
    }
}

fn draw_rule(layer: &PdfLayerReference, x_start_mm: f64, x_end_mm: f64, y_mm: f64) {
    layer.set_outline_color(color(RULE_COLOR));
    layer.set_outline_thickness(0.4);
    layer.add_line(Line {
        points: vec![
            (Point::new(Mm(x_start_mm as f32), Mm(y_mm as f32)), false),
            (Point::new(Mm(x_end_mm as f32), Mm(y_mm as f32)), false),
        ],
        is_closed: false,
    });
}

fn color(rgb: (f64, f64, f64)) -> Color {
    Color::Rgb(Rgb::new(rgb.0 as f32, rgb.1 as f32, rgb.2 as f32, None))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Emotion, EmotionSample, EmotionScores, EmotionSession};
    use crate::report::builder::build_report;
    use chrono::TimeZone;

    fn session_with(samples: Vec<EmotionSample>) -> EmotionSession {
        let started_at = Utc.with_ymd_and_hms(2026, 8, 5, 10, 0, 0).unwrap();
        let mut session = EmotionSession::new(60, started_at);
        session.samples = samples;
        session.stopped_at = Some(started_at + chrono::Duration::seconds(60));
        session.is_active = false;
        session.summary = Some(crate::analysis::summarize(&session.samples));
        session
    }

    fn sample(timestamp_secs: u64, dominant: Emotion, confidence: f64) -> EmotionSample {
        let mut scores = EmotionScores::default();
        scores.set(dominant, confidence);
        EmotionSample::from_scores(timestamp_secs, scores)
    }

    #[test]
    fn renders_a_pdf_for_a_populated_session() {
        let samples: Vec<_> = (0..30).map(|t| sample(t, Emotion::Happy, 0.9)).collect();
        let report = build_report(&session_with(samples));
        let bytes = render_pdf(&report).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn renders_a_pdf_for_an_empty_session() {
        let report = build_report(&session_with(Vec::new()));
        let bytes = render_pdf(&report).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn default_filename_carries_the_date() {
        let date = Utc.with_ymd_and_hms(2026, 8, 5, 23, 59, 0).unwrap();
        assert_eq!(default_report_filename(date), "emotion-report-2026-08-05.pdf");
    }
}
