//! Document Paginator: lays the projected markdown out on fixed-size pages.
//!
//! The first three non-blank-led lines are the header block and are consumed by
//! position (name, title, contact line). Every later line is classified by
//! `classify_line` and drawn with its own font and advance. After each drawn element
//! the cursor is compared with the bottom limit; crossing it starts a new page for the
//! *next* element. A single block taller than a page is not split and may overflow.
//!
//! Rendering is CPU-bound. Async callers go through `render_blocking`.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::layout::font_metrics::{get_metrics, FontFace, PageGeometry};

static YEAR_RANGE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{4}\s*-\s*\d{4}$").expect("year-range pattern is valid"));

// Font sizes (pt) and vertical advances (mm).
const NAME_SIZE: f32 = 16.0;
const TITLE_SIZE: f32 = 12.0;
const CONTACT_SIZE: f32 = 10.0;
const HEADING_SIZE: f32 = 14.0;
const SUBHEADING_SIZE: f32 = 12.0;
const BODY_SIZE: f32 = 12.0;
const DATE_SIZE: f32 = 10.0;

const NAME_ADVANCE: f32 = 6.0;
const TITLE_ADVANCE: f32 = 5.0;
const CONTACT_ADVANCE: f32 = 8.0;
const RULE_GAP: f32 = 6.0;
const HEADING_ADVANCE: f32 = 8.0;
const SUBHEADING_ADVANCE: f32 = 6.0;
const LINE_HEIGHT: f32 = 5.0;
const BLOCK_GAP: f32 = 2.0;
const BLANK_GAP: f32 = 4.0;
const BULLET_INDENT: f32 = 5.0;

pub const SEPARATOR: &str = "---";
pub const BULLET_MARKER: &str = "- ";
pub const TWO_COLUMN_DELIMITER: &str = " | ";
pub const BULLET_GLYPH: &str = "\u{2022}";

// ────────────────────────────────────────────────────────────────────────────
// Line classification
// ────────────────────────────────────────────────────────────────────────────

/// What a single body line renders as, in priority order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineKind<'a> {
    /// Exact `---`.
    Rule,
    /// One or more `#` followed by a space; `text` has the marker stripped.
    Heading { level: usize, text: &'a str },
    /// `Organization | Title` style line (not a bullet).
    TwoColumn,
    /// Bare `YYYY - YYYY`.
    YearRange,
    /// `- ` bullet; carries the text after the marker.
    Bullet(&'a str),
    Text,
}

/// Classifies a trimmed, non-empty body line.
pub fn classify_line(line: &str) -> LineKind<'_> {
    if line == SEPARATOR {
        return LineKind::Rule;
    }

    let level = line.chars().take_while(|&c| c == '#').count();
    if level > 0 {
        if let Some(text) = line[level..].strip_prefix(' ') {
            return LineKind::Heading {
                level,
                text: text.trim(),
            };
        }
    }

    if line.contains(TWO_COLUMN_DELIMITER) && !line.starts_with('-') {
        return LineKind::TwoColumn;
    }

    if YEAR_RANGE.is_match(line) {
        return LineKind::YearRange;
    }

    if let Some(text) = line.strip_prefix(BULLET_MARKER) {
        return LineKind::Bullet(text.trim_start());
    }

    LineKind::Text
}

// ────────────────────────────────────────────────────────────────────────────
// Output document
// ────────────────────────────────────────────────────────────────────────────

/// A positioned drawing operation. Coordinates are millimetres from the page's top-left
/// corner; text `y` is the baseline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DrawOp {
    Text {
        x_mm: f32,
        y_mm: f32,
        text: String,
        face: FontFace,
        size_pt: f32,
    },
    Rule {
        x1_mm: f32,
        x2_mm: f32,
        y_mm: f32,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Page {
    pub ops: Vec<DrawOp>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaginatedDocument {
    pub geometry: PageGeometry,
    pub pages: Vec<Page>,
}

impl PaginatedDocument {
    fn new(geometry: PageGeometry) -> Self {
        Self {
            geometry,
            pages: vec![Page::default()],
        }
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    fn push(&mut self, op: DrawOp) {
        if let Some(page) = self.pages.last_mut() {
            page.ops.push(op);
        }
    }

    fn text(&mut self, x_mm: f32, y_mm: f32, text: &str, face: FontFace, size_pt: f32) {
        if text.is_empty() {
            return;
        }
        self.push(DrawOp::Text {
            x_mm,
            y_mm,
            text: text.to_string(),
            face,
            size_pt,
        });
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Rendering
// ────────────────────────────────────────────────────────────────────────────

struct Renderer {
    doc: PaginatedDocument,
    y: f32,
}

impl Renderer {
    fn new(geometry: PageGeometry) -> Self {
        Self {
            y: geometry.margin_mm,
            doc: PaginatedDocument::new(geometry),
        }
    }

    fn margin(&self) -> f32 {
        self.doc.geometry.margin_mm
    }

    /// Draws wrapped lines starting at `x` and returns how many were drawn.
    fn wrapped(&mut self, x: f32, text: &str, face: FontFace, size: f32, width: f32) -> usize {
        let lines = get_metrics(face).wrap(text, size, width);
        for (i, line) in lines.iter().enumerate() {
            let y = self.y + i as f32 * LINE_HEIGHT;
            self.doc.text(x, y, line, face, size);
        }
        lines.len()
    }

    fn header(&mut self, name: &str, title: &str, contact: &str) {
        let x = self.margin();
        self.doc.text(x, self.y, name, FontFace::HelveticaBold, NAME_SIZE);
        self.y += NAME_ADVANCE;
        self.doc.text(x, self.y, title, FontFace::Helvetica, TITLE_SIZE);
        self.y += TITLE_ADVANCE;
        self.doc.text(x, self.y, contact, FontFace::Helvetica, CONTACT_SIZE);
        self.y += CONTACT_ADVANCE;
    }

    fn body_line(&mut self, line: &str) {
        let x = self.margin();
        let width = self.doc.geometry.content_width_mm();

        match classify_line(line) {
            LineKind::Rule => {
                let x2 = self.doc.geometry.width_mm - self.margin();
                self.doc.push(DrawOp::Rule {
                    x1_mm: x,
                    x2_mm: x2,
                    y_mm: self.y,
                });
                self.y += RULE_GAP;
            }
            LineKind::Heading { level, text } => {
                let (size, advance) = if level <= 2 {
                    (HEADING_SIZE, HEADING_ADVANCE)
                } else {
                    (SUBHEADING_SIZE, SUBHEADING_ADVANCE)
                };
                self.doc.text(x, self.y, text, FontFace::HelveticaBold, size);
                self.y += advance;
            }
            LineKind::TwoColumn => {
                let n = self.wrapped(x, line, FontFace::HelveticaBold, BODY_SIZE, width);
                self.y += n as f32 * LINE_HEIGHT + BLOCK_GAP;
            }
            LineKind::YearRange => {
                self.doc.text(x, self.y, line, FontFace::Helvetica, DATE_SIZE);
                self.y += LINE_HEIGHT;
            }
            LineKind::Bullet(text) => {
                self.doc
                    .text(x, self.y, BULLET_GLYPH, FontFace::Helvetica, BODY_SIZE);
                let n = self.wrapped(
                    x + BULLET_INDENT,
                    text,
                    FontFace::Helvetica,
                    BODY_SIZE,
                    width - BULLET_INDENT,
                );
                self.y += n.max(1) as f32 * LINE_HEIGHT + BLOCK_GAP;
            }
            LineKind::Text => {
                let n = self.wrapped(x, line, FontFace::Helvetica, BODY_SIZE, width);
                self.y += n as f32 * LINE_HEIGHT + BLOCK_GAP;
            }
        }
    }

    /// Starts a new page when the cursor has passed the bottom limit.
    fn break_if_needed(&mut self) {
        if self.y > self.doc.geometry.bottom_limit_mm() {
            self.doc.pages.push(Page::default());
            self.y = self.margin();
        }
    }
}

/// Lays out `text` on pages of the given geometry.
pub fn render(text: &str, geometry: PageGeometry) -> PaginatedDocument {
    let lines: Vec<&str> = text.lines().map(str::trim).collect();
    let mut renderer = Renderer::new(geometry);
    let mut header_done = false;
    let mut i = 0;

    while i < lines.len() {
        let line = lines[i];
        if line.is_empty() {
            renderer.y += BLANK_GAP;
            i += 1;
            continue;
        }

        if header_done {
            renderer.body_line(line);
            i += 1;
        } else {
            let title = lines.get(i + 1).copied().unwrap_or("");
            let contact = lines.get(i + 2).copied().unwrap_or("");
            renderer.header(line, title, contact);
            header_done = true;
            i += 3;
        }

        renderer.break_if_needed();
    }

    renderer.doc
}

/// Runs `render` on the blocking pool.
pub async fn render_blocking(
    text: String,
    geometry: PageGeometry,
) -> Result<PaginatedDocument, AppError> {
    tokio::task::spawn_blocking(move || render(&text, geometry))
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("spawn_blocking failed in render: {e}")))
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::font_metrics::default_page_geometry;
    use crate::resume::model::{ContactInfo, Entry, Resume};
    use crate::resume::projector::project;

    const HEADER: &str = "Jane Doe\nData Scientist\nPhiladelphia, PA | Phone | jane@example.com";

    fn texts(page: &Page) -> Vec<&str> {
        page.ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::Text { text, .. } => Some(text.as_str()),
                DrawOp::Rule { .. } => None,
            })
            .collect()
    }

    fn find_text<'a>(doc: &'a PaginatedDocument, needle: &str) -> Option<&'a DrawOp> {
        doc.pages
            .iter()
            .flat_map(|p| p.ops.iter())
            .find(|op| matches!(op, DrawOp::Text { text, .. } if text == needle))
    }

    // ── classify_line ───────────────────────────────────────────────────────

    #[test]
    fn test_classify_priority_order() {
        assert_eq!(classify_line("---"), LineKind::Rule);
        assert_eq!(
            classify_line("## Experience"),
            LineKind::Heading {
                level: 2,
                text: "Experience"
            }
        );
        assert_eq!(classify_line("Acme | Engineer"), LineKind::TwoColumn);
        assert_eq!(classify_line("2019 - 2021"), LineKind::YearRange);
        assert_eq!(classify_line("2019-2021"), LineKind::YearRange);
        assert_eq!(classify_line("- Built it"), LineKind::Bullet("Built it"));
        assert_eq!(classify_line("Plain words"), LineKind::Text);
    }

    #[test]
    fn test_classify_bullet_with_delimiter_stays_bullet() {
        assert_eq!(
            classify_line("- Rust | Go | Python"),
            LineKind::Bullet("Rust | Go | Python")
        );
    }

    #[test]
    fn test_classify_heading_with_delimiter_is_heading() {
        assert!(matches!(
            classify_line("## Skills | Tools"),
            LineKind::Heading { level: 2, .. }
        ));
    }

    #[test]
    fn test_classify_non_markers() {
        assert_eq!(classify_line("----"), LineKind::Text);
        assert_eq!(classify_line("#hashtag"), LineKind::Text);
        assert_eq!(classify_line("2020-01 - Present"), LineKind::Text);
        assert_eq!(classify_line("-dash"), LineKind::Text);
    }

    #[test]
    fn test_classify_deeper_heading() {
        assert_eq!(
            classify_line("### LEAD @ ACME"),
            LineKind::Heading {
                level: 3,
                text: "LEAD @ ACME"
            }
        );
    }

    #[test]
    fn test_projected_markers_always_classify() {
        let resume = Resume {
            contact_info: ContactInfo {
                city: Some("Austin".to_string()),
                ..Default::default()
            },
            summary: Some("Builder | shipper of things".to_string()),
            skills: Some("Rust\nSQL".to_string()),
            experience: vec![Entry {
                organization: Some("Acme".to_string()),
                title: Some("Engineer".to_string()),
                start_date: Some("2019".to_string()),
                end_date: Some("2021".to_string()),
                description: Some("- already dashed\nplain".to_string()),
                current: false,
            }],
            ..Default::default()
        };
        let text = project(&resume, "Jane Doe");
        for line in text.lines().skip(3).map(str::trim) {
            if line == "---" {
                assert_eq!(classify_line(line), LineKind::Rule);
            }
            if line.starts_with("## ") {
                assert!(matches!(classify_line(line), LineKind::Heading { .. }));
            }
        }

        let doc = render(&text, default_page_geometry());
        let rules = doc.pages[0]
            .ops
            .iter()
            .filter(|op| matches!(op, DrawOp::Rule { .. }))
            .count();
        assert_eq!(rules, text.lines().filter(|l| l.trim() == "---").count());
    }

    // ── render ──────────────────────────────────────────────────────────────

    #[test]
    fn test_header_consumed_positionally() {
        let doc = render(HEADER, default_page_geometry());
        assert_eq!(doc.page_count(), 1);
        let ops = &doc.pages[0].ops;
        assert_eq!(ops.len(), 3);
        match &ops[0] {
            DrawOp::Text {
                face, size_pt, y_mm, ..
            } => {
                assert_eq!(*face, FontFace::HelveticaBold);
                assert_eq!(*size_pt, NAME_SIZE);
                assert_eq!(*y_mm, 15.0);
            }
            other => panic!("unexpected op {other:?}"),
        }
        // The contact line contains " | " but is drawn as the third header line.
        match &ops[2] {
            DrawOp::Text {
                text,
                face,
                size_pt,
                y_mm,
                ..
            } => {
                assert!(text.starts_with("Philadelphia"));
                assert_eq!(*face, FontFace::Helvetica);
                assert_eq!(*size_pt, CONTACT_SIZE);
                assert_eq!(*y_mm, 26.0);
            }
            other => panic!("unexpected op {other:?}"),
        }
    }

    #[test]
    fn test_heading_marker_is_stripped() {
        let text = format!("{HEADER}\n\n## Experience\n\nAcme | Engineer\n2019 - 2021\n- Did work");
        let doc = render(&text, default_page_geometry());
        let drawn = texts(&doc.pages[0]);
        assert!(drawn.contains(&"Experience"));
        assert!(!drawn.iter().any(|t| t.starts_with("##")));
        assert!(drawn.contains(&BULLET_GLYPH));
        assert!(drawn.contains(&"Did work"));
    }

    #[test]
    fn test_line_styles_do_not_leak() {
        let text = format!("{HEADER}\n2019 - 2021\nplain text after a date");
        let doc = render(&text, default_page_geometry());
        match find_text(&doc, "plain text after a date") {
            Some(DrawOp::Text { size_pt, face, .. }) => {
                assert_eq!(*size_pt, BODY_SIZE);
                assert_eq!(*face, FontFace::Helvetica);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_two_column_line_is_bold() {
        let text = format!("{HEADER}\nAcme | Engineer");
        let doc = render(&text, default_page_geometry());
        assert!(matches!(
            find_text(&doc, "Acme | Engineer"),
            Some(DrawOp::Text {
                face: FontFace::HelveticaBold,
                ..
            })
        ));
    }

    #[test]
    fn test_bullet_text_is_indented() {
        let text = format!("{HEADER}\n- Shipped the thing");
        let doc = render(&text, default_page_geometry());
        match find_text(&doc, "Shipped the thing") {
            Some(DrawOp::Text { x_mm, .. }) => assert_eq!(*x_mm, 15.0 + BULLET_INDENT),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_blank_lines_only_advance() {
        let tight = render(&format!("{HEADER}\nA"), default_page_geometry());
        let loose = render(&format!("{HEADER}\n\n\nA"), default_page_geometry());
        assert_eq!(tight.pages[0].ops.len(), loose.pages[0].ops.len());
        let y_of = |doc: &PaginatedDocument| match find_text(doc, "A") {
            Some(DrawOp::Text { y_mm, .. }) => *y_mm,
            _ => panic!("missing text"),
        };
        assert_eq!(y_of(&loose) - y_of(&tight), 2.0 * BLANK_GAP);
    }

    #[test]
    fn test_single_page_break_when_body_overflows() {
        // Header leaves the cursor at 15 + 6 + 5 + 8 = 34mm. Each plain line advances
        // 7mm, so line 36 moves it to 286mm, past the 282mm limit.
        let body: Vec<String> = (1..=40).map(|i| format!("Line {i}")).collect();
        let text = format!("{HEADER}\n{}", body.join("\n"));
        let doc = render(&text, default_page_geometry());

        assert_eq!(doc.page_count(), 2);
        assert_eq!(texts(&doc.pages[0]).last(), Some(&"Line 36"));
        match doc.pages[1].ops.first() {
            Some(DrawOp::Text { text, y_mm, .. }) => {
                assert_eq!(text, "Line 37");
                assert_eq!(*y_mm, 15.0);
            }
            other => panic!("unexpected {other:?}"),
        }
        assert_eq!(texts(&doc.pages[1]).len(), 4);
    }

    #[test]
    fn test_body_within_page_has_no_break() {
        let body: Vec<String> = (1..=35).map(|i| format!("Line {i}")).collect();
        let text = format!("{HEADER}\n{}", body.join("\n"));
        assert_eq!(render(&text, default_page_geometry()).page_count(), 1);
    }

    #[test]
    fn test_empty_text_renders_one_blank_page() {
        let doc = render("", default_page_geometry());
        assert_eq!(doc.page_count(), 1);
        assert!(doc.pages[0].ops.is_empty());
    }

    #[tokio::test]
    async fn test_render_blocking_matches_render() {
        let text = format!("{HEADER}\n## Summary\nHello");
        let doc = render_blocking(text.clone(), default_page_geometry())
            .await
            .unwrap();
        assert_eq!(doc, render(&text, default_page_geometry()));
    }
}
