//! PDF serialization of a `PaginatedDocument`.
//!
//! Uses the standard Helvetica faces (no embedding) with WinAnsi encoding. Characters
//! outside WinAnsi are written as `?`.

use pdf_writer::{Content, Finish, Name, Pdf, Rect, Ref, Str};

use crate::layout::font_metrics::{FontFace, MM_PER_PT};
use crate::layout::paginator::{DrawOp, PaginatedDocument};

/// File name of the exported artifact.
pub const EXPORT_FILE_NAME: &str = "resume.pdf";

const REGULAR_FONT: Name<'static> = Name(b"F1");
const BOLD_FONT: Name<'static> = Name(b"F2");
const RULE_GRAY: f32 = 150.0 / 255.0;

/// Serializes the document to PDF bytes, one PDF page per layout page.
pub fn write_pdf(doc: &PaginatedDocument) -> Vec<u8> {
    let mut alloc = Ref::new(1);
    let catalog_id = alloc.bump();
    let page_tree_id = alloc.bump();
    let regular_id = alloc.bump();
    let bold_id = alloc.bump();
    let page_ids: Vec<(Ref, Ref)> = doc
        .pages
        .iter()
        .map(|_| (alloc.bump(), alloc.bump()))
        .collect();

    let width_pt = mm_to_pt(doc.geometry.width_mm);
    let height_pt = mm_to_pt(doc.geometry.height_mm);

    let mut pdf = Pdf::new();
    pdf.catalog(catalog_id).pages(page_tree_id);
    pdf.pages(page_tree_id)
        .kids(page_ids.iter().map(|(page_id, _)| *page_id))
        .count(page_ids.len() as i32);

    pdf.type1_font(regular_id)
        .base_font(Name(FontFace::Helvetica.base_font().as_bytes()))
        .encoding_predefined(Name(b"WinAnsiEncoding"));
    pdf.type1_font(bold_id)
        .base_font(Name(FontFace::HelveticaBold.base_font().as_bytes()))
        .encoding_predefined(Name(b"WinAnsiEncoding"));

    for (page, (page_id, content_id)) in doc.pages.iter().zip(&page_ids) {
        let mut pdf_page = pdf.page(*page_id);
        pdf_page.media_box(Rect::new(0.0, 0.0, width_pt, height_pt));
        pdf_page.parent(page_tree_id);
        pdf_page.contents(*content_id);
        pdf_page
            .resources()
            .fonts()
            .pair(REGULAR_FONT, regular_id)
            .pair(BOLD_FONT, bold_id);
        pdf_page.finish();

        let mut content = Content::new();
        for op in &page.ops {
            match op {
                DrawOp::Text {
                    x_mm,
                    y_mm,
                    text,
                    face,
                    size_pt,
                } => {
                    let font = match face {
                        FontFace::Helvetica => REGULAR_FONT,
                        FontFace::HelveticaBold => BOLD_FONT,
                    };
                    let encoded = encode_win_ansi(text);
                    content.begin_text();
                    content.set_font(font, *size_pt);
                    content.next_line(mm_to_pt(*x_mm), height_pt - mm_to_pt(*y_mm));
                    content.show(Str(&encoded));
                    content.end_text();
                }
                DrawOp::Rule { x1_mm, x2_mm, y_mm } => {
                    let y = height_pt - mm_to_pt(*y_mm);
                    content.set_stroke_rgb(RULE_GRAY, RULE_GRAY, RULE_GRAY);
                    content.set_line_width(0.5);
                    content.move_to(mm_to_pt(*x1_mm), y);
                    content.line_to(mm_to_pt(*x2_mm), y);
                    content.stroke();
                }
            }
        }
        pdf.stream(*content_id, &content.finish());
    }

    pdf.finish()
}

fn mm_to_pt(mm: f32) -> f32 {
    mm / MM_PER_PT
}

/// Maps text onto WinAnsiEncoding (Windows-1252) bytes.
fn encode_win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| match c {
            ' '..='~' => c as u8,
            '\u{A0}'..='\u{FF}' => c as u32 as u8,
            '\u{20AC}' => 0x80,
            '\u{2018}' => 0x91,
            '\u{2019}' => 0x92,
            '\u{201C}' => 0x93,
            '\u{201D}' => 0x94,
            '\u{2022}' => 0x95,
            '\u{2013}' => 0x96,
            '\u{2014}' => 0x97,
            _ => b'?',
        })
        .collect()
}
