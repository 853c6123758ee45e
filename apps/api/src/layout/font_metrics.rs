//! Static font-metric tables for the two faces the resume template uses.
//!
//! Widths are the standard Helvetica AFM advance widths divided by 1000, i.e. em units
//! relative to the font size. The PDF writer references the same standard fonts, so
//! measured widths match what viewers draw.
//! All tables cover ASCII 0x20..=0x7E (95 printable characters).
//! Index = (char as usize) - 32.

use serde::{Deserialize, Serialize};

/// Millimetres per PDF point.
pub const MM_PER_PT: f32 = 25.4 / 72.0;

// ────────────────────────────────────────────────────────────────────────────
// Font faces
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FontFace {
    Helvetica,
    HelveticaBold,
}

impl FontFace {
    /// PostScript name of the standard font.
    pub fn base_font(self) -> &'static str {
        match self {
            FontFace::Helvetica => "Helvetica",
            FontFace::HelveticaBold => "Helvetica-Bold",
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Page geometry
// ────────────────────────────────────────────────────────────────────────────

/// Fixed page geometry in millimetres. The vertical cursor grows downwards from the
/// top edge.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PageGeometry {
    pub width_mm: f32,
    pub height_mm: f32,
    pub margin_mm: f32,
}

impl PageGeometry {
    pub fn content_width_mm(&self) -> f32 {
        self.width_mm - 2.0 * self.margin_mm
    }

    /// Lowest cursor position allowed before a new page starts.
    pub fn bottom_limit_mm(&self) -> f32 {
        self.height_mm - self.margin_mm
    }
}

/// A4 portrait with 15mm margins on every side.
pub fn default_page_geometry() -> PageGeometry {
    PageGeometry {
        width_mm: 210.0,
        height_mm: 297.0,
        margin_mm: 15.0,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Font metric table
// ────────────────────────────────────────────────────────────────────────────

/// Static character-width table for a font face.
///
/// `widths[i]` = width of ASCII character `(i + 32)`, covering 0x20 (space) through 0x7E (~).
pub struct FontMetricTable {
    widths: [f32; 95],
    /// Fallback width for non-ASCII characters.
    pub average_char_width: f32,
    pub space_width: f32,
}

impl FontMetricTable {
    /// Measures the rendered width of a string in em units.
    pub fn measure_str(&self, s: &str) -> f32 {
        s.chars()
            .map(|c| {
                let code = c as usize;
                if (32..=126).contains(&code) {
                    self.widths[code - 32]
                } else if c == '\u{2022}' {
                    BULLET_WIDTH
                } else {
                    self.average_char_width
                }
            })
            .sum()
    }

    /// Width of a string in millimetres at the given point size.
    pub fn width_mm(&self, s: &str, size_pt: f32) -> f32 {
        self.measure_str(s) * size_pt * MM_PER_PT
    }

    /// Greedy word wrap to `max_width_mm`.
    ///
    /// Words are separated by single spaces on output. A word wider than the whole line
    /// is split between characters. Empty or whitespace-only input yields no lines.
    pub fn wrap(&self, text: &str, size_pt: f32, max_width_mm: f32) -> Vec<String> {
        let space_mm = self.space_width * size_pt * MM_PER_PT;
        let mut lines: Vec<String> = Vec::new();
        let mut current = String::new();
        let mut current_width = 0.0_f32;

        for word in text.split_whitespace() {
            let word_w = self.width_mm(word, size_pt);

            if word_w > max_width_mm {
                if !current.is_empty() {
                    lines.push(std::mem::take(&mut current));
                }
                let mut pieces = self.split_long_word(word, size_pt, max_width_mm);
                // The last piece stays open so following words can join it.
                if let Some(last) = pieces.pop() {
                    lines.extend(pieces);
                    current_width = self.width_mm(&last, size_pt);
                    current = last;
                }
                continue;
            }

            if current.is_empty() {
                current.push_str(word);
                current_width = word_w;
            } else if current_width + space_mm + word_w > max_width_mm {
                lines.push(std::mem::take(&mut current));
                current.push_str(word);
                current_width = word_w;
            } else {
                current.push(' ');
                current.push_str(word);
                current_width += space_mm + word_w;
            }
        }

        if !current.is_empty() {
            lines.push(current);
        }
        lines
    }

    fn split_long_word(&self, word: &str, size_pt: f32, max_width_mm: f32) -> Vec<String> {
        let mut pieces = Vec::new();
        let mut piece = String::new();
        for c in word.chars() {
            let mut buf = [0u8; 4];
            let c_w = self.width_mm(c.encode_utf8(&mut buf), size_pt);
            if !piece.is_empty() && self.width_mm(&piece, size_pt) + c_w > max_width_mm {
                pieces.push(std::mem::take(&mut piece));
            }
            piece.push(c);
        }
        if !piece.is_empty() {
            pieces.push(piece);
        }
        pieces
    }
}

/// Helvetica bullet (U+2022) advance width, identical in both faces.
const BULLET_WIDTH: f32 = 0.350;

// ────────────────────────────────────────────────────────────────────────────
// Static width tables  (95 ASCII printable characters each)
// ────────────────────────────────────────────────────────────────────────────

static HELVETICA_TABLE: FontMetricTable = FontMetricTable {
    #[rustfmt::skip]
    widths: [
        // sp     !      "      #      $      %      &      '      (      )      *      +      ,      -      .      /
        0.278, 0.278, 0.355, 0.556, 0.556, 0.889, 0.667, 0.191, 0.333, 0.333, 0.389, 0.584, 0.278, 0.333, 0.278, 0.278,
        // 0      1      2      3      4      5      6      7      8      9
        0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556,
        // :      ;      <      =      >      ?      @
        0.278, 0.278, 0.584, 0.584, 0.584, 0.556, 1.015,
        // A      B      C      D      E      F      G      H      I      J      K      L      M
        0.667, 0.667, 0.722, 0.722, 0.667, 0.611, 0.778, 0.722, 0.278, 0.500, 0.667, 0.556, 0.833,
        // N      O      P      Q      R      S      T      U      V      W      X      Y      Z
        0.722, 0.778, 0.667, 0.778, 0.722, 0.667, 0.611, 0.722, 0.667, 0.944, 0.667, 0.667, 0.611,
        // [      \      ]      ^      _      `
        0.278, 0.278, 0.278, 0.469, 0.556, 0.333,
        // a      b      c      d      e      f      g      h      i      j      k      l      m
        0.556, 0.556, 0.500, 0.556, 0.556, 0.278, 0.556, 0.556, 0.222, 0.222, 0.500, 0.222, 0.833,
        // n      o      p      q      r      s      t      u      v      w      x      y      z
        0.556, 0.556, 0.556, 0.556, 0.333, 0.500, 0.278, 0.556, 0.500, 0.722, 0.500, 0.500, 0.500,
        // {      |      }      ~
        0.334, 0.260, 0.334, 0.584,
    ],
    average_char_width: 0.556,
    space_width: 0.278,
};

static HELVETICA_BOLD_TABLE: FontMetricTable = FontMetricTable {
    #[rustfmt::skip]
    widths: [
        // sp     !      "      #      $      %      &      '      (      )      *      +      ,      -      .      /
        0.278, 0.333, 0.474, 0.556, 0.556, 0.889, 0.722, 0.238, 0.333, 0.333, 0.389, 0.584, 0.278, 0.333, 0.278, 0.278,
        // 0      1      2      3      4      5      6      7      8      9
        0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556,
        // :      ;      <      =      >      ?      @
        0.333, 0.333, 0.584, 0.584, 0.584, 0.611, 0.975,
        // A      B      C      D      E      F      G      H      I      J      K      L      M
        0.722, 0.722, 0.722, 0.722, 0.667, 0.611, 0.778, 0.722, 0.278, 0.556, 0.722, 0.611, 0.833,
        // N      O      P      Q      R      S      T      U      V      W      X      Y      Z
        0.722, 0.778, 0.667, 0.778, 0.722, 0.667, 0.611, 0.722, 0.667, 0.944, 0.667, 0.667, 0.611,
        // [      \      ]      ^      _      `
        0.333, 0.278, 0.333, 0.584, 0.556, 0.333,
        // a      b      c      d      e      f      g      h      i      j      k      l      m
        0.556, 0.611, 0.556, 0.611, 0.556, 0.333, 0.611, 0.611, 0.278, 0.278, 0.556, 0.278, 0.889,
        // n      o      p      q      r      s      t      u      v      w      x      y      z
        0.611, 0.611, 0.611, 0.611, 0.389, 0.556, 0.333, 0.611, 0.556, 0.778, 0.556, 0.556, 0.500,
        // {      |      }      ~
        0.389, 0.280, 0.389, 0.584,
    ],
    average_char_width: 0.611,
    space_width: 0.278,
};

/// Returns the static metric table for a given face.
pub fn get_metrics(face: FontFace) -> &'static FontMetricTable {
    match face {
        FontFace::Helvetica => &HELVETICA_TABLE,
        FontFace::HelveticaBold => &HELVETICA_BOLD_TABLE,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
