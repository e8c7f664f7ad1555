//! Built-in 5×7 bitmap font for the Text primitive.
//!
//! Covers `A`–`Z`, `0`–`9`, space and `! @ # & * ? . -`. Lowercase letters
//! render as their uppercase form; anything else renders as `?`.

use glam::DVec2;

use crate::geometry::Bounds;

pub const GLYPH_COLUMNS: u32 = 5;
pub const GLYPH_ROWS: u32 = 7;

/// Horizontal advance per character, in cells (glyph width plus one gap).
const ADVANCE: f64 = 6.0;

/// Rows top to bottom; bit 4 is the leftmost column.
type Bitmap = [u8; GLYPH_ROWS as usize];

const BLANK: Bitmap = [0; 7];
const QUESTION: Bitmap = [0x0E, 0x11, 0x01, 0x02, 0x04, 0x00, 0x04];

fn bitmap(ch: char) -> Bitmap {
    match ch.to_ascii_uppercase() {
        'A' => [0x0E, 0x11, 0x11, 0x1F, 0x11, 0x11, 0x11],
        'B' => [0x1E, 0x11, 0x11, 0x1E, 0x11, 0x11, 0x1E],
        'C' => [0x0E, 0x11, 0x10, 0x10, 0x10, 0x11, 0x0E],
        'D' => [0x1E, 0x11, 0x11, 0x11, 0x11, 0x11, 0x1E],
        'E' => [0x1F, 0x10, 0x10, 0x1E, 0x10, 0x10, 0x1F],
        'F' => [0x1F, 0x10, 0x10, 0x1E, 0x10, 0x10, 0x10],
        'G' => [0x0E, 0x11, 0x10, 0x17, 0x11, 0x11, 0x0F],
        'H' => [0x11, 0x11, 0x11, 0x1F, 0x11, 0x11, 0x11],
        'I' => [0x0E, 0x04, 0x04, 0x04, 0x04, 0x04, 0x0E],
        'J' => [0x07, 0x02, 0x02, 0x02, 0x02, 0x12, 0x0C],
        'K' => [0x11, 0x12, 0x14, 0x18, 0x14, 0x12, 0x11],
        'L' => [0x10, 0x10, 0x10, 0x10, 0x10, 0x10, 0x1F],
        'M' => [0x11, 0x1B, 0x15, 0x15, 0x11, 0x11, 0x11],
        'N' => [0x11, 0x11, 0x19, 0x15, 0x13, 0x11, 0x11],
        'O' => [0x0E, 0x11, 0x11, 0x11, 0x11, 0x11, 0x0E],
        'P' => [0x1E, 0x11, 0x11, 0x1E, 0x10, 0x10, 0x10],
        'Q' => [0x0E, 0x11, 0x11, 0x11, 0x15, 0x12, 0x0D],
        'R' => [0x1E, 0x11, 0x11, 0x1E, 0x14, 0x12, 0x11],
        'S' => [0x0F, 0x10, 0x10, 0x0E, 0x01, 0x01, 0x1E],
        'T' => [0x1F, 0x04, 0x04, 0x04, 0x04, 0x04, 0x04],
        'U' => [0x11, 0x11, 0x11, 0x11, 0x11, 0x11, 0x0E],
        'V' => [0x11, 0x11, 0x11, 0x11, 0x11, 0x0A, 0x04],
        'W' => [0x11, 0x11, 0x11, 0x15, 0x15, 0x15, 0x0A],
        'X' => [0x11, 0x11, 0x0A, 0x04, 0x0A, 0x11, 0x11],
        'Y' => [0x11, 0x11, 0x0A, 0x04, 0x04, 0x04, 0x04],
        'Z' => [0x1F, 0x01, 0x02, 0x04, 0x08, 0x10, 0x1F],
        '0' => [0x0E, 0x11, 0x13, 0x15, 0x19, 0x11, 0x0E],
        '1' => [0x04, 0x0C, 0x04, 0x04, 0x04, 0x04, 0x0E],
        '2' => [0x0E, 0x11, 0x01, 0x02, 0x04, 0x08, 0x1F],
        '3' => [0x1F, 0x02, 0x04, 0x02, 0x01, 0x11, 0x0E],
        '4' => [0x02, 0x06, 0x0A, 0x12, 0x1F, 0x02, 0x02],
        '5' => [0x1F, 0x10, 0x1E, 0x01, 0x01, 0x11, 0x0E],
        '6' => [0x06, 0x08, 0x10, 0x1E, 0x11, 0x11, 0x0E],
        '7' => [0x1F, 0x01, 0x02, 0x04, 0x08, 0x08, 0x08],
        '8' => [0x0E, 0x11, 0x11, 0x0E, 0x11, 0x11, 0x0E],
        '9' => [0x0E, 0x11, 0x11, 0x0F, 0x01, 0x02, 0x0C],
        '!' => [0x04, 0x04, 0x04, 0x04, 0x04, 0x00, 0x04],
        '@' => [0x0E, 0x11, 0x01, 0x0D, 0x15, 0x15, 0x0E],
        '#' => [0x0A, 0x0A, 0x1F, 0x0A, 0x1F, 0x0A, 0x0A],
        '&' => [0x0C, 0x12, 0x14, 0x08, 0x15, 0x12, 0x0D],
        '*' => [0x00, 0x04, 0x15, 0x0E, 0x15, 0x04, 0x00],
        '.' => [0x00, 0x00, 0x00, 0x00, 0x00, 0x0C, 0x0C],
        '-' => [0x00, 0x00, 0x00, 0x1F, 0x00, 0x00, 0x00],
        ' ' => BLANK,
        _ => QUESTION,
    }
}

/// Lays out `text` as filled rectangles.
///
/// `origin` is the left end of the baseline and `cap_height` the glyph height
/// in pixels. Horizontally adjacent lit cells in a row merge into one
/// rectangle.
pub fn layout(text: &str, origin: DVec2, cap_height: f64) -> Vec<Bounds> {
    let cell = cap_height / GLYPH_ROWS as f64;
    let top = origin.y - cap_height;
    let mut rects = Vec::new();
    for (index, ch) in text.chars().enumerate() {
        let left = origin.x + index as f64 * ADVANCE * cell;
        for (row, bits) in bitmap(ch).iter().enumerate() {
            let y = top + row as f64 * cell;
            let mut col = 0;
            while col < GLYPH_COLUMNS {
                if !lit(*bits, col) {
                    col += 1;
                    continue;
                }
                let start = col;
                while col < GLYPH_COLUMNS && lit(*bits, col) {
                    col += 1;
                }
                rects.push(Bounds::new(
                    DVec2::new(left + start as f64 * cell, y),
                    DVec2::new(left + col as f64 * cell, y + cell),
                ));
            }
        }
    }
    rects
}

fn lit(bits: u8, col: u32) -> bool {
    bits & (1 << (GLYPH_COLUMNS - 1 - col)) != 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn space_lays_out_nothing() {
        assert!(layout(" ", DVec2::ZERO, 14.0).is_empty());
    }

    #[test]
    fn minus_is_one_full_width_bar() {
        let rects = layout("-", DVec2::new(10.0, 70.0), 70.0);
        assert_eq!(rects.len(), 1);
        let bar = rects[0];
        assert_eq!(bar.min, DVec2::new(10.0, 30.0));
        assert_eq!(bar.max, DVec2::new(60.0, 40.0));
    }

    #[test]
    fn glyphs_sit_on_the_baseline() {
        let rects = layout("A", DVec2::new(0.0, 100.0), 35.0);
        let top = rects.iter().map(|r| r.min.y).fold(f64::INFINITY, f64::min);
        let bottom = rects.iter().map(|r| r.max.y).fold(f64::NEG_INFINITY, f64::max);
        assert!((top - 65.0).abs() < 1e-9);
        assert!((bottom - 100.0).abs() < 1e-9);
    }

    #[test]
    fn characters_advance_by_six_cells() {
        let one = layout("I", DVec2::ZERO, 7.0);
        let two = layout("II", DVec2::ZERO, 7.0);
        assert_eq!(two.len(), one.len() * 2);
        let shift = two[one.len()].min.x - one[0].min.x;
        assert!((shift - 6.0).abs() < 1e-9);
    }

    #[test]
    fn lowercase_matches_uppercase() {
        assert_eq!(layout("art", DVec2::ZERO, 7.0), layout("ART", DVec2::ZERO, 7.0));
    }

    #[test]
    fn unknown_characters_render_as_question_mark() {
        assert_eq!(layout("~", DVec2::ZERO, 7.0), layout("?", DVec2::ZERO, 7.0));
    }

    #[test]
    fn every_random_glyph_has_ink() {
        for ch in "ABC123!@#&*XYZ".chars() {
            let text = ch.to_string();
            assert!(!layout(&text, DVec2::ZERO, 7.0).is_empty(), "{ch} is blank");
        }
    }
}
