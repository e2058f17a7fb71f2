//! Built-in 5x7 bitmap font
//!
//! Used when no scalable font can be found on the machine. Each glyph is seven
//! rows of five bits, most significant bit on the left. Cells are scaled by an
//! integer factor so the text stays proportional to the canvas.

use image::{Rgba, RgbaImage};

pub const GLYPH_WIDTH: u32 = 5;
pub const GLYPH_HEIGHT: u32 = 7;
/// Horizontal gap between two cells, in unscaled pixels
pub const GLYPH_SPACING: u32 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BitmapFont {
    scale: u32,
}

impl BitmapFont {
    /// Pick the scale whose cell height comes closest to `font_size` without exceeding it
    pub fn for_font_size(font_size: u32) -> Self {
        Self {
            scale: (font_size / GLYPH_HEIGHT).max(1),
        }
    }

    pub fn scale(&self) -> u32 {
        self.scale
    }

    /// Exact ink box of `text`: `(6n - 1) * k` wide and `7k` tall
    pub fn text_extent(&self, text: &str) -> (u32, u32) {
        let count = text.chars().count() as u32;
        if count == 0 {
            return (0, 0);
        }
        let advance = GLYPH_WIDTH + GLYPH_SPACING;
        (
            (count * advance - GLYPH_SPACING) * self.scale,
            GLYPH_HEIGHT * self.scale,
        )
    }

    /// Paint `text` with its top-left corner at `(x, y)`, clipping to the canvas
    pub fn draw(&self, canvas: &mut RgbaImage, x: i64, y: i64, text: &str, color: Rgba<u8>) {
        let clip = (0, 0, i64::from(canvas.width()), i64::from(canvas.height()));
        self.draw_clipped(canvas, x, y, text, color, clip);
    }

    /// Like [`BitmapFont::draw`], but only pixels inside `clip` (`min_x, min_y, max_x, max_y`,
    /// max exclusive) are painted
    pub fn draw_clipped(
        &self,
        canvas: &mut RgbaImage,
        x: i64,
        y: i64,
        text: &str,
        color: Rgba<u8>,
        clip: (i64, i64, i64, i64),
    ) {
        let (width, height) = (i64::from(canvas.width()), i64::from(canvas.height()));
        let clip = (clip.0.max(0), clip.1.max(0), clip.2.min(width), clip.3.min(height));
        let scale = i64::from(self.scale);
        let advance = i64::from(GLYPH_WIDTH + GLYPH_SPACING) * scale;

        for (index, ch) in text.chars().enumerate() {
            let origin_x = x + index as i64 * advance;
            let rows = glyph(ch);

            for (row, bits) in rows.iter().enumerate() {
                for col in 0..GLYPH_WIDTH {
                    if bits & (1 << (GLYPH_WIDTH - 1 - col)) == 0 {
                        continue;
                    }
                    let cell_x = origin_x + i64::from(col) * scale;
                    let cell_y = y + row as i64 * scale;
                    fill_cell(canvas, cell_x, cell_y, scale, color, clip);
                }
            }
        }
    }
}

fn fill_cell(
    canvas: &mut RgbaImage,
    x: i64,
    y: i64,
    scale: i64,
    color: Rgba<u8>,
    clip: (i64, i64, i64, i64),
) {
    for py in y.max(clip.1)..(y + scale).min(clip.3) {
        for px in x.max(clip.0)..(x + scale).min(clip.2) {
            canvas.put_pixel(px as u32, py as u32, color);
        }
    }
}

/// Rows for `ch`; lowercase maps to uppercase and anything unknown becomes `?`
fn glyph(ch: char) -> [u8; 7] {
    match ch.to_ascii_uppercase() {
        ' ' => [0; 7],
        'A' => [0b01110, 0b10001, 0b10001, 0b11111, 0b10001, 0b10001, 0b10001],
        'B' => [0b11110, 0b10001, 0b10001, 0b11110, 0b10001, 0b10001, 0b11110],
        'C' => [0b01110, 0b10001, 0b10000, 0b10000, 0b10000, 0b10001, 0b01110],
        'D' => [0b11100, 0b10010, 0b10001, 0b10001, 0b10001, 0b10010, 0b11100],
        'E' => [0b11111, 0b10000, 0b10000, 0b11110, 0b10000, 0b10000, 0b11111],
        'F' => [0b11111, 0b10000, 0b10000, 0b11110, 0b10000, 0b10000, 0b10000],
        'G' => [0b01110, 0b10001, 0b10000, 0b10111, 0b10001, 0b10001, 0b01111],
        'H' => [0b10001, 0b10001, 0b10001, 0b11111, 0b10001, 0b10001, 0b10001],
        'I' => [0b01110, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100, 0b01110],
        'J' => [0b00111, 0b00010, 0b00010, 0b00010, 0b00010, 0b10010, 0b01100],
        'K' => [0b10001, 0b10010, 0b10100, 0b11000, 0b10100, 0b10010, 0b10001],
        'L' => [0b10000, 0b10000, 0b10000, 0b10000, 0b10000, 0b10000, 0b11111],
        'M' => [0b10001, 0b11011, 0b10101, 0b10101, 0b10001, 0b10001, 0b10001],
        'N' => [0b10001, 0b10001, 0b11001, 0b10101, 0b10011, 0b10001, 0b10001],
        'O' => [0b01110, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b01110],
        'P' => [0b11110, 0b10001, 0b10001, 0b11110, 0b10000, 0b10000, 0b10000],
        'Q' => [0b01110, 0b10001, 0b10001, 0b10001, 0b10101, 0b10010, 0b01101],
        'R' => [0b11110, 0b10001, 0b10001, 0b11110, 0b10100, 0b10010, 0b10001],
        'S' => [0b01111, 0b10000, 0b10000, 0b01110, 0b00001, 0b00001, 0b11110],
        'T' => [0b11111, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100],
        'U' => [0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b01110],
        'V' => [0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b01010, 0b00100],
        'W' => [0b10001, 0b10001, 0b10001, 0b10101, 0b10101, 0b10101, 0b01010],
        'X' => [0b10001, 0b10001, 0b01010, 0b00100, 0b01010, 0b10001, 0b10001],
        'Y' => [0b10001, 0b10001, 0b10001, 0b01010, 0b00100, 0b00100, 0b00100],
        'Z' => [0b11111, 0b00001, 0b00010, 0b00100, 0b01000, 0b10000, 0b11111],
        '0' => [0b01110, 0b10001, 0b10011, 0b10101, 0b11001, 0b10001, 0b01110],
        '1' => [0b00100, 0b01100, 0b00100, 0b00100, 0b00100, 0b00100, 0b01110],
        '2' => [0b01110, 0b10001, 0b00001, 0b00010, 0b00100, 0b01000, 0b11111],
        '3' => [0b11111, 0b00010, 0b00100, 0b00010, 0b00001, 0b10001, 0b01110],
        '4' => [0b00010, 0b00110, 0b01010, 0b10010, 0b11111, 0b00010, 0b00010],
        '5' => [0b11111, 0b10000, 0b11110, 0b00001, 0b00001, 0b10001, 0b01110],
        '6' => [0b00110, 0b01000, 0b10000, 0b11110, 0b10001, 0b10001, 0b01110],
        '7' => [0b11111, 0b00001, 0b00010, 0b00100, 0b01000, 0b01000, 0b01000],
        '8' => [0b01110, 0b10001, 0b10001, 0b01110, 0b10001, 0b10001, 0b01110],
        '9' => [0b01110, 0b10001, 0b10001, 0b01111, 0b00001, 0b00010, 0b01100],
        '-' => [0b00000, 0b00000, 0b00000, 0b11111, 0b00000, 0b00000, 0b00000],
        '.' => [0b00000, 0b00000, 0b00000, 0b00000, 0b00000, 0b01100, 0b01100],
        _ => [0b01110, 0b10001, 0b00001, 0b00010, 0b00100, 0b00000, 0b00100],
    }
}
