//! Font acquisition and text drawing
//!
//! Fonts are acquired through an ordered list of [`FontStrategy`] values. The
//! first strategy that yields a usable font wins; every failure is logged and
//! swallowed so that a missing font never stops an icon from being generated.

use crate::bitmap_font::BitmapFont;
use anyhow::{anyhow, Context, Result};
use image::{Rgba, RgbaImage};
use rusttype::{point, Font, Scale};
use std::path::PathBuf;

/// System locations tried after `arial.ttf` in the working directory
const SYSTEM_FONT_PATHS: [&str; 9] = [
    "/usr/share/fonts/truetype/msttcorefonts/Arial.ttf",
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/usr/share/fonts/liberation-sans/LiberationSans-Regular.ttf",
    "/Library/Fonts/Arial.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
    "C:\\Windows\\Fonts\\segoeui.ttf",
];

/// One way of obtaining a font for the label text
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FontStrategy {
    /// A TrueType/OpenType file on disk, rasterised at the requested pixel height
    TrueType { path: PathBuf },
    /// The 5x7 font compiled into the binary
    BuiltinBitmap,
}

impl FontStrategy {
    pub fn load(&self, font_size: u32) -> Result<TextFont> {
        match self {
            FontStrategy::TrueType { path } => {
                if font_size == 0 {
                    anyhow::bail!("Font size must be positive");
                }
                let data = std::fs::read(path)
                    .with_context(|| format!("Failed to read font file {}", path.display()))?;
                let font = Font::try_from_vec(data)
                    .ok_or_else(|| anyhow!("Invalid font data in {}", path.display()))?;
                let scale = em_scale(&font, font_size)
                    .ok_or_else(|| anyhow!("Font {} has no usable metrics", path.display()))?;
                Ok(TextFont::Scalable { font, scale })
            }
            FontStrategy::BuiltinBitmap => Ok(TextFont::Bitmap(BitmapFont::for_font_size(font_size))),
        }
    }

    fn describe(&self) -> String {
        match self {
            FontStrategy::TrueType { path } => path.display().to_string(),
            FontStrategy::BuiltinBitmap => "built-in bitmap font".to_string(),
        }
    }
}

/// rusttype scales by ascent-to-descent height; convert an em size in pixels to that
fn em_scale(font: &Font<'static>, font_size: u32) -> Option<Scale> {
    let units_per_em = f32::from(font.units_per_em());
    let v_metrics = font.v_metrics_unscaled();
    let line_height = v_metrics.ascent - v_metrics.descent;
    if units_per_em <= 0.0 || line_height <= 0.0 {
        return None;
    }

    Some(Scale::uniform(font_size as f32 * line_height / units_per_em))
}

/// The default acquisition order: an explicit font if given, then Arial and common
/// sans-serif fonts, then the built-in bitmap font
pub fn default_font_strategies(preferred: Option<PathBuf>) -> Vec<FontStrategy> {
    let mut strategies = Vec::new();

    if let Some(path) = preferred {
        strategies.push(FontStrategy::TrueType { path });
    }

    strategies.push(FontStrategy::TrueType {
        path: PathBuf::from("arial.ttf"),
    });
    strategies.extend(SYSTEM_FONT_PATHS.iter().map(|path| FontStrategy::TrueType {
        path: PathBuf::from(path),
    }));
    strategies.push(FontStrategy::BuiltinBitmap);

    strategies
}

/// Try each strategy in order and return the first font that loads
pub fn select_font(strategies: &[FontStrategy], font_size: u32) -> Option<TextFont> {
    for strategy in strategies {
        match strategy.load(font_size) {
            Ok(font) => {
                tracing::info!(font = %strategy.describe(), font_size, "selected font");
                return Some(font);
            }
            Err(err) => {
                tracing::debug!(font = %strategy.describe(), error = %err, "font unavailable");
            }
        }
    }

    None
}

/// A font ready to measure and draw text
#[derive(Clone)]
pub enum TextFont {
    Scalable { font: Font<'static>, scale: Scale },
    Bitmap(BitmapFont),
}

impl TextFont {
    /// Width and height of the ink covered by `text`
    pub fn text_extent(&self, text: &str) -> (u32, u32) {
        match self {
            TextFont::Scalable { font, scale } => match ink_box(font, *scale, text) {
                Some((min_x, min_y, max_x, max_y)) => {
                    ((max_x - min_x) as u32, (max_y - min_y) as u32)
                }
                None => (0, 0),
            },
            TextFont::Bitmap(bitmap) => bitmap.text_extent(text),
        }
    }

    /// Draw `text` so that the top-left corner of its ink lands on `(x, y)`
    pub fn draw(&self, canvas: &mut RgbaImage, x: i64, y: i64, text: &str, color: Rgba<u8>) {
        match self {
            TextFont::Scalable { font, scale } => draw_scalable(canvas, font, *scale, x, y, text, color),
            TextFont::Bitmap(bitmap) => bitmap.draw(canvas, x, y, text, color),
        }
    }
}

/// Union of the glyph pixel boxes, laid out from the ascender line at the origin
fn ink_box(font: &Font<'static>, scale: Scale, text: &str) -> Option<(i32, i32, i32, i32)> {
    let ascent = font.v_metrics(scale).ascent;

    font.layout(text, scale, point(0.0, ascent))
        .filter_map(|glyph| glyph.pixel_bounding_box())
        .map(|bb| (bb.min.x, bb.min.y, bb.max.x, bb.max.y))
        .reduce(|a, b| (a.0.min(b.0), a.1.min(b.1), a.2.max(b.2), a.3.max(b.3)))
}

fn draw_scalable(
    canvas: &mut RgbaImage,
    font: &Font<'static>,
    scale: Scale,
    x: i64,
    y: i64,
    text: &str,
    color: Rgba<u8>,
) {
    let Some((min_x, min_y, _, _)) = ink_box(font, scale, text) else {
        return;
    };
    let offset_x = x - i64::from(min_x);
    let offset_y = y - i64::from(min_y);
    let (width, height) = (i64::from(canvas.width()), i64::from(canvas.height()));
    let ascent = font.v_metrics(scale).ascent;

    for glyph in font.layout(text, scale, point(0.0, ascent)) {
        let Some(bb) = glyph.pixel_bounding_box() else {
            continue;
        };
        glyph.draw(|gx, gy, coverage| {
            let px = offset_x + i64::from(bb.min.x) + i64::from(gx);
            let py = offset_y + i64::from(bb.min.y) + i64::from(gy);
            if px < 0 || py < 0 || px >= width || py >= height {
                return;
            }
            let pixel = canvas.get_pixel_mut(px as u32, py as u32);
            *pixel = blend(*pixel, color, coverage);
        });
    }
}

/// Linear mix of `fg` over `bg` by glyph coverage in `0.0..=1.0`
fn blend(bg: Rgba<u8>, fg: Rgba<u8>, coverage: f32) -> Rgba<u8> {
    let coverage = coverage.clamp(0.0, 1.0);
    let mut out = bg;
    for channel in 0..4 {
        let mixed = bg[channel] as f32 + (fg[channel] as f32 - bg[channel] as f32) * coverage;
        out[channel] = mixed.round() as u8;
    }
    out
}
