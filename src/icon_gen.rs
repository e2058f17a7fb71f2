use crate::bitmap_font::BitmapFont;
use crate::font::{default_font_strategies, select_font, FontStrategy, TextFont};
use anyhow::{Context, Result};
use image::{DynamicImage, Rgba, RgbaImage};
use std::{
    fs::{create_dir_all, File},
    io::{BufWriter, Write},
    path::{Path, PathBuf},
    str::FromStr,
};

pub const DEFAULT_OUTPUT_DIR: &str = "assets/icons";
pub const DEFAULT_TEXT: &str = "MP";

/// File name and edge length of every icon the driver produces, in order
pub const PLACEHOLDER_ICONS: [(&str, u32); 2] = [("app_icon.png", 1024), ("splash_icon.png", 512)];

pub const BACKGROUND_COLOR: Rgba<u8> = Rgba([103, 58, 183, 255]);
pub const TEXT_COLOR: Rgba<u8> = Rgba([255, 255, 255, 255]);
pub const BORDER_COLOR: Rgba<u8> = Rgba([255, 215, 0, 255]);

/// Colours used to paint a placeholder icon
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IconStyle {
    pub background: Rgba<u8>,
    pub text: Rgba<u8>,
    pub border: Rgba<u8>,
}

impl Default for IconStyle {
    fn default() -> Self {
        Self {
            background: BACKGROUND_COLOR,
            text: TEXT_COLOR,
            border: BORDER_COLOR,
        }
    }
}

/// Everything the driver needs; `Config::default()` reproduces the fixed asset set
#[derive(Debug, Clone)]
pub struct Config {
    pub output_dir: PathBuf,
    pub text: String,
    pub style: IconStyle,
    pub fonts: Vec<FontStrategy>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            text: DEFAULT_TEXT.to_string(),
            style: IconStyle::default(),
            fonts: default_font_strategies(None),
        }
    }
}

/// Parse a CSS colour (`#673ab7`, `gold`, `rgb(255, 215, 0)`) into an opaque RGBA pixel
pub fn parse_color(color: &str) -> Result<Rgba<u8>> {
    let srgb = css_color::Srgb::from_str(color)
        .map_err(|_| anyhow::anyhow!("Invalid color: {color}"))?;

    Ok(Rgba([
        (srgb.red * 255.).round() as u8,
        (srgb.green * 255.).round() as u8,
        (srgb.blue * 255.).round() as u8,
        255,
    ]))
}

/// Create the output directory, write both placeholder icons and print the next steps
pub fn generate_icons(config: &Config) -> Result<()> {
    create_dir_all(&config.output_dir).context("Can't create output directory")?;

    for (filename, size) in PLACEHOLDER_ICONS {
        let output_path = config.output_dir.join(filename);
        generate_placeholder_icon(
            size,
            &output_path,
            &config.text,
            &config.style,
            &config.fonts,
        )?;
    }

    println!("\nPlaceholder icons created successfully!");
    println!("You can now run:");
    println!("  flutter pub run flutter_launcher_icons:main");
    println!("  flutter pub run flutter_native_splash:create");
    println!("\nReplace these placeholder files with the converted SVG files later.");

    Ok(())
}

/// Render a placeholder icon and write it to `output_path` as PNG, replacing any existing file
pub fn generate_placeholder_icon(
    size: u32,
    output_path: &Path,
    text: &str,
    style: &IconStyle,
    fonts: &[FontStrategy],
) -> Result<()> {
    let canvas = render_placeholder_icon(size, text, style, fonts)?;
    save_png(canvas, output_path)?;

    println!("Created {} ({size}x{size})", output_path.display());
    Ok(())
}

/// Build the icon in memory: background, centred label, inset border
pub fn render_placeholder_icon(
    size: u32,
    text: &str,
    style: &IconStyle,
    fonts: &[FontStrategy],
) -> Result<RgbaImage> {
    if size == 0 {
        anyhow::bail!("Icon size must be positive");
    }

    let mut canvas = RgbaImage::from_pixel(size, size, style.background);

    let font = select_font(fonts, size / 4);
    let (text_width, text_height) = text_extent(font.as_ref(), text, size);
    let x = (i64::from(size) - i64::from(text_width)).div_euclid(2);
    let y = (i64::from(size) - i64::from(text_height)).div_euclid(2);

    match &font {
        Some(font) => font.draw(&mut canvas, x, y, text, style.text),
        None => {
            tracing::warn!(x, y, text, "no font available, using estimated text metrics");
            draw_estimated_label(&mut canvas, x, y, text_width, text_height, text, style.text);
        }
    }

    draw_border(&mut canvas, size / 20, size / 40, style.border);

    Ok(canvas)
}

/// Measured ink box when a font is loaded, otherwise a rough estimate of
/// `size / 8` per character
pub fn text_extent(font: Option<&TextFont>, text: &str, size: u32) -> (u32, u32) {
    match font {
        Some(font) => font.text_extent(text),
        None => {
            let cell = size / 8;
            (text.chars().count() as u32 * cell, cell)
        }
    }
}

/// Paint the label inside the estimated `width x height` box at `(x, y)` using
/// bitmap cells sized to the estimated line height
fn draw_estimated_label(
    canvas: &mut RgbaImage,
    x: i64,
    y: i64,
    width: u32,
    height: u32,
    text: &str,
    color: Rgba<u8>,
) {
    let font = BitmapFont::for_font_size(height);
    let clip = (x, y, x + i64::from(width), y + i64::from(height));
    font.draw_clipped(canvas, x, y, text, color, clip);
}

/// Stroke a square ring `stroke` pixels wide whose outer edge sits `inset` pixels
/// inside the canvas. The far edge is inclusive, so it lands on `size - inset`.
pub fn draw_border(canvas: &mut RgbaImage, inset: u32, stroke: u32, color: Rgba<u8>) {
    let size = canvas.width().min(canvas.height());
    if size == 0 {
        return;
    }

    for i in 0..stroke {
        let near = inset + i;
        let Some(far) = size.checked_sub(inset + i) else {
            break;
        };
        if near > far {
            break;
        }
        let far_clipped = far.min(size - 1);

        for t in near..=far_clipped {
            canvas.put_pixel(t, near, color);
            canvas.put_pixel(near, t, color);
            if far < size {
                canvas.put_pixel(t, far, color);
                canvas.put_pixel(far, t, color);
            }
        }
    }
}

fn save_png(canvas: RgbaImage, path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create PNG file {}", path.display()))?;
    let mut writer = BufWriter::new(file);

    DynamicImage::ImageRgba8(canvas)
        .write_to(&mut writer, image::ImageOutputFormat::Png)
        .context("Failed to write PNG")?;
    writer.flush().context("Failed to flush PNG file")?;

    Ok(())
}
