//! # Image Rendering
//!
//! PNG output for the two things the API ever returns: a QR code, or a
//! picture of an error message sized like one (so `<img>` tags keep their
//! layout either way).
//!
//! ## Error Image Layout
//! ```text
//! ┌──────────────────────────┐
//! │                          │
//! │    Invalid 'purpose'     │  ◄── words wrapped greedily to width - 20
//! │   parameter (max 4       │  ◄── each line centered horizontally
//! │       characters)        │
//! │                          │  ◄── block centered vertically
//! └──────────────────────────┘
//! ```

use std::io::Cursor;

use font8x8::{UnicodeFonts, BASIC_FONTS};
use image::{GrayImage, ImageFormat, Luma};
use qrcode::types::QrError;
use qrcode::{EcLevel, QrCode};

/// Glyph edge of the bitmap font in pixels.
const GLYPH_SIZE: u32 = 8;

/// Vertical distance between text baselines.
const LINE_HEIGHT: u32 = 12;

/// Horizontal padding kept free on both sides combined.
const TEXT_PADDING: u32 = 20;

const WHITE: Luma<u8> = Luma([255]);
const BLACK: Luma<u8> = Luma([0]);

/// Rendering error types.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("QR encoding failed: {0}")]
    Qr(#[from] QrError),

    #[error("PNG encoding failed: {0}")]
    Png(#[from] image::ImageError),
}

/// Encodes `data` as a QR code (error correction level M) and returns PNG
/// bytes at least `size` pixels wide.
pub fn render_qr_png(data: &str, size: u32) -> Result<Vec<u8>, RenderError> {
    let code = QrCode::with_error_correction_level(data.as_bytes(), EcLevel::M)?;
    let image = code
        .render::<Luma<u8>>()
        .min_dimensions(size, size)
        .build();
    encode_png(&image)
}

/// Draws `message` black on white, wrapped and centered, and returns PNG
/// bytes of a `width` × `height` image.
pub fn render_message_png(message: &str, width: u32, height: u32) -> Result<Vec<u8>, RenderError> {
    let mut image = GrayImage::from_pixel(width, height, WHITE);

    let lines = wrap_words(message, width.saturating_sub(TEXT_PADDING));
    let block_height = lines.len() as u32 * LINE_HEIGHT;
    let mut y = height.saturating_sub(block_height) / 2;

    for line in &lines {
        let x = width.saturating_sub(text_width(line)) / 2;
        draw_text(&mut image, line, x, y + (LINE_HEIGHT - GLYPH_SIZE) / 2);
        y += LINE_HEIGHT;
    }

    encode_png(&image)
}

fn encode_png(image: &GrayImage) -> Result<Vec<u8>, RenderError> {
    let mut out = Cursor::new(Vec::new());
    image.write_to(&mut out, ImageFormat::Png)?;
    Ok(out.into_inner())
}

fn text_width(text: &str) -> u32 {
    text.chars().count() as u32 * GLYPH_SIZE
}

/// Greedy word wrap keeping each line strictly narrower than `max_width`.
///
/// A single word wider than `max_width` gets a line of its own and is
/// clipped at the image edge when drawn.
fn wrap_words(message: &str, max_width: u32) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in message.split_whitespace() {
        let candidate = if current.is_empty() {
            word.to_string()
        } else {
            format!("{current} {word}")
        };

        if text_width(&candidate) < max_width || current.is_empty() {
            current = candidate;
        } else {
            lines.push(std::mem::replace(&mut current, word.to_string()));
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

fn draw_text(image: &mut GrayImage, text: &str, x: u32, y: u32) {
    for (i, ch) in text.chars().enumerate() {
        let glyph = BASIC_FONTS
            .get(ch)
            .or_else(|| BASIC_FONTS.get('?'))
            .unwrap_or([0; 8]);
        let origin_x = x + i as u32 * GLYPH_SIZE;

        for (row, bits) in glyph.iter().enumerate() {
            for col in 0..GLYPH_SIZE {
                // Bit 0 is the leftmost pixel
                if *bits & (1u8 << col) == 0 {
                    continue;
                }
                let (px, py) = (origin_x + col, y + row as u32);
                if px < image.width() && py < image.height() {
                    image.put_pixel(px, py, BLACK);
                }
            }
        }
    }
}
