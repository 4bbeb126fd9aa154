//! Status text drawn onto displayed frames.
//!
//! Text is rasterised from the `font8x8` bitmap set straight into an RGB
//! image, so the readout stays visible in full screen where there is no
//! title bar. Renderers draw onto a copy of the frame; captured frames are
//! never annotated.

use font8x8::{BASIC_FONTS, UnicodeFonts};
use image::{Rgb, RgbImage};

/// Side length of a glyph cell at scale 1.
const GLYPH_SIZE: u32 = 8;

/// Top-left corner of the first glyph.
const ORIGIN: (u32, u32) = (2, 2);

/// Frame height covered by one glyph scale step.
const LINES_PER_SCALE: u32 = 480;

/// Text colour (red, as in the classic player).
pub const OVERLAY_COLOR: Rgb<u8> = Rgb([255, 0, 0]);

/// Drop shadow keeping the text readable on bright frames.
pub const SHADOW_COLOR: Rgb<u8> = Rgb([0, 0, 0]);

/// Integer glyph scale for a frame `height` pixels tall.
pub fn overlay_scale(height: u32) -> u32 {
    (height / LINES_PER_SCALE).max(1)
}

/// Draw `text` in the top-left corner of `image`.
///
/// Glyphs running off the right or bottom edge are clipped. Characters
/// outside Basic Latin leave a blank cell.
///
/// # Example
///
/// ```
/// use framescrub::overlay::{OVERLAY_COLOR, draw_overlay};
/// use image::RgbImage;
///
/// let mut image = RgbImage::new(160, 40);
/// draw_overlay(&mut image, "Frame 3 / 99 (25.0 FPS)");
/// assert!(image.pixels().any(|pixel| *pixel == OVERLAY_COLOR));
/// ```
pub fn draw_overlay(image: &mut RgbImage, text: &str) {
    let scale = overlay_scale(image.height());
    let (left, top) = ORIGIN;

    draw_text(image, text, left + scale, top + scale, scale, SHADOW_COLOR);
    draw_text(image, text, left, top, scale, OVERLAY_COLOR);
}

fn draw_text(
    image: &mut RgbImage,
    text: &str,
    left: u32,
    top: u32,
    scale: u32,
    color: Rgb<u8>,
) {
    let advance = GLYPH_SIZE * scale;
    let mut x = left;

    for character in text.chars() {
        if x >= image.width() {
            break;
        }
        if let Some(glyph) = BASIC_FONTS.get(character) {
            draw_glyph(image, &glyph, x, top, scale, color);
        }
        x = x.saturating_add(advance);
    }
}

/// Bit 0 of each glyph row is its leftmost pixel.
fn draw_glyph(
    image: &mut RgbImage,
    glyph: &[u8; 8],
    left: u32,
    top: u32,
    scale: u32,
    color: Rgb<u8>,
) {
    for (row, &bits) in (0u32..).zip(glyph.iter()) {
        for column in 0..GLYPH_SIZE {
            if bits & (1u8 << column) == 0 {
                continue;
            }
            let x = left + column * scale;
            let y = top + row * scale;
            for dy in 0..scale {
                for dx in 0..scale {
                    put(image, x + dx, y + dy, color);
                }
            }
        }
    }
}

fn put(image: &mut RgbImage, x: u32, y: u32, color: Rgb<u8>) {
    if x < image.width() && y < image.height() {
        image.put_pixel(x, y, color);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text_pixels(image: &RgbImage) -> usize {
        image.pixels().filter(|pixel| **pixel == OVERLAY_COLOR).count()
    }

    #[test]
    fn text_lands_in_top_left_band() {
        let mut image = RgbImage::from_pixel(320, 240, Rgb([40, 40, 40]));
        draw_overlay(&mut image, "Frame 12 / 99 (25.0 FPS)");

        assert!(text_pixels(&image) > 0);

        // Scale 1: glyph rows 2..10, shadow one pixel lower.
        for (_, y, pixel) in image.enumerate_pixels() {
            if y >= 11 {
                assert_eq!(*pixel, Rgb([40, 40, 40]), "row {y} was touched");
            }
        }
    }

    #[test]
    fn empty_and_blank_text_leave_image_untouched() {
        let original = RgbImage::from_pixel(64, 32, Rgb([10, 200, 30]));

        let mut image = original.clone();
        draw_overlay(&mut image, "");
        assert_eq!(image, original);

        let mut image = original.clone();
        draw_overlay(&mut image, "   ");
        assert_eq!(image, original);
    }

    #[test]
    fn tiny_and_narrow_images_are_clipped() {
        let mut tiny = RgbImage::new(3, 3);
        draw_overlay(&mut tiny, "Frame 0 / 0 (0.0 FPS)");

        let mut narrow = RgbImage::new(20, 200);
        draw_overlay(&mut narrow, &"8".repeat(500));
        assert!(text_pixels(&narrow) > 0);
    }

    #[test]
    fn scale_follows_frame_height() {
        assert_eq!(overlay_scale(0), 1);
        assert_eq!(overlay_scale(240), 1);
        assert_eq!(overlay_scale(720), 1);
        assert_eq!(overlay_scale(1080), 2);
        assert_eq!(overlay_scale(2160), 4);
    }

    #[test]
    fn larger_frames_get_larger_text() {
        let mut small = RgbImage::new(640, 480);
        let mut large = RgbImage::new(1280, 960);
        draw_overlay(&mut small, "0");
        draw_overlay(&mut large, "0");

        assert_eq!(text_pixels(&large), text_pixels(&small) * 4);
    }

    #[test]
    fn unknown_characters_leave_a_gap() {
        let mut with_gap = RgbImage::new(64, 16);
        let mut without = RgbImage::new(64, 16);
        draw_overlay(&mut with_gap, "1\u{2603}1");
        draw_overlay(&mut without, "1 1");

        assert_eq!(with_gap, without);
    }
}
