use font8x8::{UnicodeFonts, BASIC_FONTS, GREEK_FONTS, LATIN_FONTS};
use image::imageops::{self, FilterType};
use image::{GrayImage, Luma};

/// Glyph cell edge in source pixels
pub const CELL: u32 = 8;

// Hollow box for characters outside the bitmap font
const MISSING_GLYPH: [u8; 8] = [0x7E, 0x42, 0x42, 0x42, 0x42, 0x42, 0x7E, 0x00];

fn glyph(c: char) -> [u8; 8] {
    BASIC_FONTS
        .get(c)
        .or_else(|| LATIN_FONTS.get(c))
        .or_else(|| GREEK_FONTS.get(c))
        .unwrap_or(MISSING_GLYPH)
}

/// Width and height in canvas pixels of `word` drawn at `font_size`
pub fn text_extent(word: &str, font_size: u32, vertical: bool) -> (u32, u32) {
    let length = word.chars().count() as u32 * font_size;
    if vertical {
        (font_size, length)
    } else {
        (length, font_size)
    }
}

/// Coverage mask of `word` in the 8x8 bitmap font at native size
fn rasterize(word: &str) -> GrayImage {
    let chars: Vec<char> = word.chars().collect();
    let mut mask = GrayImage::new(CELL * chars.len() as u32, CELL);

    for (index, c) in chars.into_iter().enumerate() {
        let origin = index as u32 * CELL;
        for (row, bits) in glyph(c).into_iter().enumerate() {
            for col in 0..CELL {
                if (bits >> col) & 1 == 1 {
                    mask.put_pixel(origin + col, row as u32, Luma([255]));
                }
            }
        }
    }

    mask
}

/// Coverage mask of `word` scaled to `font_size` with bilinear filtering,
/// rotated a quarter turn counter-clockwise when `vertical`.
pub fn render_word(word: &str, font_size: u32, vertical: bool) -> GrayImage {
    let (width, height) = text_extent(word, font_size, false);
    let scaled = imageops::resize(&rasterize(word), width.max(1), height.max(1), FilterType::Triangle);

    if vertical {
        imageops::rotate270(&scaled)
    } else {
        scaled
    }
}
