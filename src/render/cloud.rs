use crate::config::RenderConfig;
use crate::render::frequency::{count_words, top_words, WeightedWord};
use crate::render::glyphs::{render_word, text_extent};
use crate::render::layout::OccupancyMap;
use crate::render::palette::{blend, viridis};
use crate::render::{CloudRenderer, RenderError, StopWords};
use image::{DynamicImage, GrayImage, ImageFormat, Rgb, RgbImage};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::io::Cursor;
use tracing::debug;

/// Layout knobs for [`BitmapCloudRenderer`]
#[derive(Debug, Clone)]
pub struct CloudOptions {
    pub background: Rgb<u8>,
    pub max_words: usize,
    pub min_font_size: u32,
    pub max_font_size: Option<u32>,
    pub font_step: u32,
    pub relative_scaling: f32,
    pub prefer_horizontal: f32,
    pub margin: u32,
    pub random_state: Option<u64>,
}

impl Default for CloudOptions {
    fn default() -> Self {
        Self::from(&RenderConfig::default())
    }
}

impl From<&RenderConfig> for CloudOptions {
    fn from(config: &RenderConfig) -> Self {
        Self {
            background: Rgb(config.background),
            max_words: config.max_words,
            min_font_size: config.min_font_size,
            max_font_size: config.max_font_size,
            font_step: config.font_step,
            relative_scaling: config.relative_scaling,
            prefer_horizontal: config.prefer_horizontal,
            margin: config.margin,
            random_state: config.random_state,
        }
    }
}

struct Placement {
    x: u32,
    y: u32,
    mask: GrayImage,
    color: Rgb<u8>,
}

/// Frequency-weighted word cloud drawn with a scaled bitmap font.
///
/// Words are placed largest first along a spiral from the canvas centre; a word
/// that does not fit is tried rotated, then shrunk, and placement stops once the
/// font drops below `min_font_size`.
#[derive(Debug, Clone, Default)]
pub struct BitmapCloudRenderer {
    options: CloudOptions,
}

impl BitmapCloudRenderer {
    pub fn new(options: CloudOptions) -> Self {
        Self { options }
    }

    fn seed_for(&self, text: &str) -> u64 {
        self.options.random_state.unwrap_or_else(|| {
            let mut hasher = DefaultHasher::new();
            text.hash(&mut hasher);
            hasher.finish()
        })
    }

    fn layout(&self, words: &[WeightedWord], width: u32, height: u32, rng: &mut StdRng) -> Vec<Placement> {
        let opts = &self.options;
        let mut occupancy = OccupancyMap::new(width, height);
        let mut placements = Vec::with_capacity(words.len());

        let mut font_size = opts.max_font_size.unwrap_or(height);
        let mut last_weight = 1.0f32;

        for entry in words {
            if opts.relative_scaling > 0.0 {
                let rs = opts.relative_scaling;
                font_size = ((rs * entry.weight / last_weight + (1.0 - rs)) * font_size as f32).round() as u32;
            }

            let mut vertical = rng.gen_range(0.0f32..1.0) >= opts.prefer_horizontal;
            let mut rotated = false;
            let position = loop {
                if font_size < opts.min_font_size {
                    break None;
                }

                let (w, h) = text_extent(&entry.word, font_size, vertical);
                if let Some(found) = occupancy.find_position(w + opts.margin, h + opts.margin, rng) {
                    break Some(found);
                }

                if !rotated && opts.prefer_horizontal < 1.0 {
                    vertical = !vertical;
                    rotated = true;
                    continue;
                }

                rotated = false;
                vertical = false;
                font_size = font_size.saturating_sub(opts.font_step);
            };

            let Some((x, y)) = position else {
                debug!(word = %entry.word, placed = placements.len(), "Font below minimum, stopping layout");
                break;
            };

            let mask = render_word(&entry.word, font_size, vertical);
            let (x, y) = (x + opts.margin / 2, y + opts.margin / 2);
            occupancy.occupy(x, y, &mask);

            placements.push(Placement {
                x,
                y,
                mask,
                color: viridis(rng.gen_range(0.0f32..=1.0)),
            });
            last_weight = entry.weight;
        }

        placements
    }

    fn paint(&self, placements: &[Placement], width: u32, height: u32) -> RgbImage {
        let mut canvas = RgbImage::from_pixel(width, height, self.options.background);

        for placement in placements {
            for (mx, my, coverage) in placement.mask.enumerate_pixels() {
                let (cx, cy) = (placement.x + mx, placement.y + my);
                if coverage.0[0] == 0 || cx >= width || cy >= height {
                    continue;
                }
                let base = *canvas.get_pixel(cx, cy);
                canvas.put_pixel(cx, cy, blend(base, placement.color, coverage.0[0]));
            }
        }

        canvas
    }
}

impl CloudRenderer for BitmapCloudRenderer {
    fn render(
        &self,
        text: &str,
        stop_words: &StopWords,
        width: u32,
        height: u32,
    ) -> Result<Vec<u8>, RenderError> {
        let words = top_words(count_words(text, stop_words), self.options.max_words);
        if words.is_empty() {
            return Err(RenderError::NoWords);
        }

        let mut rng = StdRng::seed_from_u64(self.seed_for(text));
        let placements = self.layout(&words, width, height, &mut rng);
        debug!(
            words = words.len(),
            placed = placements.len(),
            width,
            height,
            "Word cloud laid out"
        );

        let canvas = self.paint(&placements, width, height);
        let mut png = Cursor::new(Vec::new());
        DynamicImage::ImageRgb8(canvas).write_to(&mut png, ImageFormat::Png)?;
        Ok(png.into_inner())
    }
}
