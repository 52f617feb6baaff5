use crate::bitmap_font;
use crate::config::IconConfig;
use crate::error::{FontError, FontResult};
use ab_glyph::{FontVec, PxScale};
use image::{GrayImage, Luma};
use imageproc::drawing::{draw_text_mut, text_size};
use std::path::Path;

/// Font used to draw the icon label
pub enum LabelFont {
    /// TrueType/OpenType font loaded from disk
    Outline(FontVec),
    /// Built-in 5x8 bitmap typeface, always available
    Builtin,
}

/// Tight bounding box of the inked pixels in a coverage mask
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InkBounds {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl LabelFont {
    /// Load a font file from disk
    pub fn load(path: &Path) -> FontResult<Self> {
        let data = std::fs::read(path)?;
        let font = FontVec::try_from_vec(data)?;
        Ok(LabelFont::Outline(font))
    }

    pub fn builtin() -> Self {
        LabelFont::Builtin
    }

    pub fn name(&self) -> &'static str {
        match self {
            LabelFont::Outline(_) => "outline",
            LabelFont::Builtin => "builtin",
        }
    }

    /// Render `text` at `px` pixels into a coverage mask (0 = empty, 255 = full ink).
    /// The mask is padded; use [`ink_bounds`] to find where the text actually landed.
    pub fn rasterize(&self, text: &str, px: u32) -> FontResult<GrayImage> {
        if text.is_empty() {
            return Err(FontError::EmptyText);
        }
        if px == 0 {
            return Err(FontError::InvalidSize(px));
        }

        match self {
            LabelFont::Outline(font) => {
                let scale = PxScale::from(px as f32);
                let (text_width, text_height) = text_size(scale, font, text);

                // Glyph outlines may overhang the layout box
                let pad = px / 2 + 1;
                let mut mask = GrayImage::new(text_width + 2 * pad, text_height + 2 * pad);
                draw_text_mut(&mut mask, Luma([255u8]), pad as i32, pad as i32, scale, font, text);
                Ok(mask)
            }
            LabelFont::Builtin => bitmap_font::rasterize(text, px),
        }
    }
}

/// Pick the label font for `config`: the preferred font file if it loads,
/// otherwise the built-in typeface.
pub fn resolve_font(config: &IconConfig) -> LabelFont {
    match LabelFont::load(&config.preferred_font) {
        Ok(font) => {
            log::debug!("Loaded font {}", config.preferred_font.display());
            font
        }
        Err(e) => {
            log::debug!(
                "Font {} unavailable ({}), using built-in font",
                config.preferred_font.display(),
                e
            );
            LabelFont::builtin()
        }
    }
}

/// Bounding box of all non-zero coverage, or None if nothing was inked
pub fn ink_bounds(mask: &GrayImage) -> Option<InkBounds> {
    let mut bounds: Option<(u32, u32, u32, u32)> = None;

    for (x, y, pixel) in mask.enumerate_pixels() {
        if pixel[0] == 0 {
            continue;
        }
        bounds = Some(match bounds {
            Some((min_x, min_y, max_x, max_y)) => {
                (min_x.min(x), min_y.min(y), max_x.max(x), max_y.max(y))
            }
            None => (x, y, x, y),
        });
    }

    bounds.map(|(min_x, min_y, max_x, max_y)| InkBounds {
        x: min_x,
        y: min_y,
        width: max_x - min_x + 1,
        height: max_y - min_y + 1,
    })
}
