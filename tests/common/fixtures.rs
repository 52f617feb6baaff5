use goldicons::{IconConfig, IconGenerator};
use image::{Rgba, RgbaImage};
use std::path::{Path, PathBuf};

/// Font path that never exists, forcing the built-in typeface
pub const MISSING_FONT: &str = "/nonexistent/fonts/preferred.ttf";

/// Default design with the preferred font replaced by a missing path,
/// so results do not depend on fonts installed on the test machine.
pub fn builtin_font_config() -> IconConfig {
    IconConfig::default().with_preferred_font(MISSING_FONT)
}

/// Runs the generator into `<dir>/icons` and returns the written paths
pub fn generate_into(dir: &Path, config: IconConfig) -> Vec<PathBuf> {
    IconGenerator::new(dir.join("icons"), config)
        .generate_all()
        .expect("Icon generation failed")
}

pub fn load_rgba(path: &Path) -> RgbaImage {
    image::open(path)
        .expect("Failed to open generated icon")
        .to_rgba8()
}

/// Pixels that are neither background nor border
pub fn foreign_pixels(img: &RgbaImage, config: &IconConfig) -> usize {
    img.pixels()
        .filter(|p| **p != config.background && **p != config.border)
        .count()
}

pub const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);
