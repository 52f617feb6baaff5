use anyhow::Result;
use image::Rgba;
use std::path::PathBuf;

/// Gold
pub const BACKGROUND_HEX: &str = "#FFD700";
/// Dark goldenrod
pub const BORDER_HEX: &str = "#B8860B";
pub const TEXT_HEX: &str = "#FFFFFF";

pub const ICON_SIZES: [u32; 3] = [16, 48, 128];
pub const LABEL: &str = "Au";
pub const TEXT_THRESHOLD: u32 = 48;
pub const FONT_SCALE: f32 = 0.5;

#[cfg(target_os = "macos")]
pub const PREFERRED_FONT: &str = "/System/Library/Fonts/Arial.ttf";
#[cfg(target_os = "windows")]
pub const PREFERRED_FONT: &str = "C:\\Windows\\Fonts\\arial.ttf";
#[cfg(not(any(target_os = "macos", target_os = "windows")))]
pub const PREFERRED_FONT: &str = "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf";

/// The icon design. `Default` is the only design the binary ever uses;
/// other values exist so tests can swap the font path or label.
#[derive(Debug, Clone)]
pub struct IconConfig {
    pub sizes: Vec<u32>,
    pub background: Rgba<u8>,
    pub border: Rgba<u8>,
    pub text_color: Rgba<u8>,
    pub label: String,

    /// Text is drawn when `size >= text_threshold`
    pub text_threshold: u32,

    /// Font pixel size as a fraction of the icon size
    pub font_scale: f32,

    pub preferred_font: PathBuf,
}

impl IconConfig {
    pub fn with_sizes(mut self, sizes: Vec<u32>) -> Self {
        self.sizes = sizes;
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn with_preferred_font(mut self, path: impl Into<PathBuf>) -> Self {
        self.preferred_font = path.into();
        self
    }

    /// Whether a canvas of this size is large enough for the label
    pub fn wants_text(&self, size: u32) -> bool {
        size >= self.text_threshold
    }

    /// Font pixel size for an icon of the given size
    pub fn font_px(&self, size: u32) -> u32 {
        (size as f32 * self.font_scale) as u32
    }
}

impl Default for IconConfig {
    fn default() -> Self {
        Self {
            sizes: ICON_SIZES.to_vec(),
            background: hex_const(BACKGROUND_HEX),
            border: hex_const(BORDER_HEX),
            text_color: hex_const(TEXT_HEX),
            label: LABEL.to_string(),
            text_threshold: TEXT_THRESHOLD,
            font_scale: FONT_SCALE,
            preferred_font: PathBuf::from(PREFERRED_FONT),
        }
    }
}

/// Parse `#RRGGBB` or `#RRGGBBAA` into an RGBA pixel
pub fn parse_hex_color(hex: &str) -> Result<Rgba<u8>> {
    let digits = hex
        .strip_prefix('#')
        .ok_or_else(|| anyhow::anyhow!("Color must start with '#': {}", hex))?;

    if !digits.is_ascii() || (digits.len() != 6 && digits.len() != 8) {
        anyhow::bail!("Color must be #RRGGBB or #RRGGBBAA: {}", hex);
    }

    let mut channels = [255u8; 4];
    for (i, channel) in channels.iter_mut().enumerate().take(digits.len() / 2) {
        *channel = u8::from_str_radix(&digits[i * 2..i * 2 + 2], 16)
            .map_err(|e| anyhow::anyhow!("Invalid color {}: {}", hex, e))?;
    }

    Ok(Rgba(channels))
}

// Only called on the constants above
fn hex_const(hex: &str) -> Rgba<u8> {
    parse_hex_color(hex).unwrap_or(Rgba([0, 0, 0, 255]))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_design_colors() {
        assert_eq!(parse_hex_color(BACKGROUND_HEX).unwrap(), Rgba([255, 215, 0, 255]));
        assert_eq!(parse_hex_color(BORDER_HEX).unwrap(), Rgba([184, 134, 11, 255]));
        assert_eq!(parse_hex_color("#ffffff80").unwrap(), Rgba([255, 255, 255, 128]));
    }

    #[test]
    fn rejects_malformed_colors() {
        assert!(parse_hex_color("FFD700").is_err());
        assert!(parse_hex_color("#FFD7").is_err());
        assert!(parse_hex_color("#GGD700").is_err());
        assert!(parse_hex_color("#FFD7é0").is_err());
    }

    #[test]
    fn default_design() {
        let config = IconConfig::default();
        assert_eq!(config.sizes, vec![16, 48, 128]);
        assert_eq!(config.label, "Au");
        assert!(!config.wants_text(16));
        assert!(config.wants_text(48));
        assert!(config.wants_text(128));
        assert_eq!(config.font_px(48), 24);
        assert_eq!(config.font_px(128), 64);
    }
}
