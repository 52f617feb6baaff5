use crate::config::IconConfig;
use crate::font::{ink_bounds, resolve_font};
use anyhow::Result;
use image::{GrayImage, Pixel, RgbaImage};
use imageproc::drawing::draw_hollow_rect_mut;
use imageproc::rect::Rect;
use std::path::PathBuf;
use std::sync::Arc;

/// Debug configuration for pipeline execution
#[derive(Clone, Debug)]
pub struct DebugConfig {
    /// Root directory for intermediate canvases
    pub output_dir: PathBuf,
}

/// Context available to all render steps
#[derive(Clone)]
pub struct RenderContext {
    pub size: u32,
    pub config: IconConfig,
    pub debug: Option<DebugConfig>,
}

/// One drawing stage applied to the icon canvas
pub trait RenderStep: Send + Sync {
    fn apply(&self, canvas: &mut RgbaImage, context: &RenderContext) -> Result<()>;

    /// Human-readable name for this step (used in logs and debug directories)
    fn name(&self) -> &str;
}

/// Border stroke width for an icon of the given size
pub fn border_width(size: u32) -> u32 {
    (size / 16).max(1)
}

/// Fill the whole canvas with the background color
pub struct BackgroundStep;

impl RenderStep for BackgroundStep {
    fn apply(&self, canvas: &mut RgbaImage, context: &RenderContext) -> Result<()> {
        for pixel in canvas.pixels_mut() {
            *pixel = context.config.background;
        }
        Ok(())
    }

    fn name(&self) -> &str {
        "Background"
    }
}

/// Rectangle outline along the canvas edge, growing inward
pub struct BorderStep;

impl RenderStep for BorderStep {
    fn apply(&self, canvas: &mut RgbaImage, context: &RenderContext) -> Result<()> {
        let size = context.size;
        let width = border_width(size);

        for inset in 0..width {
            let side = size.saturating_sub(2 * inset);
            if side == 0 {
                break;
            }
            let rect = Rect::at(inset as i32, inset as i32).of_size(side, side);
            draw_hollow_rect_mut(canvas, rect, context.config.border);
        }
        Ok(())
    }

    fn name(&self) -> &str {
        "Border"
    }
}

/// Centered label text. Font and drawing failures are logged and swallowed
/// so the icon is still produced without text.
pub struct LabelStep;

impl LabelStep {
    fn draw(&self, canvas: &mut RgbaImage, context: &RenderContext) -> Result<()> {
        let config = &context.config;
        let font = resolve_font(config);
        let mask = font.rasterize(&config.label, config.font_px(context.size))?;

        let Some(ink) = ink_bounds(&mask) else {
            log::debug!("Label {:?} has no ink, nothing to draw", config.label);
            return Ok(());
        };

        let origin_x = (context.size as i64 - ink.width as i64) / 2 - ink.x as i64;
        let origin_y = (context.size as i64 - ink.height as i64) / 2 - ink.y as i64;
        composite(canvas, &mask, origin_x, origin_y, config.text_color);

        log::debug!(
            "Drew {:?} with {} font at ({}, {})",
            config.label,
            font.name(),
            origin_x + ink.x as i64,
            origin_y + ink.y as i64
        );
        Ok(())
    }
}

impl RenderStep for LabelStep {
    fn apply(&self, canvas: &mut RgbaImage, context: &RenderContext) -> Result<()> {
        if !context.config.wants_text(context.size) {
            return Ok(());
        }
        if let Err(e) = self.draw(canvas, context) {
            log::warn!("Text drawing failed: {}", e);
        }
        Ok(())
    }

    fn name(&self) -> &str {
        "Label"
    }
}

/// Blend `color` onto the canvas using the mask as coverage; pixels falling
/// outside the canvas are clipped.
fn composite(canvas: &mut RgbaImage, mask: &GrayImage, origin_x: i64, origin_y: i64, color: image::Rgba<u8>) {
    for (mx, my, coverage) in mask.enumerate_pixels() {
        if coverage[0] == 0 {
            continue;
        }
        let x = origin_x + mx as i64;
        let y = origin_y + my as i64;
        if x < 0 || y < 0 || x >= canvas.width() as i64 || y >= canvas.height() as i64 {
            continue;
        }

        let alpha = (color[3] as u16 * coverage[0] as u16 / 255) as u8;
        let mut paint = color;
        paint[3] = alpha;
        canvas.get_pixel_mut(x as u32, y as u32).blend(&paint);
    }
}

/// Composable render pipeline
pub struct RenderPipeline {
    steps: Vec<Arc<dyn RenderStep>>,
    config: IconConfig,
    debug: Option<DebugConfig>,
}

impl RenderPipeline {
    /// Create a pipeline with no steps
    pub fn new(config: IconConfig) -> Self {
        Self {
            steps: Vec::new(),
            config,
            debug: None,
        }
    }

    /// Background, border, label
    pub fn standard(config: IconConfig) -> Self {
        Self::new(config)
            .add_step(Arc::new(BackgroundStep))
            .add_step(Arc::new(BorderStep))
            .add_step(Arc::new(LabelStep))
    }

    /// Enable debug mode with output directory.
    /// The directory must be empty or non-existent.
    pub fn with_debug(mut self, output_dir: PathBuf) -> Result<Self> {
        if output_dir.exists() {
            let entries = std::fs::read_dir(&output_dir)?;
            if entries.count() > 0 {
                return Err(anyhow::anyhow!(
                    "Debug directory is not empty: {}",
                    output_dir.display()
                ));
            }
        } else {
            std::fs::create_dir_all(&output_dir)?;
        }

        self.debug = Some(DebugConfig { output_dir });
        Ok(self)
    }

    /// Add a render step to the pipeline
    pub fn add_step(mut self, step: Arc<dyn RenderStep>) -> Self {
        self.steps.push(step);
        self
    }

    pub fn step_names(&self) -> Vec<&str> {
        self.steps.iter().map(|s| s.name()).collect()
    }

    /// Render one icon of `size` x `size` pixels
    pub fn run(&self, size: u32) -> Result<RgbaImage> {
        if size == 0 {
            anyhow::bail!("Icon size must be positive");
        }

        let context = RenderContext {
            size,
            config: self.config.clone(),
            debug: self.debug.clone(),
        };
        let mut canvas = RgbaImage::new(size, size);

        for (step_idx, step) in self.steps.iter().enumerate() {
            log::debug!("icon{}: running step {}", size, step.name());
            step.apply(&mut canvas, &context)?;
            save_debug_output(&canvas, &context, step_idx, step.name())?;
        }

        Ok(canvas)
    }
}

/// Save the canvas after a step if debug mode is enabled
fn save_debug_output(canvas: &RgbaImage, context: &RenderContext, step_idx: usize, step_name: &str) -> Result<()> {
    let Some(debug_config) = &context.debug else {
        return Ok(());
    };

    let step_dir_name = format!("{:02}_{}", step_idx + 1, step_name.to_lowercase().replace(' ', "_"));
    let step_dir = debug_config.output_dir.join(&step_dir_name);
    std::fs::create_dir_all(&step_dir)?;

    let filename = format!("icon{}.png", context.size);
    canvas
        .save(step_dir.join(&filename))
        .map_err(|e| anyhow::anyhow!("Failed to save debug image: {}", e))?;
    log::debug!("Debug: saved {}/{}", step_dir_name, filename);

    Ok(())
}

/// Render one icon with the standard pipeline
pub fn render_icon(size: u32, config: &IconConfig) -> Result<RgbaImage> {
    RenderPipeline::standard(config.clone()).run(size)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    fn builtin_config() -> IconConfig {
        IconConfig::default().with_preferred_font("/nonexistent/font.ttf")
    }

    #[test]
    fn border_width_scales_with_size() {
        assert_eq!(border_width(1), 1);
        assert_eq!(border_width(16), 1);
        assert_eq!(border_width(31), 1);
        assert_eq!(border_width(48), 3);
        assert_eq!(border_width(128), 8);
    }

    #[test]
    fn border_covers_stroke_and_not_interior() {
        let config = builtin_config();
        let canvas = render_icon(32, &config).unwrap();
        let width = border_width(32);

        for i in 0..32 {
            for d in 0..width {
                assert_eq!(*canvas.get_pixel(i, d), config.border);
                assert_eq!(*canvas.get_pixel(d, i), config.border);
                assert_eq!(*canvas.get_pixel(i, 31 - d), config.border);
                assert_eq!(*canvas.get_pixel(31 - d, i), config.border);
            }
        }
        assert_eq!(*canvas.get_pixel(width, width), config.background);
    }

    #[test]
    fn tiny_canvas_is_all_border() {
        let config = builtin_config();
        let canvas = render_icon(1, &config).unwrap();
        assert_eq!(*canvas.get_pixel(0, 0), config.border);
    }

    #[test]
    fn zero_size_is_rejected() {
        assert!(render_icon(0, &builtin_config()).is_err());
    }

    #[test]
    fn label_is_centered() {
        let config = builtin_config();
        let canvas = render_icon(48, &config).unwrap();

        let text: Vec<(u32, u32)> = canvas
            .enumerate_pixels()
            .filter(|(_, _, p)| **p == config.text_color)
            .map(|(x, y, _)| (x, y))
            .collect();
        assert!(!text.is_empty());

        let min_x = text.iter().map(|p| p.0).min().unwrap();
        let max_x = text.iter().map(|p| p.0).max().unwrap();
        let min_y = text.iter().map(|p| p.1).min().unwrap();
        let max_y = text.iter().map(|p| p.1).max().unwrap();
        let left = min_x;
        let right = 47 - max_x;
        let top = min_y;
        let bottom = 47 - max_y;
        assert!(left.abs_diff(right) <= 1);
        assert!(top.abs_diff(bottom) <= 1);
    }

    #[test]
    fn unsupported_label_leaves_border_only() {
        let config = builtin_config().with_label("金");
        let canvas = render_icon(48, &config).unwrap();
        assert!(canvas
            .pixels()
            .all(|p| *p == config.background || *p == config.border));
    }

    #[test]
    fn composite_clips_outside_canvas() {
        let mut canvas = RgbaImage::from_pixel(4, 4, Rgba([0, 0, 0, 255]));
        let mask = GrayImage::from_pixel(3, 3, image::Luma([255]));
        composite(&mut canvas, &mask, -2, 2, Rgba([255, 255, 255, 255]));

        assert_eq!(*canvas.get_pixel(0, 2), Rgba([255, 255, 255, 255]));
        assert_eq!(*canvas.get_pixel(0, 3), Rgba([255, 255, 255, 255]));
        assert_eq!(*canvas.get_pixel(1, 2), Rgba([0, 0, 0, 255]));
    }

    #[test]
    fn debug_mode_writes_every_step() {
        let dir = tempfile::TempDir::new().unwrap();
        let debug_dir = dir.path().join("debug");
        let pipeline = RenderPipeline::standard(builtin_config())
            .with_debug(debug_dir.clone())
            .unwrap();

        pipeline.run(48).unwrap();

        assert_eq!(pipeline.step_names(), vec!["Background", "Border", "Label"]);
        assert!(debug_dir.join("01_background/icon48.png").exists());
        assert!(debug_dir.join("02_border/icon48.png").exists());
        assert!(debug_dir.join("03_label/icon48.png").exists());
    }

    #[test]
    fn debug_dir_must_be_empty() {
        let dir = tempfile::TempDir::new().unwrap();
        std::fs::write(dir.path().join("stale.png"), b"x").unwrap();
        let result = RenderPipeline::standard(builtin_config()).with_debug(dir.path().to_path_buf());
        assert!(result.is_err());
    }
}
