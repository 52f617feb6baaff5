use crate::config::IconConfig;
use crate::render::RenderPipeline;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Default output directory, relative to the working directory
pub const DEFAULT_OUT_DIR: &str = "icons";

/// Renders every configured size and writes `icon{size}.png` files
pub struct IconGenerator {
    out_dir: PathBuf,
    pipeline: RenderPipeline,
    sizes: Vec<u32>,
}

impl IconGenerator {
    pub fn new(out_dir: impl Into<PathBuf>, config: IconConfig) -> Self {
        let sizes = config.sizes.clone();
        Self {
            out_dir: out_dir.into(),
            pipeline: RenderPipeline::standard(config),
            sizes,
        }
    }

    /// Also dump each intermediate canvas into `debug_dir`
    pub fn with_debug(mut self, debug_dir: PathBuf) -> Result<Self> {
        self.pipeline = self.pipeline.with_debug(debug_dir)?;
        Ok(self)
    }

    pub fn out_dir(&self) -> &Path {
        &self.out_dir
    }

    pub fn icon_path(&self, size: u32) -> PathBuf {
        self.out_dir.join(format!("icon{}.png", size))
    }

    /// Render and save a single icon. The output directory must already exist.
    pub fn generate(&self, size: u32) -> Result<PathBuf> {
        let canvas = self.pipeline.run(size)?;
        let path = self.icon_path(size);
        canvas
            .save(&path)
            .with_context(|| format!("Failed to save {}", path.display()))?;

        log::info!("Generated {}", path.display());
        Ok(path)
    }

    /// Create the output directory and generate every size in order.
    /// Stops at the first failure.
    pub fn generate_all(&self) -> Result<Vec<PathBuf>> {
        if let Some(size) = self.sizes.iter().find(|s| **s == 0) {
            anyhow::bail!("Invalid icon size: {}", size);
        }

        std::fs::create_dir_all(&self.out_dir)
            .with_context(|| format!("Failed to create {}", self.out_dir.display()))?;

        self.sizes.iter().map(|size| self.generate(*size)).collect()
    }
}
