pub mod bitmap_font;
pub mod config;
pub mod error;
pub mod font;
pub mod generator;
pub mod render;

pub use config::{IconConfig, parse_hex_color};
pub use error::{FontError, FontResult};
pub use font::{InkBounds, LabelFont, ink_bounds, resolve_font};
pub use generator::{DEFAULT_OUT_DIR, IconGenerator};
pub use render::{
    BackgroundStep, BorderStep, LabelStep, RenderContext, RenderPipeline, RenderStep,
    border_width, render_icon,
};
