use thiserror::Error;

pub type FontResult<T> = Result<T, FontError>;

/// Failures while loading a font or rasterizing a label.
/// These are always recovered by the renderer: the icon is written without text.
#[derive(Error, Debug)]
pub enum FontError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid font data: {0}")]
    InvalidFont(#[from] ab_glyph::InvalidFont),
    #[error("Built-in font has no glyph for {0:?}")]
    UnsupportedGlyph(char),
    #[error("Label text is empty")]
    EmptyText,
    #[error("Invalid font size: {0}px")]
    InvalidSize(u32),
}
