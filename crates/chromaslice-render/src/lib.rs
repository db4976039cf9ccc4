//! ChromaSlice Render Library
//!
//! A CPU pixmap implementation of the core [`Surface`](chromaslice_core::Surface)
//! trait and PNG output for it.

mod encode;
mod pixmap;

pub use encode::{encode_png, write_png};
pub use pixmap::PixmapSurface;

use thiserror::Error;

/// Render errors.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Invalid surface size: {width}x{height}")]
    InvalidSize { width: u32, height: u32 },
    #[error("PNG encoding failed: {0}")]
    Encode(String),
    #[error("I/O error: {0}")]
    Io(String),
}

/// Result type for render operations.
pub type RenderResult<T> = Result<T, RenderError>;
