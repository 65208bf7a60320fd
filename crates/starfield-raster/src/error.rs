//! Raster error types.

/// Errors that can occur when exporting a pixel buffer.
#[derive(Debug, thiserror::Error)]
pub enum RasterError {
    /// The buffer has zero width or height.
    #[error("cannot encode an empty {width}x{height} buffer")]
    EmptyBuffer { width: u32, height: u32 },

    /// PNG encoding failed.
    #[error("failed to encode png: {0}")]
    Encode(#[from] png::EncodingError),

    /// Writing the output file failed.
    #[error("failed to write image: {0}")]
    Io(#[from] std::io::Error),
}
