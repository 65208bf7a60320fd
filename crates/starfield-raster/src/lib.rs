//! Software rendering target for the starfield: an RGBA pixel buffer that
//! implements the simulator's drawing surface and exports PNG snapshots.

mod error;
mod pixel_buffer;
mod snapshot;

pub use error::RasterError;
pub use pixel_buffer::PixelBuffer;
