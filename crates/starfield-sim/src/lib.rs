//! Receding 3D starfield: a fixed pool of stars that drift toward the viewer,
//! projected onto a 2D surface and recycled once they pass the viewer plane.
//!
//! The simulator never fails outward. When the host cannot provide a surface
//! or the user prefers reduced motion it declines to start and reports why
//! through [`StartOutcome`].

pub mod host;
pub mod simulator;
pub mod star;

#[cfg(test)]
mod testing;

pub use host::{DrawSurface, FrameHandle, Host, ResizeSubscription, Rgba, Viewport};
pub use simulator::{NotStartedReason, StartOutcome, Starfield};
pub use star::{
    APPROACH_SPEED, DESKTOP_STAR_COUNT, FOCAL_LENGTH, FrameStats, MAX_STAR_RADIUS,
    MOBILE_BREAKPOINT, MOBILE_STAR_COUNT, Projection, Star, StarPool, project,
    star_count_for_width,
};
