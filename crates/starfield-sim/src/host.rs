//! Seams between the simulator and whatever embeds it: a 2D drawing surface
//! and a host providing frame scheduling, viewport queries, and resize events.

/// An RGBA color with components in `[0.0, 1.0]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Rgba {
    /// Opaque black.
    pub const BLACK: Self = Self::new(0.0, 0.0, 0.0, 1.0);
    /// Opaque white.
    pub const WHITE: Self = Self::new(1.0, 1.0, 1.0, 1.0);
    /// Fully transparent black.
    pub const TRANSPARENT: Self = Self::new(0.0, 0.0, 0.0, 0.0);

    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }
}

/// Viewport size in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Width as `f32`, never less than 1.
    pub fn width_f32(&self) -> f32 {
        self.width.max(1) as f32
    }

    /// Height as `f32`, never less than 1.
    pub fn height_f32(&self) -> f32 {
        self.height.max(1) as f32
    }
}

/// A 2D pixel surface the starfield draws into.
///
/// Mirrors the handful of canvas primitives the renderer needs. Fill color and
/// global alpha are sticky state, as on an HTML canvas context.
pub trait DrawSurface {
    /// Reallocate the backing pixel buffer to `width x height`.
    fn resize_buffer(&mut self, width: u32, height: u32);

    /// Fill the whole surface with `color`, ignoring global alpha.
    fn fill_background(&mut self, color: Rgba);

    /// Set the color used by subsequent [`fill_circle`](Self::fill_circle) calls.
    fn set_fill_color(&mut self, color: Rgba);

    /// Set the opacity multiplier for subsequent draw calls.
    fn set_global_alpha(&mut self, alpha: f32);

    /// Fill a circle centered at `(x, y)`.
    fn fill_circle(&mut self, x: f32, y: f32, radius: f32);
}

/// Opaque token for a requested frame. Returned by [`Host::request_frame`] and
/// handed back to [`Starfield::on_frame`](crate::Starfield::on_frame) when the
/// frame fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameHandle(pub u64);

/// Opaque token for a resize listener registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ResizeSubscription(pub u64);

/// The environment a [`Starfield`](crate::Starfield) runs in.
///
/// The host owns the frame clock. It hands out a [`FrameHandle`] per request
/// and later calls back into the simulator with that handle; it delivers resize
/// notifications only while a [`ResizeSubscription`] is live.
pub trait Host {
    /// Surface type produced by [`acquire_surface`](Self::acquire_surface).
    type Surface: DrawSurface;

    /// Acquire the drawing surface, or `None` if drawing is unsupported.
    fn acquire_surface(&mut self) -> Option<Self::Surface>;

    /// Current viewport size.
    fn viewport(&self) -> Viewport;

    /// Whether the user asked the system to reduce non-essential motion.
    fn prefers_reduced_motion(&self) -> bool;

    /// Schedule one frame callback.
    fn request_frame(&mut self) -> FrameHandle;

    /// Cancel a previously requested frame. Unknown handles are ignored.
    fn cancel_frame(&mut self, handle: FrameHandle);

    /// Start delivering resize notifications.
    fn subscribe_resize(&mut self) -> ResizeSubscription;

    /// Stop delivering resize notifications for `subscription`.
    fn unsubscribe_resize(&mut self, subscription: ResizeSubscription);
}
