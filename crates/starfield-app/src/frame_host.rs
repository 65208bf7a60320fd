//! Headless [`Host`] that hands out a [`PixelBuffer`] and keeps frame requests
//! in a single pending slot for the frame loop to drain.

use starfield_config::Config;
use starfield_raster::PixelBuffer;
use starfield_sim::{FrameHandle, Host, ResizeSubscription, Viewport};
use tracing::debug;

/// Software host backed by configuration.
#[derive(Debug)]
pub struct FrameHost {
    viewport: Viewport,
    reduced_motion: bool,
    surface_available: bool,
    pending: Option<FrameHandle>,
    resize_listener: Option<ResizeSubscription>,
    next_id: u64,
}

impl FrameHost {
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            reduced_motion: false,
            surface_available: true,
            pending: None,
            resize_listener: None,
            next_id: 0,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self {
            reduced_motion: config.motion.reduced_motion,
            surface_available: config.motion.surface_available,
            ..Self::new(Viewport::new(
                config.viewport.width,
                config.viewport.height,
            ))
        }
    }

    pub fn with_reduced_motion(mut self, reduced_motion: bool) -> Self {
        self.reduced_motion = reduced_motion;
        self
    }

    pub fn with_surface_available(mut self, available: bool) -> Self {
        self.surface_available = available;
        self
    }

    /// Remove and return the pending frame, if any.
    pub fn take_pending_frame(&mut self) -> Option<FrameHandle> {
        self.pending.take()
    }

    pub fn has_pending_frame(&self) -> bool {
        self.pending.is_some()
    }

    pub fn has_resize_listener(&self) -> bool {
        self.resize_listener.is_some()
    }

    /// Change the viewport. Returns the new size when a resize listener should
    /// be notified.
    pub fn set_viewport(&mut self, viewport: Viewport) -> Option<Viewport> {
        self.viewport = viewport;
        self.resize_listener.map(|_| viewport)
    }

    fn next_id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }
}

impl Host for FrameHost {
    type Surface = PixelBuffer;

    fn acquire_surface(&mut self) -> Option<PixelBuffer> {
        self.surface_available
            .then(|| PixelBuffer::new(self.viewport.width, self.viewport.height))
    }

    fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn prefers_reduced_motion(&self) -> bool {
        self.reduced_motion
    }

    fn request_frame(&mut self) -> FrameHandle {
        let handle = FrameHandle(self.next_id());
        if let Some(previous) = self.pending.replace(handle) {
            debug!(?previous, "Replacing unserviced frame request");
        }
        handle
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        if self.pending == Some(handle) {
            self.pending = None;
        }
    }

    fn subscribe_resize(&mut self) -> ResizeSubscription {
        let subscription = ResizeSubscription(self.next_id());
        self.resize_listener = Some(subscription);
        subscription
    }

    fn unsubscribe_resize(&mut self, subscription: ResizeSubscription) {
        if self.resize_listener == Some(subscription) {
            self.resize_listener = None;
        }
    }
}
