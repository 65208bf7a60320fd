//! The starfield simulator: capability gating, frame callbacks, resize, and
//! teardown around a [`StarPool`].

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info, trace, warn};

use crate::host::{DrawSurface, FrameHandle, Host, ResizeSubscription, Viewport};
use crate::star::{FrameStats, StarPool};

/// Why the simulator declined to start.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotStartedReason {
    /// The host could not provide a drawing surface.
    SurfaceUnavailable,
    /// The user prefers reduced motion.
    ReducedMotion,
}

/// Result of [`Starfield::start`]. Never surfaced to the embedder as an error;
/// a starfield that does not start simply leaves the backdrop untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartOutcome {
    Started { star_count: usize },
    NotStarted { reason: NotStartedReason },
}

impl StartOutcome {
    pub fn is_started(&self) -> bool {
        matches!(self, Self::Started { .. })
    }
}

/// State that only exists between a successful start and teardown.
struct Running<S> {
    surface: S,
    pool: StarPool,
    pending_frame: Option<FrameHandle>,
    resize_subscription: ResizeSubscription,
    frames_rendered: u64,
    first_frame_stats: FrameStats,
}

/// A receding starfield bound to one host.
///
/// Lifecycle: [`start`](Self::start) once mounted, feed
/// [`on_frame`](Self::on_frame) and [`on_resize`](Self::on_resize) from the
/// host, and [`teardown`](Self::teardown) on unmount. Dropping the simulator
/// tears it down.
pub struct Starfield<H: Host> {
    host: H,
    rng: ChaCha8Rng,
    running: Option<Running<H::Surface>>,
}

impl<H: Host> Starfield<H> {
    /// Create a simulator with a randomly seeded generator.
    pub fn new(host: H) -> Self {
        Self::with_seed(host, rand::random())
    }

    /// Create a simulator whose star placement is deterministic for `seed`.
    pub fn with_seed(host: H, seed: u64) -> Self {
        Self {
            host,
            rng: ChaCha8Rng::seed_from_u64(seed),
            running: None,
        }
    }

    /// Acquire the surface, build the pool, draw the first frame, and begin
    /// listening for frames and resizes.
    pub fn start(&mut self) -> StartOutcome {
        if let Some(running) = &self.running {
            return StartOutcome::Started {
                star_count: running.pool.len(),
            };
        }

        let Some(mut surface) = self.host.acquire_surface() else {
            warn!("Drawing surface unavailable, leaving static background");
            return StartOutcome::NotStarted {
                reason: NotStartedReason::SurfaceUnavailable,
            };
        };

        if self.host.prefers_reduced_motion() {
            info!("Reduced motion preferred, skipping starfield animation");
            return StartOutcome::NotStarted {
                reason: NotStartedReason::ReducedMotion,
            };
        }

        let viewport = self.host.viewport();
        surface.resize_buffer(viewport.width, viewport.height);
        let mut pool = StarPool::new(viewport, &mut self.rng);

        let stats = pool.step(&mut self.rng, &mut surface);
        let pending_frame = Some(self.host.request_frame());
        let resize_subscription = self.host.subscribe_resize();

        let star_count = pool.len();
        info!(
            width = viewport.width,
            height = viewport.height,
            star_count,
            drawn = stats.drawn,
            "Starfield started"
        );

        self.running = Some(Running {
            surface,
            pool,
            pending_frame,
            resize_subscription,
            frames_rendered: 1,
            first_frame_stats: stats,
        });

        StartOutcome::Started { star_count }
    }

    /// Render the frame identified by `handle` and request the next one.
    ///
    /// Returns `None` without drawing if the simulator is not running or
    /// `handle` is not the pending frame.
    pub fn on_frame(&mut self, handle: FrameHandle) -> Option<FrameStats> {
        let running = self.running.as_mut()?;
        if running.pending_frame != Some(handle) {
            debug!(?handle, "Ignoring stale frame callback");
            return None;
        }

        running.pending_frame = None;
        let stats = running.pool.step(&mut self.rng, &mut running.surface);
        running.frames_rendered += 1;
        running.pending_frame = Some(self.host.request_frame());

        trace!(
            frame = running.frames_rendered,
            drawn = stats.drawn,
            respawned = stats.respawned,
            "Starfield frame"
        );
        Some(stats)
    }

    /// Reinitialize the pool and surface buffer for a new viewport size.
    /// No-op unless running.
    pub fn on_resize(&mut self, viewport: Viewport) {
        let Some(running) = self.running.as_mut() else {
            return;
        };

        running
            .surface
            .resize_buffer(viewport.width, viewport.height);
        running.pool = StarPool::new(viewport, &mut self.rng);

        debug!(
            width = viewport.width,
            height = viewport.height,
            star_count = running.pool.len(),
            "Starfield reset after resize"
        );
    }

    /// Cancel the pending frame, stop listening for resizes, and release the
    /// surface. Safe to call repeatedly or without a successful start.
    pub fn teardown(&mut self) {
        let Some(running) = self.running.take() else {
            return;
        };

        if let Some(handle) = running.pending_frame {
            self.host.cancel_frame(handle);
        }
        self.host.unsubscribe_resize(running.resize_subscription);

        debug!(
            frames = running.frames_rendered,
            "Starfield torn down"
        );
    }

    pub fn is_running(&self) -> bool {
        self.running.is_some()
    }

    /// The star pool, while running.
    pub fn pool(&self) -> Option<&StarPool> {
        self.running.as_ref().map(|r| &r.pool)
    }

    /// Mutable access to the star pool, while running.
    pub fn pool_mut(&mut self) -> Option<&mut StarPool> {
        self.running.as_mut().map(|r| &mut r.pool)
    }

    /// The drawing surface, while running.
    pub fn surface(&self) -> Option<&H::Surface> {
        self.running.as_ref().map(|r| &r.surface)
    }

    /// The frame that will be honored by the next [`on_frame`](Self::on_frame).
    pub fn pending_frame(&self) -> Option<FrameHandle> {
        self.running.as_ref().and_then(|r| r.pending_frame)
    }

    /// Frames drawn since the last successful start, including the first.
    pub fn frames_rendered(&self) -> u64 {
        self.running.as_ref().map_or(0, |r| r.frames_rendered)
    }

    /// Stats of the frame drawn synchronously by [`start`](Self::start).
    pub fn first_frame_stats(&self) -> Option<FrameStats> {
        self.running.as_ref().map(|r| r.first_frame_stats)
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }
}

impl<H: Host> Drop for Starfield<H> {
    fn drop(&mut self) {
        self.teardown();
    }
}
