//! Particle pool for the receding starfield: placement, per-frame approach,
//! in-place respawn, and perspective projection onto the viewport.

use glam::Vec3;
use rand::Rng;

use crate::host::{DrawSurface, Rgba, Viewport};

/// Viewports narrower than this get the reduced star count.
pub const MOBILE_BREAKPOINT: u32 = 768;

/// Star count below [`MOBILE_BREAKPOINT`].
pub const MOBILE_STAR_COUNT: usize = 100;

/// Star count at or above [`MOBILE_BREAKPOINT`].
pub const DESKTOP_STAR_COUNT: usize = 200;

/// Depth units each star moves toward the viewer per frame callback.
/// Not scaled by elapsed time.
pub const APPROACH_SPEED: f32 = 2.0;

/// Numerator of the perspective scale `k = FOCAL_LENGTH / z`.
pub const FOCAL_LENGTH: f32 = 128.0;

/// Radius of a star at the viewer plane.
pub const MAX_STAR_RADIUS: f32 = 2.0;

/// Number of stars for a viewport of the given width.
pub fn star_count_for_width(width: u32) -> usize {
    if width < MOBILE_BREAKPOINT {
        MOBILE_STAR_COUNT
    } else {
        DESKTOP_STAR_COUNT
    }
}

/// One star in the simulated field.
///
/// `x`/`y` live on a plane centered on the viewport origin; `z` is the depth
/// from the viewer and stays in `(0, width]` while the star is live.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Star {
    pub position: Vec3,
}

impl Star {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self {
            position: Vec3::new(x, y, z),
        }
    }
}

/// Screen-space result of projecting a star.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    /// Screen x in pixels.
    pub x: f32,
    /// Screen y in pixels.
    pub y: f32,
    /// Circle radius in pixels, `0` at the far plane up to `2` at the viewer.
    pub radius: f32,
    /// Draw opacity in `[0, 1]`, larger for closer stars.
    pub opacity: f32,
}

/// Project `star` onto `viewport`.
///
/// Returns `None` when the projected point falls outside `[0, W] x [0, H]`.
/// The star must have a positive depth.
pub fn project(star: &Star, viewport: Viewport) -> Option<Projection> {
    let w = viewport.width_f32();
    let h = viewport.height_f32();
    let p = star.position;

    let k = FOCAL_LENGTH / p.z;
    let px = p.x * k + w / 2.0;
    let py = p.y * k + h / 2.0;

    if !(0.0..=w).contains(&px) || !(0.0..=h).contains(&py) {
        return None;
    }

    let nearness = 1.0 - p.z / w;
    Some(Projection {
        x: px,
        y: py,
        radius: nearness * MAX_STAR_RADIUS,
        opacity: nearness,
    })
}

/// Counters for a single rendered frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    /// Stars that landed inside the viewport and were drawn.
    pub drawn: usize,
    /// Stars that crossed the viewer plane and were respawned.
    pub respawned: usize,
}

/// Fixed-size, index-stable pool of stars sized for one viewport.
#[derive(Debug, Clone)]
pub struct StarPool {
    stars: Vec<Star>,
    viewport: Viewport,
}

impl StarPool {
    /// Allocate a fresh pool for `viewport` with randomized positions.
    pub fn new<R: Rng + ?Sized>(viewport: Viewport, rng: &mut R) -> Self {
        let count = star_count_for_width(viewport.width);
        let w = viewport.width_f32();
        let h = viewport.height_f32();

        let stars = (0..count)
            .map(|_| {
                let (x, y) = random_plane_position(rng, w, h);
                // Uniform over (0, w] so depth is positive from the start.
                let z = (1.0 - rng.random::<f32>()) * w;
                Star::new(x, y, z)
            })
            .collect();

        Self { stars, viewport }
    }

    /// Build a pool from explicit stars.
    pub fn from_stars(viewport: Viewport, stars: Vec<Star>) -> Self {
        Self { stars, viewport }
    }

    pub fn stars(&self) -> &[Star] {
        &self.stars
    }

    pub fn stars_mut(&mut self) -> &mut [Star] {
        &mut self.stars
    }

    pub fn len(&self) -> usize {
        self.stars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stars.is_empty()
    }

    /// Viewport the pool was last initialized for.
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Advance every star one frame and draw the result onto `surface`.
    ///
    /// Clears to black, then for each star in slot order: approach, respawn if
    /// it crossed the viewer plane, project, and draw if on screen. Global
    /// alpha is back at `1.0` after every star.
    pub fn step<R, S>(&mut self, rng: &mut R, surface: &mut S) -> FrameStats
    where
        R: Rng + ?Sized,
        S: DrawSurface + ?Sized,
    {
        let viewport = self.viewport;
        let w = viewport.width_f32();
        let h = viewport.height_f32();
        let mut stats = FrameStats::default();

        surface.fill_background(Rgba::BLACK);
        surface.set_fill_color(Rgba::WHITE);

        for star in &mut self.stars {
            star.position.z -= APPROACH_SPEED;

            if star.position.z <= 0.0 {
                let (x, y) = random_plane_position(rng, w, h);
                star.position = Vec3::new(x, y, w);
                stats.respawned += 1;
            }

            if let Some(proj) = project(star, viewport) {
                surface.set_global_alpha(proj.opacity);
                surface.fill_circle(proj.x, proj.y, proj.radius);
                surface.set_global_alpha(1.0);
                stats.drawn += 1;
            }
        }

        stats
    }
}

fn random_plane_position<R: Rng + ?Sized>(rng: &mut R, w: f32, h: f32) -> (f32, f32) {
    let x = (rng.random::<f32>() - 0.5) * w;
    let y = (rng.random::<f32>() - 0.5) * h;
    (x, y)
}
