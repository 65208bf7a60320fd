//! Drives a [`Starfield`] on a [`FrameHost`]: drains the pending frame slot,
//! injects scripted resizes, and paces frames to a target rate.
//!
//! The star speed is per frame callback, so pacing changes wall-clock speed
//! but never the simulated trajectory.

use std::time::{Duration, Instant};

use starfield_config::{Config, ResizeStep};
use starfield_raster::PixelBuffer;
use starfield_sim::{StartOutcome, Starfield, Viewport};
use tracing::{debug, info, warn};

use crate::frame_host::FrameHost;

/// Sleeps between frames to approximate a display refresh rate.
#[derive(Debug)]
pub struct FramePacer {
    frame_duration: Option<Duration>,
    next_deadline: Instant,
}

impl FramePacer {
    /// `target_fps == 0` disables pacing.
    pub fn new(target_fps: u32) -> Self {
        Self {
            frame_duration: (target_fps > 0)
                .then(|| Duration::from_nanos(1_000_000_000 / u64::from(target_fps))),
            next_deadline: Instant::now(),
        }
    }

    pub fn frame_duration(&self) -> Option<Duration> {
        self.frame_duration
    }

    /// Block until the next frame is due.
    pub fn wait(&mut self) {
        let Some(frame_duration) = self.frame_duration else {
            return;
        };

        let now = Instant::now();
        if self.next_deadline > now {
            std::thread::sleep(self.next_deadline - now);
            self.next_deadline += frame_duration;
        } else {
            // Fell behind; resynchronize instead of bursting to catch up.
            self.next_deadline = now + frame_duration;
        }
    }
}

/// Summary of one run.
#[derive(Debug)]
pub struct RunReport {
    pub outcome: StartOutcome,
    /// Frames drawn, including the one drawn on start.
    pub frames_rendered: u64,
    pub stars_drawn: u64,
    pub stars_respawned: u64,
    pub resizes_delivered: u32,
    /// Final surface contents, when the starfield ran.
    pub last_frame: Option<PixelBuffer>,
}

/// Owns the simulator for the duration of a run.
pub struct FrameLoop {
    starfield: Starfield<FrameHost>,
    frames: u64,
    resize: Option<ResizeStep>,
    pacer: FramePacer,
}

impl FrameLoop {
    pub fn new(host: FrameHost, seed: Option<u64>, frames: u64) -> Self {
        let starfield = match seed {
            Some(seed) => Starfield::with_seed(host, seed),
            None => Starfield::new(host),
        };
        Self {
            starfield,
            frames,
            resize: None,
            pacer: FramePacer::new(0),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(FrameHost::from_config(config), config.run.seed, config.run.frames)
            .with_resize(config.run.resize)
            .with_target_fps(config.run.target_fps)
    }

    pub fn with_resize(mut self, resize: Option<ResizeStep>) -> Self {
        self.resize = resize;
        self
    }

    pub fn with_target_fps(mut self, target_fps: u32) -> Self {
        self.pacer = FramePacer::new(target_fps);
        self
    }

    /// Start the starfield, deliver up to `frames` frame callbacks, then tear
    /// down.
    pub fn run(mut self) -> RunReport {
        let outcome = self.starfield.start();
        let mut report = RunReport {
            outcome,
            frames_rendered: 0,
            stars_drawn: 0,
            stars_respawned: 0,
            resizes_delivered: 0,
            last_frame: None,
        };

        if let StartOutcome::NotStarted { reason } = outcome {
            info!(?reason, "Starfield not started, nothing to render");
            return report;
        }

        if let Some(stats) = self.starfield.first_frame_stats() {
            report.stars_drawn += stats.drawn as u64;
            report.stars_respawned += stats.respawned as u64;
        }

        for frame in 1..=self.frames {
            if let Some(step) = self.resize.filter(|s| s.at_frame == frame)
                && let Some(viewport) = self
                    .starfield
                    .host_mut()
                    .set_viewport(Viewport::new(step.width, step.height))
            {
                self.starfield.on_resize(viewport);
                report.resizes_delivered += 1;
            }

            self.pacer.wait();

            let Some(handle) = self.starfield.host_mut().take_pending_frame() else {
                warn!(frame, "No frame pending, stopping early");
                break;
            };
            if let Some(stats) = self.starfield.on_frame(handle) {
                report.stars_drawn += stats.drawn as u64;
                report.stars_respawned += stats.respawned as u64;
            }
        }

        report.frames_rendered = self.starfield.frames_rendered();
        report.last_frame = self.starfield.surface().cloned();
        self.starfield.teardown();

        debug!(
            frames = report.frames_rendered,
            drawn = report.stars_drawn,
            respawned = report.stars_respawned,
            "Run finished"
        );
        report
    }
}
