//! Test doubles for the surface and host seams.

use std::cell::{Ref, RefCell, RefMut};
use std::rc::Rc;

use crate::host::{DrawSurface, FrameHandle, Host, ResizeSubscription, Rgba, Viewport};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DrawCall {
    Resize(u32, u32),
    FillBackground(Rgba),
    FillColor(Rgba),
    GlobalAlpha(f32),
    FillCircle { x: f32, y: f32, radius: f32 },
}

/// Records every draw call in order.
#[derive(Debug, Clone)]
pub struct RecordingSurface {
    pub calls: Vec<DrawCall>,
    pub alpha: f32,
}

impl Default for RecordingSurface {
    fn default() -> Self {
        Self {
            calls: Vec::new(),
            alpha: 1.0,
        }
    }
}

impl DrawSurface for RecordingSurface {
    fn resize_buffer(&mut self, width: u32, height: u32) {
        self.calls.push(DrawCall::Resize(width, height));
    }

    fn fill_background(&mut self, color: Rgba) {
        self.calls.push(DrawCall::FillBackground(color));
    }

    fn set_fill_color(&mut self, color: Rgba) {
        self.calls.push(DrawCall::FillColor(color));
    }

    fn set_global_alpha(&mut self, alpha: f32) {
        self.alpha = alpha;
        self.calls.push(DrawCall::GlobalAlpha(alpha));
    }

    fn fill_circle(&mut self, x: f32, y: f32, radius: f32) {
        self.calls.push(DrawCall::FillCircle { x, y, radius });
    }
}

/// Scheduling calls made by the simulator against a [`ScriptedHost`].
///
/// Shared behind `Rc<RefCell<..>>` so it stays readable after the host has
/// been dropped along with its simulator.
#[derive(Debug, Default)]
pub struct HostLedger {
    pub pending: Vec<FrameHandle>,
    pub requested: u64,
    pub cancelled: Vec<FrameHandle>,
    pub active_subscriptions: Vec<ResizeSubscription>,
    pub unsubscribed: u64,
}

/// Host with scriptable capabilities that records scheduling calls.
#[derive(Debug)]
pub struct ScriptedHost {
    pub viewport: Viewport,
    pub surface_available: bool,
    pub reduced_motion: bool,
    ledger: Rc<RefCell<HostLedger>>,
    next_id: u64,
}

impl ScriptedHost {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            viewport: Viewport::new(width, height),
            surface_available: true,
            reduced_motion: false,
            ledger: Rc::default(),
            next_id: 0,
        }
    }

    pub fn ledger(&self) -> Ref<'_, HostLedger> {
        self.ledger.borrow()
    }

    pub fn ledger_mut(&self) -> RefMut<'_, HostLedger> {
        self.ledger.borrow_mut()
    }

    /// A handle on the ledger that outlives the host.
    pub fn shared_ledger(&self) -> Rc<RefCell<HostLedger>> {
        Rc::clone(&self.ledger)
    }
}

impl Host for ScriptedHost {
    type Surface = RecordingSurface;

    fn acquire_surface(&mut self) -> Option<RecordingSurface> {
        self.surface_available.then(RecordingSurface::default)
    }

    fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn prefers_reduced_motion(&self) -> bool {
        self.reduced_motion
    }

    fn request_frame(&mut self) -> FrameHandle {
        self.next_id += 1;
        let handle = FrameHandle(self.next_id);
        let mut ledger = self.ledger.borrow_mut();
        ledger.requested += 1;
        ledger.pending.push(handle);
        handle
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        let mut ledger = self.ledger.borrow_mut();
        ledger.pending.retain(|h| *h != handle);
        ledger.cancelled.push(handle);
    }

    fn subscribe_resize(&mut self) -> ResizeSubscription {
        self.next_id += 1;
        let sub = ResizeSubscription(self.next_id);
        self.ledger.borrow_mut().active_subscriptions.push(sub);
        sub
    }

    fn unsubscribe_resize(&mut self, subscription: ResizeSubscription) {
        let mut ledger = self.ledger.borrow_mut();
        ledger.active_subscriptions.retain(|s| *s != subscription);
        ledger.unsubscribed += 1;
    }
}
