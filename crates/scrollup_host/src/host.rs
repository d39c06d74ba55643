//! The `ScrollHost` trait and viewport scroll notifications
//!
//! Hosts are frame-driven: they advance animations once per frame and
//! deliver events between frames. All durations are milliseconds, all
//! offsets are pixels.

use crate::element::{ElementId, ElementSpec};

/// A viewport scroll notification
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScrollEvent {
    /// Vertical scroll offset at the time of the event, in pixels
    pub offset: f32,
    /// Host clock at the time of the event, in milliseconds
    pub timestamp: u64,
}

/// Listener for viewport scroll notifications.
///
/// Hosts call [`scrolled`](Self::scrolled) once per notification and
/// [`frame`](Self::frame) once per frame. The frame hook lets time-gated
/// listeners flush trailing work without owning a timer.
pub trait ViewportListener {
    /// A scroll notification with the current offset
    fn scrolled(&mut self, event: ScrollEvent);

    /// Called once per host frame with the host clock
    fn frame(&mut self, _now_ms: u64) {}
}

/// The surface the widget needs from its UI framework.
///
/// One element inserted through this trait maps to one node in the host's
/// document. Fades target element opacity, scroll animation targets the
/// viewport offset; the two never contend.
pub trait ScrollHost {
    /// Create an element from `spec`. The element starts hidden.
    fn create_element(&mut self, spec: ElementSpec) -> ElementId;

    /// Attach a created element to the document body
    fn append_to_body(&mut self, el: ElementId);

    /// Invoke `handler` whenever `el` is clicked
    fn on_click(&mut self, el: ElementId, handler: Box<dyn FnMut() + Send>);

    /// Register a viewport scroll listener
    fn on_scroll(&mut self, listener: Box<dyn ViewportListener + Send>);

    /// Current vertical scroll offset of the viewport, in pixels
    fn scroll_top(&self) -> f32;

    /// Animate the viewport offset to `offset` over `duration_ms`,
    /// replacing any viewport animation already in flight
    fn animate_scroll_to(&mut self, offset: f32, duration_ms: u32);

    /// Fade `el` to fully visible over `duration_ms`
    fn fade_in(&mut self, el: ElementId, duration_ms: u32);

    /// Fade `el` to fully hidden over `duration_ms`
    fn fade_out(&mut self, el: ElementId, duration_ms: u32);

    /// Settle any in-flight fade on `el` by snapping the element to the
    /// fade's end value. No-op when nothing is fading.
    fn cancel_fade(&mut self, el: ElementId);
}
