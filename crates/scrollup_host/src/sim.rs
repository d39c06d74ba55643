//! Deterministic in-memory host for tests and examples
//!
//! Models just enough of a UI host to observe a widget from the outside:
//! elements with an opacity and a single-slot fade transition, a viewport
//! with one scroll-animation slot, and a millisecond clock advanced by the
//! caller. Transitions interpolate linearly; easing belongs to real hosts.
//!
//! Listeners registered on the host may call back into it, so dispatch
//! goes through associated functions taking the shared handle
//! ([`dispatch_scroll`](SimulatedHost::dispatch_scroll),
//! [`click`](SimulatedHost::click), [`advance`](SimulatedHost::advance))
//! which release the host lock before running listeners.

use std::sync::{Arc, Mutex};

use slotmap::{SecondaryMap, SlotMap};
use smallvec::SmallVec;

use crate::element::{ElementId, ElementSpec};
use crate::host::{ScrollEvent, ScrollHost, ViewportListener};

/// An element owned by the simulated host
#[derive(Debug)]
pub struct Element {
    /// The spec the element was created from
    pub spec: ElementSpec,
    /// Current opacity, 0.0 (hidden) to 1.0 (fully visible)
    pub opacity: f32,
    /// Whether the element has been attached to the body
    pub attached: bool,
    fade: Option<Transition>,
}

impl Element {
    /// Whether the element is visible at all
    pub fn is_visible(&self) -> bool {
        self.opacity > 0.0
    }

    /// Whether a fade is currently running
    pub fn is_fading(&self) -> bool {
        self.fade.is_some()
    }

    /// End value of the running fade, if any
    pub fn fade_target(&self) -> Option<f32> {
        self.fade.map(|f| f.to)
    }

    /// Duration of the running fade, if any
    pub fn fade_duration_ms(&self) -> Option<u32> {
        self.fade.map(|f| f.duration_ms)
    }
}

/// A timed linear transition between two values.
///
/// Elements and the viewport hold at most one; starting a new transition
/// replaces the old one, never queues behind it.
#[derive(Clone, Copy, Debug)]
struct Transition {
    from: f32,
    to: f32,
    elapsed_ms: f32,
    duration_ms: u32,
}

impl Transition {
    fn new(from: f32, to: f32, duration_ms: u32) -> Self {
        Self {
            from,
            to,
            elapsed_ms: 0.0,
            duration_ms,
        }
    }

    fn value(&self) -> f32 {
        if self.duration_ms == 0 {
            return self.to;
        }
        let t = (self.elapsed_ms / self.duration_ms as f32).clamp(0.0, 1.0);
        self.from + (self.to - self.from) * t
    }

    fn finished(&self) -> bool {
        self.elapsed_ms >= self.duration_ms as f32
    }
}

type ClickHandlers = SmallVec<[Box<dyn FnMut() + Send>; 1]>;

/// An in-memory [`ScrollHost`] with a caller-driven clock
pub struct SimulatedHost {
    elements: SlotMap<ElementId, Element>,
    click_handlers: SecondaryMap<ElementId, ClickHandlers>,
    scroll_listeners: Vec<Box<dyn ViewportListener + Send>>,
    scroll_top: f32,
    scroll_anim: Option<Transition>,
    clock_ms: u64,
}

impl SimulatedHost {
    pub fn new() -> Self {
        Self {
            elements: SlotMap::with_key(),
            click_handlers: SecondaryMap::new(),
            scroll_listeners: Vec::new(),
            scroll_top: 0.0,
            scroll_anim: None,
            clock_ms: 0,
        }
    }

    /// Create a host behind the shared handle the dispatch helpers expect
    pub fn shared() -> Arc<Mutex<Self>> {
        Arc::new(Mutex::new(Self::new()))
    }

    /// Look up an element
    pub fn element(&self, el: ElementId) -> Option<&Element> {
        self.elements.get(el)
    }

    /// Look up an element by its document identifier
    pub fn find_by_id(&self, id: &str) -> Option<&Element> {
        self.elements.values().find(|e| e.spec.id == id)
    }

    /// Number of elements created on this host
    pub fn element_count(&self) -> usize {
        self.elements.len()
    }

    /// Host clock in milliseconds
    pub fn now_ms(&self) -> u64 {
        self.clock_ms
    }

    /// Whether a viewport scroll animation is in flight
    pub fn is_scroll_animating(&self) -> bool {
        self.scroll_anim.is_some()
    }

    /// Target and duration of the in-flight scroll animation, if any
    pub fn scroll_animation(&self) -> Option<(f32, u32)> {
        self.scroll_anim.map(|a| (a.to, a.duration_ms))
    }

    /// Deliver a scroll notification to every registered listener.
    ///
    /// Models the user scrolling the viewport to `offset`: any animated
    /// scroll in flight is dropped (the user took over). Listeners run
    /// with the host unlocked so they can call back into it.
    pub fn dispatch_scroll(host: &Arc<Mutex<Self>>, offset: f32) {
        let (mut listeners, timestamp) = {
            let mut h = host.lock().unwrap();
            h.scroll_top = offset;
            h.scroll_anim = None;
            (std::mem::take(&mut h.scroll_listeners), h.clock_ms)
        };

        let event = ScrollEvent { offset, timestamp };
        for listener in &mut listeners {
            listener.scrolled(event);
        }

        let mut h = host.lock().unwrap();
        // Keep listeners registered during dispatch
        listeners.append(&mut h.scroll_listeners);
        h.scroll_listeners = listeners;
    }

    /// Deliver a click on `el` to its handlers
    pub fn click(host: &Arc<Mutex<Self>>, el: ElementId) {
        let Some(mut handlers) = host.lock().unwrap().click_handlers.remove(el) else {
            return;
        };

        tracing::debug!(element = ?el, "dispatching click");
        for handler in &mut handlers {
            handler();
        }

        let mut h = host.lock().unwrap();
        if let Some(registered) = h.click_handlers.get_mut(el) {
            handlers.append(registered);
        }
        h.click_handlers.insert(el, handlers);
    }

    /// Advance the clock by `dt_ms`: tick fades and the viewport scroll
    /// animation, then run every listener's frame hook.
    pub fn advance(host: &Arc<Mutex<Self>>, dt_ms: u64) {
        let (mut listeners, now_ms) = {
            let mut h = host.lock().unwrap();
            h.clock_ms += dt_ms;
            h.tick_transitions(dt_ms as f32);
            (std::mem::take(&mut h.scroll_listeners), h.clock_ms)
        };

        for listener in &mut listeners {
            listener.frame(now_ms);
        }

        let mut h = host.lock().unwrap();
        listeners.append(&mut h.scroll_listeners);
        h.scroll_listeners = listeners;
    }

    fn tick_transitions(&mut self, dt_ms: f32) {
        for element in self.elements.values_mut() {
            if let Some(fade) = element.fade.as_mut() {
                fade.elapsed_ms += dt_ms;
                element.opacity = fade.value();
                if fade.finished() {
                    element.opacity = fade.to;
                    element.fade = None;
                }
            }
        }

        if let Some(anim) = self.scroll_anim.as_mut() {
            anim.elapsed_ms += dt_ms;
            self.scroll_top = anim.value();
            if anim.finished() {
                self.scroll_top = anim.to;
                self.scroll_anim = None;
            }
        }
    }

    fn start_fade(&mut self, el: ElementId, to: f32, duration_ms: u32) {
        let Some(element) = self.elements.get_mut(el) else {
            return;
        };
        // Already settled at the target: nothing to animate
        if (element.opacity - to).abs() < f32::EPSILON {
            element.fade = None;
            return;
        }
        if duration_ms == 0 {
            element.opacity = to;
            element.fade = None;
            return;
        }
        element.fade = Some(Transition::new(element.opacity, to, duration_ms));
    }
}

impl Default for SimulatedHost {
    fn default() -> Self {
        Self::new()
    }
}

impl ScrollHost for SimulatedHost {
    fn create_element(&mut self, spec: ElementSpec) -> ElementId {
        tracing::debug!(id = %spec.id, "creating element");
        self.elements.insert(Element {
            spec,
            opacity: 0.0,
            attached: false,
            fade: None,
        })
    }

    fn append_to_body(&mut self, el: ElementId) {
        if let Some(element) = self.elements.get_mut(el) {
            element.attached = true;
        }
    }

    fn on_click(&mut self, el: ElementId, handler: Box<dyn FnMut() + Send>) {
        if let Some(entry) = self.click_handlers.entry(el) {
            entry.or_insert_with(SmallVec::new).push(handler);
        }
    }

    fn on_scroll(&mut self, listener: Box<dyn ViewportListener + Send>) {
        self.scroll_listeners.push(listener);
    }

    fn scroll_top(&self) -> f32 {
        self.scroll_top
    }

    fn animate_scroll_to(&mut self, offset: f32, duration_ms: u32) {
        if duration_ms == 0 {
            self.scroll_top = offset;
            self.scroll_anim = None;
            return;
        }
        self.scroll_anim = Some(Transition::new(self.scroll_top, offset, duration_ms));
    }

    fn fade_in(&mut self, el: ElementId, duration_ms: u32) {
        self.start_fade(el, 1.0, duration_ms);
    }

    fn fade_out(&mut self, el: ElementId, duration_ms: u32) {
        self.start_fade(el, 0.0, duration_ms);
    }

    fn cancel_fade(&mut self, el: ElementId) {
        if let Some(element) = self.elements.get_mut(el) {
            if let Some(fade) = element.fade.take() {
                element.opacity = fade.to;
            }
        }
    }
}
