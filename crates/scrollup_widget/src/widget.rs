//! The scroll-to-top widget
//!
//! [`scrollup`] mounts one hidden button on the host's document body and
//! wires two event paths: a throttled viewport scroll listener that drives
//! the visibility policy, and a click handler that scrolls the viewport
//! back to the top. The returned [`ScrollUp`] handle exposes the same
//! operations directly and chains.
//!
//! Visibility policy, evaluated at most once per configured throttle
//! interval: the button shows when the offset is past `scroll_distance`
//! AND has decreased since the previous evaluation (the user is scrolling
//! upward); any other outcome hides it. The previous offset starts at 0,
//! so the very first evaluation never shows the button.

use std::sync::{Arc, Mutex, Weak};

use scrollup_host::{
    throttle, ElementId, ElementSpec, ScrollEvent, ScrollHost, Throttled, ViewportListener,
};

use crate::config::ScrollUpConfig;

/// Handle to a mounted scroll-to-top widget.
///
/// Cloning the handle is cheap; all clones drive the same button. There is
/// no teardown - the button lives until the host goes away.
pub struct ScrollUp<H: ScrollHost> {
    inner: Arc<Mutex<Inner<H>>>,
}

impl<H: ScrollHost> Clone for ScrollUp<H> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

struct Inner<H: ScrollHost> {
    host: Weak<Mutex<H>>,
    config: ScrollUpConfig,
    button: ElementId,
    /// Offset seen by the most recent evaluation - never the raw offset of
    /// a dropped notification
    last_scroll_top: f32,
}

/// Mount a scroll-to-top widget on `host`.
///
/// Synchronously creates the button (hidden) from the config's id, class,
/// and text, appends it to the body, and registers the click handler and
/// the throttled scroll listener. The widget keeps only a weak reference
/// to the host; once the host is gone every operation is a no-op.
pub fn scrollup<H>(host: &Arc<Mutex<H>>, config: ScrollUpConfig) -> ScrollUp<H>
where
    H: ScrollHost + Send + 'static,
{
    tracing::debug!(
        id = %config.button_id,
        scroll_distance = config.scroll_distance,
        throttle_ms = config.throttle,
        "mounting scrollup widget"
    );

    let button = {
        let mut h = host.lock().unwrap();
        let button = h.create_element(
            ElementSpec::new(config.button_id.as_str())
                .class(config.button_class.as_str())
                .text(config.button_text.as_str()),
        );
        h.append_to_body(button);
        button
    };

    let throttle_ms = u64::from(config.throttle);
    let inner = Arc::new(Mutex::new(Inner {
        host: Arc::downgrade(host),
        config,
        button,
        last_scroll_top: 0.0,
    }));

    {
        let mut h = host.lock().unwrap();

        let click_inner = Arc::clone(&inner);
        h.on_click(
            button,
            Box::new(move || {
                scroll_to_top(&click_inner);
            }),
        );

        let scroll_inner = Arc::clone(&inner);
        h.on_scroll(Box::new(ScrollWatcher {
            throttled: throttle(
                throttle_ms,
                Box::new(move |offset| evaluate(&scroll_inner, offset)),
            ),
        }));
    }

    ScrollUp { inner }
}

impl<H: ScrollHost> ScrollUp<H> {
    /// Show the scroll-to-top button.
    ///
    /// Settles any in-flight fade first, then fades in over the configured
    /// animation speed. Idempotent.
    pub fn show(&self) -> &Self {
        fade_button(&self.inner, true);
        self
    }

    /// Hide the scroll-to-top button.
    ///
    /// Settles any in-flight fade first, then fades out over the
    /// configured animation speed. Idempotent.
    pub fn hide(&self) -> &Self {
        fade_button(&self.inner, false);
        self
    }

    /// Scroll the page to the top over the configured scroll speed.
    ///
    /// The button's click handler runs the same path.
    pub fn scroll_up(&self) -> &Self {
        scroll_to_top(&self.inner);
        self
    }

    /// The button element owned by the widget
    pub fn button(&self) -> ElementId {
        self.inner.lock().unwrap().button
    }
}

/// Viewport listener feeding the throttled evaluation
struct ScrollWatcher {
    throttled: Throttled<f32, Box<dyn FnMut(f32) + Send>>,
}

impl ViewportListener for ScrollWatcher {
    fn scrolled(&mut self, event: ScrollEvent) {
        self.throttled.notify(event.offset, event.timestamp);
    }

    fn frame(&mut self, now_ms: u64) {
        self.throttled.flush(now_ms);
    }
}

/// One run of the visibility policy
fn evaluate<H: ScrollHost>(inner: &Arc<Mutex<Inner<H>>>, current: f32) {
    let show = {
        let mut i = inner.lock().unwrap();
        let show = current > i.config.scroll_distance && current < i.last_scroll_top;
        tracing::trace!(
            offset = current,
            last = i.last_scroll_top,
            show,
            "scroll evaluation"
        );
        i.last_scroll_top = current;
        show
    };

    fade_button(inner, show);
}

fn fade_button<H: ScrollHost>(inner: &Arc<Mutex<Inner<H>>>, visible: bool) {
    let i = inner.lock().unwrap();
    let Some(host) = i.host.upgrade() else {
        return;
    };
    let mut h = host.lock().unwrap();

    // Settle whatever fade is running so the button converges to the most
    // recent request instead of queuing animations
    h.cancel_fade(i.button);
    if visible {
        h.fade_in(i.button, i.config.animation_speed);
    } else {
        h.fade_out(i.button, i.config.animation_speed);
    }
}

fn scroll_to_top<H: ScrollHost>(inner: &Arc<Mutex<Inner<H>>>) {
    let i = inner.lock().unwrap();
    let Some(host) = i.host.upgrade() else {
        return;
    };

    tracing::debug!(duration_ms = i.config.scroll_speed, "scrolling to top");
    host.lock()
        .unwrap()
        .animate_scroll_to(0.0, i.config.scroll_speed);
}

#[cfg(test)]
mod tests {
    use super::*;
    use scrollup_host::SimulatedHost;

    fn mounted(config: ScrollUpConfig) -> (Arc<Mutex<SimulatedHost>>, ScrollUp<SimulatedHost>) {
        let host = SimulatedHost::shared();
        let widget = scrollup(&host, config);
        (host, widget)
    }

    fn button_opacity(host: &Arc<Mutex<SimulatedHost>>, widget: &ScrollUp<SimulatedHost>) -> f32 {
        host.lock()
            .unwrap()
            .element(widget.button())
            .unwrap()
            .opacity
    }

    fn fade_target(
        host: &Arc<Mutex<SimulatedHost>>,
        widget: &ScrollUp<SimulatedHost>,
    ) -> Option<f32> {
        host.lock()
            .unwrap()
            .element(widget.button())
            .unwrap()
            .fade_target()
    }

    /// Scroll, then let a full throttle window pass so the next scroll
    /// evaluates immediately
    fn scroll_and_settle(
        host: &Arc<Mutex<SimulatedHost>>,
        offset: f32,
        window_ms: u64,
    ) {
        SimulatedHost::dispatch_scroll(host, offset);
        SimulatedHost::advance(host, window_ms);
    }

    #[test]
    fn test_mount_creates_one_hidden_button() {
        let (host, widget) = mounted(ScrollUpConfig::new());
        let h = host.lock().unwrap();

        assert_eq!(h.element_count(), 1);
        let button = h.element(widget.button()).unwrap();
        assert!(button.attached);
        assert!(!button.is_visible());
        assert_eq!(button.spec.id, "js-scrollup-button");
        assert_eq!(button.spec.class, "scrollup");
        assert_eq!(button.spec.text, "Scroll to Top");
    }

    #[test]
    fn test_mount_honors_custom_config() {
        let (host, _widget) = mounted(
            ScrollUpConfig::new()
                .button_id("top-button")
                .button_class("scrollup scrollup--custom")
                .button_text("Back up"),
        );
        let h = host.lock().unwrap();

        let button = h.find_by_id("top-button").unwrap();
        assert_eq!(button.spec.class, "scrollup scrollup--custom");
        assert_eq!(button.spec.text, "Back up");
        assert!(!button.is_visible());
    }

    #[test]
    fn test_shows_only_when_scrolling_up_past_distance() {
        // The defaults scenario: 400 -> 350 -> 250
        let (host, widget) = mounted(ScrollUpConfig::new());

        // 400 > 300 but not below the previous offset (0): hidden
        scroll_and_settle(&host, 400.0, 250);
        assert_eq!(button_opacity(&host, &widget), 0.0);

        // 350 > 300 and below 400: shown
        SimulatedHost::dispatch_scroll(&host, 350.0);
        assert_eq!(fade_target(&host, &widget), Some(1.0));
        SimulatedHost::advance(&host, 250);
        assert_eq!(button_opacity(&host, &widget), 1.0);

        // 250 is above the distance threshold: hidden again
        SimulatedHost::dispatch_scroll(&host, 250.0);
        assert_eq!(fade_target(&host, &widget), Some(0.0));
        SimulatedHost::advance(&host, 250);
        assert_eq!(button_opacity(&host, &widget), 0.0);
    }

    #[test]
    fn test_custom_distance_scenario() {
        // distance 500: 600 -> 550 shows only at the 550 evaluation
        let (host, widget) = mounted(ScrollUpConfig::new().scroll_distance(500.0));

        scroll_and_settle(&host, 600.0, 250);
        assert_eq!(button_opacity(&host, &widget), 0.0);
        assert!(fade_target(&host, &widget).is_none());

        SimulatedHost::dispatch_scroll(&host, 550.0);
        assert_eq!(fade_target(&host, &widget), Some(1.0));
    }

    #[test]
    fn test_never_shows_on_first_evaluation() {
        // Page already loaded far past the threshold; the previous offset
        // starts at 0, so the first evaluation cannot show the button
        let (host, widget) = mounted(ScrollUpConfig::new());

        SimulatedHost::dispatch_scroll(&host, 800.0);
        assert_eq!(button_opacity(&host, &widget), 0.0);
        assert!(fade_target(&host, &widget).is_none());
    }

    #[test]
    fn test_scrolling_down_hides() {
        let (host, widget) = mounted(ScrollUpConfig::new());

        scroll_and_settle(&host, 600.0, 250);
        scroll_and_settle(&host, 500.0, 250); // up: shown
        assert_eq!(button_opacity(&host, &widget), 1.0);

        SimulatedHost::dispatch_scroll(&host, 700.0); // down again
        assert_eq!(fade_target(&host, &widget), Some(0.0));
    }

    #[test]
    fn test_throttle_drops_intermediate_offsets() {
        let (host, widget) = mounted(ScrollUpConfig::new());

        scroll_and_settle(&host, 400.0, 250);
        // Evaluated immediately: 380 < 400, shown; window now closed
        SimulatedHost::dispatch_scroll(&host, 380.0);
        assert_eq!(fade_target(&host, &widget), Some(1.0));

        // Burst inside the window: 100 would hide, but it must be dropped
        // in favor of the most recent offset
        SimulatedHost::dispatch_scroll(&host, 100.0);
        SimulatedHost::dispatch_scroll(&host, 350.0);

        // Window reopens: one trailing evaluation with 350 (> 300, < 380)
        SimulatedHost::advance(&host, 250);
        assert_eq!(button_opacity(&host, &widget), 1.0);

        // Had 100 been evaluated, 350 would not count as scrolling up and
        // the button would be fading out
        assert!(fade_target(&host, &widget).is_none());
    }

    #[test]
    fn test_show_is_idempotent() {
        let (host, widget) = mounted(ScrollUpConfig::new());

        widget.show();
        assert_eq!(fade_target(&host, &widget), Some(1.0));

        // Second show settles the first fade and has nothing left to do
        widget.show();
        assert_eq!(button_opacity(&host, &widget), 1.0);
        assert!(fade_target(&host, &widget).is_none());

        widget.show();
        assert_eq!(button_opacity(&host, &widget), 1.0);
    }

    #[test]
    fn test_hide_is_idempotent() {
        let (host, widget) = mounted(ScrollUpConfig::new());

        widget.show();
        SimulatedHost::advance(&host, 250);
        widget.hide();
        assert_eq!(fade_target(&host, &widget), Some(0.0));

        widget.hide();
        assert_eq!(button_opacity(&host, &widget), 0.0);
        assert!(fade_target(&host, &widget).is_none());
    }

    #[test]
    fn test_show_replaces_inflight_hide() {
        let (host, widget) = mounted(ScrollUpConfig::new());

        widget.show();
        SimulatedHost::advance(&host, 250);
        widget.hide();
        SimulatedHost::advance(&host, 100); // halfway out

        widget.show();
        assert_eq!(fade_target(&host, &widget), Some(1.0));
        SimulatedHost::advance(&host, 250);
        assert_eq!(button_opacity(&host, &widget), 1.0);
    }

    #[test]
    fn test_click_scrolls_to_top() {
        let (host, widget) = mounted(ScrollUpConfig::new());
        SimulatedHost::dispatch_scroll(&host, 500.0);

        SimulatedHost::click(&host, widget.button());
        assert_eq!(
            host.lock().unwrap().scroll_animation(),
            Some((0.0, 300))
        );

        SimulatedHost::advance(&host, 300);
        assert_eq!(host.lock().unwrap().scroll_top(), 0.0);
    }

    #[test]
    fn test_scroll_up_matches_click() {
        let (host, widget) = mounted(ScrollUpConfig::new().scroll_speed(500));
        SimulatedHost::dispatch_scroll(&host, 800.0);

        widget.scroll_up();
        assert_eq!(
            host.lock().unwrap().scroll_animation(),
            Some((0.0, 500))
        );

        SimulatedHost::advance(&host, 250);
        let midway = host.lock().unwrap().scroll_top();
        assert!((midway - 400.0).abs() < 1e-3);
    }

    #[test]
    fn test_handle_chains() {
        let (host, widget) = mounted(ScrollUpConfig::new());

        widget.show().hide().scroll_up();
        assert_eq!(fade_target(&host, &widget), Some(0.0));
        assert!(host.lock().unwrap().is_scroll_animating());
    }

    #[test]
    fn test_operations_are_noops_without_host() {
        let (host, widget) = mounted(ScrollUpConfig::new());
        drop(host);

        // Host gone: nothing to drive, nothing to panic about
        widget.show().hide().scroll_up();
    }
}
