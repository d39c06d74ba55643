//! Host contract for the scrollup widget
//!
//! The widget never talks to a concrete UI framework. It talks to a
//! [`ScrollHost`]: element creation and attachment, click and viewport
//! scroll binding, fade primitives with jump-to-end cancellation, and
//! smooth viewport scrolling. Any frame-driven host that supplies those
//! can mount the widget.
//!
//! This crate also provides [`throttle`], the rate-limiting combinator the
//! widget wraps around its scroll listener, and [`SimulatedHost`], a
//! deterministic in-memory host for tests and examples.

pub mod element;
pub mod host;
pub mod sim;
pub mod throttle;

pub use element::{ElementId, ElementSpec};
pub use host::{ScrollEvent, ScrollHost, ViewportListener};
pub use sim::SimulatedHost;
pub use throttle::{throttle, Throttled};
