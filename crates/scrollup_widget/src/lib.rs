//! Scroll-to-top button widget
//!
//! A plugin for a frame-driven UI host: mounts one hidden button on the
//! document body, fades it in when the user scrolls upward past a
//! configurable distance from the top, and smoothly scrolls the viewport
//! back to the top when the button is clicked.
//!
//! # Example
//!
//! ```rust,ignore
//! use scrollup_widget::prelude::*;
//!
//! let host = SimulatedHost::shared();
//! let widget = scrollup(
//!     &host,
//!     ScrollUpConfig::new()
//!         .button_class("scrollup scrollup--custom")
//!         .scroll_distance(500.0),
//! );
//!
//! // The handle chains, and the operations are also wired to the
//! // button's click and the viewport's scroll events.
//! widget.show().hide();
//! widget.scroll_up();
//! ```

pub mod config;
pub mod widget;

pub use config::ScrollUpConfig;
pub use widget::{scrollup, ScrollUp};

/// Commonly used items
pub mod prelude {
    pub use crate::config::ScrollUpConfig;
    pub use crate::widget::{scrollup, ScrollUp};
    pub use scrollup_host::{ScrollHost, SimulatedHost};
}
