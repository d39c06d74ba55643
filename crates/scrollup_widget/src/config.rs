//! Widget configuration

use serde::{Deserialize, Serialize};

/// Scroll-to-top widget configuration.
///
/// Every field has a default; construct with [`ScrollUpConfig::new`] and
/// override what you need. Values are passed through to the host
/// unvalidated - a nonsensical distance simply means the button never
/// shows.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScrollUpConfig {
    /// The id of the scroll-to-top button
    pub button_id: String,
    /// The style class(es) of the scroll-to-top button
    pub button_class: String,
    /// The text of the scroll-to-top button
    pub button_text: String,
    /// Distance (px) from the top of the page before the button may show
    pub scroll_distance: f32,
    /// Time (ms) it takes the page to scroll to the top after a click
    pub scroll_speed: u32,
    /// Time (ms) it takes the button to fade in and out
    pub animation_speed: u32,
    /// Minimum time (ms) between scroll-position evaluations
    pub throttle: u32,
}

impl Default for ScrollUpConfig {
    fn default() -> Self {
        Self {
            button_id: "js-scrollup-button".to_string(),
            button_class: "scrollup".to_string(),
            button_text: "Scroll to Top".to_string(),
            scroll_distance: 300.0,
            scroll_speed: 300,
            animation_speed: 250,
            throttle: 250,
        }
    }
}

impl ScrollUpConfig {
    /// Create a config with the defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the button id
    pub fn button_id(mut self, id: impl Into<String>) -> Self {
        self.button_id = id.into();
        self
    }

    /// Set the button class(es)
    pub fn button_class(mut self, class: impl Into<String>) -> Self {
        self.button_class = class.into();
        self
    }

    /// Set the button text
    pub fn button_text(mut self, text: impl Into<String>) -> Self {
        self.button_text = text.into();
        self
    }

    /// Set the show threshold, in pixels from the top
    pub fn scroll_distance(mut self, px: f32) -> Self {
        self.scroll_distance = px;
        self
    }

    /// Set the scroll-to-top animation duration, in milliseconds
    pub fn scroll_speed(mut self, ms: u32) -> Self {
        self.scroll_speed = ms;
        self
    }

    /// Set the fade duration, in milliseconds
    pub fn animation_speed(mut self, ms: u32) -> Self {
        self.animation_speed = ms;
        self
    }

    /// Set the minimum interval between scroll evaluations, in milliseconds
    pub fn throttle(mut self, ms: u32) -> Self {
        self.throttle = ms;
        self
    }
}
