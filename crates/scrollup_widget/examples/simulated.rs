//! Scroll-to-top widget on the simulated host
//!
//! Scripts a scroll session: the user reads down the page, scrolls back
//! up (the button fades in), and clicks it (the viewport animates back to
//! the top).
//!
//! Run with: cargo run -p scrollup_widget --example simulated

use scrollup_widget::prelude::*;

fn main() {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    let host = SimulatedHost::shared();
    let widget = scrollup(
        &host,
        ScrollUpConfig::new()
            .button_class("scrollup scrollup--custom")
            .scroll_distance(500.0),
    );

    // Reading down the page
    for offset in [200.0, 450.0, 700.0, 900.0] {
        SimulatedHost::dispatch_scroll(&host, offset);
        SimulatedHost::advance(&host, 300);
        report(&host, &widget);
    }

    // Heading back up: past the 500px threshold the button appears
    for offset in [750.0, 600.0, 520.0] {
        SimulatedHost::dispatch_scroll(&host, offset);
        SimulatedHost::advance(&host, 300);
        report(&host, &widget);
    }

    // Click the button and let the scroll animation play out
    SimulatedHost::click(&host, widget.button());
    SimulatedHost::advance(&host, 150);
    report(&host, &widget);
    SimulatedHost::advance(&host, 150);
    report(&host, &widget);
}

fn report(host: &std::sync::Arc<std::sync::Mutex<SimulatedHost>>, widget: &ScrollUp<SimulatedHost>) {
    let h = host.lock().unwrap();
    let button = h.element(widget.button()).expect("button exists");
    tracing::info!(
        clock_ms = h.now_ms(),
        scroll_top = h.scroll_top(),
        button_opacity = button.opacity,
        "state"
    );
}
