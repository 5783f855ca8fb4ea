//! Port implementations for running the controllers outside a browser.

use crate::domain::model::{CardBox, CardState, LatLng};
use crate::domain::ports::{
    CarouselView, MapContainer, MapHandle, MapOptions, MapProvider, MarkerHandle, MarkerOptions,
    PageShell,
};

/// Alerts go to stdout; reloads are only logged.
#[derive(Debug, Default)]
pub struct TerminalShell {
    pub alerts: Vec<String>,
    pub reloads: usize,
}

impl PageShell for TerminalShell {
    fn alert(&mut self, text: &str) {
        println!("{}", text);
        self.alerts.push(text.to_string());
    }

    fn reload(&mut self) {
        tracing::info!("Page reload requested");
        self.reloads += 1;
    }
}

/// Evenly spaced cards in a track as wide as the viewport. Every change is
/// logged.
#[derive(Debug, Clone)]
pub struct LoggingView {
    cards: usize,
    viewport_width: f64,
    card_width: f64,
    card_margin: f64,
    offset: f64,
    active_dot: usize,
}

impl LoggingView {
    pub fn new(cards: usize, viewport_width: f64, card_width: f64, card_margin: f64) -> Self {
        Self {
            cards,
            viewport_width,
            card_width,
            card_margin,
            offset: 0.0,
            active_dot: 0,
        }
    }

    pub fn offset(&self) -> f64 {
        self.offset
    }

    pub fn active_dot(&self) -> usize {
        self.active_dot
    }
}

impl CarouselView for LoggingView {
    fn card_count(&self) -> usize {
        self.cards
    }

    fn viewport_width(&self) -> f64 {
        self.viewport_width
    }

    fn track_width(&self) -> f64 {
        self.viewport_width
    }

    fn card_box(&self, index: usize) -> CardBox {
        let outer = self.card_width + 2.0 * self.card_margin;
        let offset_left = index as f64 * outer + self.card_margin;
        CardBox {
            left: offset_left + self.offset,
            width: self.card_width,
            margin_left: self.card_margin,
            margin_right: self.card_margin,
            offset_left,
        }
    }

    fn render_dots(&mut self, count: usize, active: usize) {
        self.active_dot = active;
        tracing::info!("Rendered {} dots, dot {} active", count, active);
    }

    fn set_active_dot(&mut self, index: usize) {
        self.active_dot = index;
    }

    fn apply_card_states(&mut self, states: &[CardState]) {
        let classes: Vec<&str> = states
            .iter()
            .map(|s| s.css_class().unwrap_or("-"))
            .collect();
        tracing::info!("Cards: [{}]", classes.join(" "));
    }

    fn set_track_offset(&mut self, offset_px: f64) {
        self.offset = offset_px;
        tracing::info!("translateX({:.1}px)", offset_px);
    }
}

/// Map provider for hosts without a map surface: no container is ever
/// visible, so the widget never draws.
#[derive(Debug, Default)]
pub struct HeadlessMap {
    next_id: u32,
}

impl HeadlessMap {
    fn next(&mut self) -> u32 {
        self.next_id += 1;
        self.next_id
    }
}

impl MapProvider for HeadlessMap {
    fn container_visible(&self, _container: MapContainer) -> bool {
        false
    }

    fn create_map(&mut self, container: MapContainer, options: &MapOptions) -> MapHandle {
        tracing::debug!("map #{} at {}", container.element_id(), options.center);
        MapHandle(self.next())
    }

    fn create_marker(&mut self, _map: MapHandle, options: &MarkerOptions) -> MarkerHandle {
        tracing::debug!("marker '{}' at {}", options.title, options.position);
        MarkerHandle(self.next())
    }

    fn set_center(&mut self, _map: MapHandle, _at: LatLng) {}

    fn set_marker_position(&mut self, _marker: MarkerHandle, _at: LatLng) {}

    fn trigger_resize(&mut self, _map: MapHandle) {}

    fn attach_autocomplete(&mut self, _input_id: &str) {}
}
