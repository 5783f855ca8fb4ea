use crate::domain::model::{CardBox, CardState, LatLng, StationUpdate, UpdateOutcome};
use crate::utils::error::Result;
use async_trait::async_trait;

/// DOM capability backing the testimonial carousel.
pub trait CarouselView {
    fn card_count(&self) -> usize;
    fn viewport_width(&self) -> f64;
    fn track_width(&self) -> f64;
    fn card_box(&self, index: usize) -> CardBox;
    /// Replaces all dots; `active` carries the active class.
    fn render_dots(&mut self, count: usize, active: usize);
    fn set_active_dot(&mut self, index: usize);
    /// One entry per card, in display order.
    fn apply_card_states(&mut self, states: &[CardState]);
    fn set_track_offset(&mut self, offset_px: f64);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MapHandle(pub u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MarkerHandle(pub u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MapContainer {
    Dashboard,
    Modal,
}

impl MapContainer {
    pub fn element_id(self) -> &'static str {
        match self {
            MapContainer::Dashboard => "display-map",
            MapContainer::Modal => "modal-map",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MapOptions {
    pub center: LatLng,
    pub zoom: u8,
    pub map_type_control: bool,
    pub street_view_control: bool,
    pub fullscreen_control: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MarkerOptions {
    pub position: LatLng,
    pub draggable: bool,
    pub title: String,
}

/// Third-party mapping service.
pub trait MapProvider {
    fn container_visible(&self, container: MapContainer) -> bool;
    fn create_map(&mut self, container: MapContainer, options: &MapOptions) -> MapHandle;
    fn create_marker(&mut self, map: MapHandle, options: &MarkerOptions) -> MarkerHandle;
    fn set_center(&mut self, map: MapHandle, at: LatLng);
    fn set_marker_position(&mut self, marker: MarkerHandle, at: LatLng);
    fn trigger_resize(&mut self, map: MapHandle);
    /// Hooks place autocomplete onto the text input with the given id.
    fn attach_autocomplete(&mut self, input_id: &str);
}

/// Browser window operations with user-visible effects.
pub trait PageShell {
    /// Blocking alert dialog.
    fn alert(&mut self, text: &str);
    fn reload(&mut self);
}

#[async_trait]
pub trait StationApi: Send + Sync {
    async fn update_station(&self, update: &StationUpdate) -> Result<UpdateOutcome>;
}
