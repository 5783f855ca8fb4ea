//! Station location maps: the read-only dashboard map and the editable map
//! inside the station modal. Both markers and the hidden `latitude` /
//! `longitude` inputs are kept in agreement.

use crate::domain::model::LatLng;
use crate::domain::ports::{
    MapContainer, MapHandle, MapOptions, MapProvider, MarkerHandle, MarkerOptions,
};

pub const DEFAULT_CENTER: LatLng = LatLng {
    lat: 26.9124,
    lng: 75.7873,
};
pub const DEFAULT_ZOOM: u8 = 12;
pub const SEARCH_INPUT_ID: &str = "map-search";

#[derive(Debug, Clone, PartialEq)]
pub struct MapSettings {
    pub default_center: LatLng,
    pub zoom: u8,
}

impl Default for MapSettings {
    fn default() -> Self {
        Self {
            default_center: DEFAULT_CENTER,
            zoom: DEFAULT_ZOOM,
        }
    }
}

/// Contents of the hidden coordinate inputs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LocationFields {
    pub latitude: String,
    pub longitude: String,
}

impl LocationFields {
    pub fn new(latitude: impl Into<String>, longitude: impl Into<String>) -> Self {
        Self {
            latitude: latitude.into(),
            longitude: longitude.into(),
        }
    }

    /// Both inputs as a coordinate, if both have a numeric prefix.
    pub fn parsed(&self) -> Option<LatLng> {
        let lat = leading_float(&self.latitude)?;
        let lng = leading_float(&self.longitude)?;
        Some(LatLng::new(lat, lng))
    }

    /// Each axis falls back on its own. Zero counts as unset, like an input
    /// that never got a value.
    pub fn position_or(&self, default: LatLng) -> LatLng {
        let axis = |raw: &str, fallback: f64| {
            leading_float(raw)
                .filter(|v| *v != 0.0)
                .unwrap_or(fallback)
        };
        LatLng::new(
            axis(&self.latitude, default.lat),
            axis(&self.longitude, default.lng),
        )
    }

    pub fn set(&mut self, at: LatLng) {
        self.latitude = at.lat.to_string();
        self.longitude = at.lng.to_string();
    }
}

/// Numeric prefix of an input value, read the way browsers read form
/// numbers: `"26.9abc"` is 26.9 and `"abc"` is nothing.
fn leading_float(raw: &str) -> Option<f64> {
    let s = raw.trim_start();
    let bytes = s.as_bytes();
    let digits_from = |mut at: usize| {
        while at < bytes.len() && bytes[at].is_ascii_digit() {
            at += 1;
        }
        at
    };

    let mut end = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));
    let int_end = digits_from(end);
    let mut has_digits = int_end > end;
    end = int_end;

    if bytes.get(end) == Some(&b'.') {
        let frac_end = digits_from(end + 1);
        if has_digits || frac_end > end + 1 {
            has_digits = true;
            end = frac_end;
        }
    }
    if !has_digits {
        return None;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp = end + 1;
        if matches!(bytes.get(exp), Some(b'+' | b'-')) {
            exp += 1;
        }
        let exp_end = digits_from(exp);
        if exp_end > exp {
            end = exp_end;
        }
    }

    s[..end].parse::<f64>().ok().filter(|v| v.is_finite())
}

#[derive(Debug, Clone, Copy)]
struct PlacedMap {
    map: MapHandle,
    marker: MarkerHandle,
}

pub struct MapWidget<P: MapProvider> {
    provider: P,
    settings: MapSettings,
    fields: LocationFields,
    dashboard: Option<PlacedMap>,
    modal: Option<PlacedMap>,
    autocomplete_attached: bool,
}

impl<P: MapProvider> MapWidget<P> {
    pub fn new(provider: P, settings: MapSettings, fields: LocationFields) -> Self {
        Self {
            provider,
            settings,
            fields,
            dashboard: None,
            modal: None,
            autocomplete_attached: false,
        }
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    pub fn fields(&self) -> &LocationFields {
        &self.fields
    }

    pub fn is_initialized(&self, container: MapContainer) -> bool {
        match container {
            MapContainer::Dashboard => self.dashboard.is_some(),
            MapContainer::Modal => self.modal.is_some(),
        }
    }

    fn options(&self, center: LatLng) -> MapOptions {
        MapOptions {
            center,
            zoom: self.settings.zoom,
            map_type_control: false,
            street_view_control: false,
            fullscreen_control: false,
        }
    }

    /// Draw or refresh the map in `container`. Returns `false` when the
    /// container is hidden or has no size yet.
    pub fn init(&mut self, container: MapContainer) -> bool {
        if !self.provider.container_visible(container) {
            tracing::warn!(
                "Map element #{} not ready or not visible!",
                container.element_id()
            );
            return false;
        }

        let position = self.fields.position_or(self.settings.default_center);
        match container {
            MapContainer::Dashboard => self.init_dashboard(position),
            MapContainer::Modal => self.init_modal(position),
        }
        true
    }

    fn init_dashboard(&mut self, position: LatLng) {
        match self.dashboard {
            Some(placed) => {
                self.provider.set_center(placed.map, position);
                self.provider.set_marker_position(placed.marker, position);
            }
            None => {
                let options = self.options(position);
                let map = self.provider.create_map(MapContainer::Dashboard, &options);
                let marker = self.provider.create_marker(
                    map,
                    &MarkerOptions {
                        position,
                        draggable: false,
                        title: "Station Location".to_string(),
                    },
                );
                self.dashboard = Some(PlacedMap { map, marker });
                tracing::debug!("Dashboard map created at {}", position);
            }
        }
    }

    fn init_modal(&mut self, position: LatLng) {
        if !self.autocomplete_attached {
            self.provider.attach_autocomplete(SEARCH_INPUT_ID);
            self.autocomplete_attached = true;
        }

        match self.modal {
            Some(placed) => {
                self.provider.trigger_resize(placed.map);
                self.provider.set_center(placed.map, position);
                self.provider.set_marker_position(placed.marker, position);
            }
            None => {
                let options = self.options(position);
                let map = self.provider.create_map(MapContainer::Modal, &options);
                let marker = self.provider.create_marker(
                    map,
                    &MarkerOptions {
                        position,
                        draggable: true,
                        title: "Drag to set location".to_string(),
                    },
                );
                self.modal = Some(PlacedMap { map, marker });
                tracing::debug!("Modal map created at {}", position);
            }
        }
    }

    /// Autocomplete picked a place. Places without geometry are ignored.
    pub fn place_selected(&mut self, location: Option<LatLng>) {
        let Some(at) = location else {
            return;
        };
        if let Some(placed) = self.modal {
            self.provider.set_center(placed.map, at);
            self.provider.set_marker_position(placed.marker, at);
        }
        self.record_location(at);
    }

    /// The draggable marker was dropped; the provider has already moved it.
    pub fn marker_dragged(&mut self, at: LatLng) {
        self.record_location(at);
    }

    pub fn map_clicked(&mut self, at: LatLng) {
        if let Some(placed) = self.modal {
            self.provider.set_marker_position(placed.marker, at);
        }
        self.record_location(at);
    }

    /// A hidden input was edited directly.
    pub fn set_fields(&mut self, fields: LocationFields) {
        self.fields = fields;
        self.fields_changed();
    }

    pub fn fields_changed(&mut self) {
        let (Some(placed), Some(at)) = (self.dashboard, self.fields.parsed()) else {
            return;
        };
        self.provider.set_center(placed.map, at);
        self.provider.set_marker_position(placed.marker, at);
    }

    fn record_location(&mut self, at: LatLng) {
        self.fields.set(at);
        if let Some(placed) = self.dashboard {
            self.provider.set_marker_position(placed.marker, at);
        }
        tracing::debug!("Station location set to {}", at);
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::collections::{HashMap, HashSet};

    #[derive(Debug, Clone, PartialEq)]
    pub(crate) enum Call {
        CreateMap(MapContainer, LatLng),
        CreateMarker(MapHandle, LatLng, bool),
        Center(MapHandle, LatLng),
        MoveMarker(MarkerHandle, LatLng),
        Resize(MapHandle),
        Autocomplete(String),
    }

    #[derive(Debug, Default)]
    pub(crate) struct RecordingProvider {
        pub visible: HashSet<MapContainer>,
        pub calls: Vec<Call>,
        pub markers: HashMap<MarkerHandle, LatLng>,
        next_id: u32,
    }

    impl RecordingProvider {
        pub(crate) fn showing(containers: &[MapContainer]) -> Self {
            Self {
                visible: containers.iter().copied().collect(),
                ..Self::default()
            }
        }

        fn next(&mut self) -> u32 {
            self.next_id += 1;
            self.next_id
        }
    }

    impl MapProvider for RecordingProvider {
        fn container_visible(&self, container: MapContainer) -> bool {
            self.visible.contains(&container)
        }

        fn create_map(&mut self, container: MapContainer, options: &MapOptions) -> MapHandle {
            self.calls.push(Call::CreateMap(container, options.center));
            MapHandle(self.next())
        }

        fn create_marker(&mut self, map: MapHandle, options: &MarkerOptions) -> MarkerHandle {
            self.calls
                .push(Call::CreateMarker(map, options.position, options.draggable));
            let marker = MarkerHandle(self.next());
            self.markers.insert(marker, options.position);
            marker
        }

        fn set_center(&mut self, map: MapHandle, at: LatLng) {
            self.calls.push(Call::Center(map, at));
        }

        fn set_marker_position(&mut self, marker: MarkerHandle, at: LatLng) {
            self.calls.push(Call::MoveMarker(marker, at));
            self.markers.insert(marker, at);
        }

        fn trigger_resize(&mut self, map: MapHandle) {
            self.calls.push(Call::Resize(map));
        }

        fn attach_autocomplete(&mut self, input_id: &str) {
            self.calls.push(Call::Autocomplete(input_id.to_string()));
        }
    }

    fn widget(fields: LocationFields) -> MapWidget<RecordingProvider> {
        MapWidget::new(
            RecordingProvider::showing(&[MapContainer::Dashboard, MapContainer::Modal]),
            MapSettings::default(),
            fields,
        )
    }

    #[test]
    fn test_hidden_container_is_skipped() {
        let mut map = MapWidget::new(
            RecordingProvider::default(),
            MapSettings::default(),
            LocationFields::default(),
        );
        assert!(!map.init(MapContainer::Dashboard));
        assert!(map.provider().calls.is_empty());
        assert!(!map.is_initialized(MapContainer::Dashboard));
    }

    #[test]
    fn test_dashboard_uses_default_center_when_fields_blank() {
        let mut map = widget(LocationFields::default());
        assert!(map.init(MapContainer::Dashboard));
        assert_eq!(
            map.provider().calls,
            vec![
                Call::CreateMap(MapContainer::Dashboard, DEFAULT_CENTER),
                Call::CreateMarker(MapHandle(1), DEFAULT_CENTER, false),
            ]
        );
    }

    #[test]
    fn test_each_axis_falls_back_separately() {
        let fields = LocationFields::new("28.61", "oops");
        assert_eq!(
            fields.position_or(DEFAULT_CENTER),
            LatLng::new(28.61, DEFAULT_CENTER.lng)
        );
        assert!(fields.parsed().is_none());
    }

    #[test]
    fn test_zero_coordinates_use_default_center() {
        let fields = LocationFields::new("0", "0");
        assert_eq!(fields.position_or(DEFAULT_CENTER), DEFAULT_CENTER);

        let fields = LocationFields::new("-0.0", "80.1");
        assert_eq!(
            fields.position_or(DEFAULT_CENTER),
            LatLng::new(DEFAULT_CENTER.lat, 80.1)
        );
    }

    #[test]
    fn test_numeric_prefix_is_accepted() {
        let fields = LocationFields::new("26.9abc", " 75.5 deg");
        assert_eq!(
            fields.position_or(DEFAULT_CENTER),
            LatLng::new(26.9, 75.5)
        );
        assert_eq!(fields.parsed(), Some(LatLng::new(26.9, 75.5)));

        assert_eq!(leading_float("-1.25e2x"), Some(-125.0));
        assert_eq!(leading_float(".5"), Some(0.5));
        assert_eq!(leading_float("7.e"), Some(7.0));
        assert_eq!(leading_float("."), None);
        assert_eq!(leading_float("-"), None);
        assert_eq!(leading_float(""), None);
    }

    #[test]
    fn test_field_edit_to_zero_still_recenters() {
        let mut map = widget(LocationFields::default());
        map.init(MapContainer::Dashboard);
        map.set_fields(LocationFields::new("0", "0"));
        let origin = LatLng::new(0.0, 0.0);
        assert!(map
            .provider()
            .calls
            .contains(&Call::Center(MapHandle(1), origin)));
    }

    #[test]
    fn test_second_dashboard_init_recenters() {
        let mut map = widget(LocationFields::new("28.6139", "77.2090"));
        map.init(MapContainer::Dashboard);
        map.init(MapContainer::Dashboard);
        let at = LatLng::new(28.6139, 77.2090);
        assert_eq!(
            &map.provider().calls[2..],
            &[
                Call::Center(MapHandle(1), at),
                Call::MoveMarker(MarkerHandle(2), at)
            ]
        );
    }

    #[test]
    fn test_modal_init_attaches_autocomplete_once() {
        let mut map = widget(LocationFields::default());
        map.init(MapContainer::Modal);
        map.init(MapContainer::Modal);

        let autocompletes = map
            .provider()
            .calls
            .iter()
            .filter(|c| matches!(c, Call::Autocomplete(_)))
            .count();
        assert_eq!(autocompletes, 1);
        assert!(map.provider().calls.contains(&Call::Resize(MapHandle(1))));
        assert!(map
            .provider()
            .calls
            .contains(&Call::CreateMarker(MapHandle(1), DEFAULT_CENTER, true)));
    }

    #[test]
    fn test_map_click_syncs_fields_and_both_markers() {
        let mut map = widget(LocationFields::default());
        map.init(MapContainer::Dashboard);
        map.init(MapContainer::Modal);

        let at = LatLng::new(12.97, 77.59);
        map.map_clicked(at);

        assert_eq!(map.fields().parsed(), Some(at));
        // dashboard marker is #2, modal marker is #4
        assert_eq!(map.provider().markers[&MarkerHandle(2)], at);
        assert_eq!(map.provider().markers[&MarkerHandle(4)], at);
    }

    #[test]
    fn test_place_without_geometry_is_ignored() {
        let mut map = widget(LocationFields::new("1", "2"));
        map.init(MapContainer::Modal);
        let calls = map.provider().calls.len();
        map.place_selected(None);
        assert_eq!(map.provider().calls.len(), calls);
        assert_eq!(map.fields(), &LocationFields::new("1", "2"));
    }

    #[test]
    fn test_place_selected_recenters_modal_map() {
        let mut map = widget(LocationFields::default());
        map.init(MapContainer::Modal);
        let at = LatLng::new(19.07, 72.87);
        map.place_selected(Some(at));
        assert!(map.provider().calls.contains(&Call::Center(MapHandle(1), at)));
        assert_eq!(map.fields().parsed(), Some(at));
    }

    #[test]
    fn test_marker_drag_moves_dashboard_marker() {
        let mut map = widget(LocationFields::default());
        map.init(MapContainer::Dashboard);
        let at = LatLng::new(22.57, 88.36);
        map.marker_dragged(at);
        assert_eq!(map.provider().markers[&MarkerHandle(2)], at);
        assert_eq!(map.fields().latitude, "22.57");
    }

    #[test]
    fn test_field_edit_recenters_dashboard_only_when_valid() {
        let mut map = widget(LocationFields::default());
        map.init(MapContainer::Dashboard);
        let calls = map.provider().calls.len();

        map.set_fields(LocationFields::new("abc", "77.0"));
        assert_eq!(map.provider().calls.len(), calls);

        map.set_fields(LocationFields::new("13.0", "77.0"));
        let at = LatLng::new(13.0, 77.0);
        assert!(map.provider().calls.contains(&Call::Center(MapHandle(1), at)));
    }
}
