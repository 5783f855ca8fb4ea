use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Classification of one card relative to the current slide.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardState {
    Active,
    Prev,
    Next,
    Idle,
}

impl CardState {
    /// CSS class the page uses for this state, if any.
    pub fn css_class(self) -> Option<&'static str> {
        match self {
            CardState::Active => Some("is-active"),
            CardState::Prev => Some("is-prev"),
            CardState::Next => Some("is-next"),
            CardState::Idle => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    Mobile,
    Tablet,
    Desktop,
}

/// Measured geometry of a single card, in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CardBox {
    /// Bounding-box left edge relative to the viewport.
    pub left: f64,
    pub width: f64,
    pub margin_left: f64,
    pub margin_right: f64,
    /// Layout position inside the track, unaffected by the track transform.
    pub offset_left: f64,
}

impl CardBox {
    pub fn outer_width(&self) -> f64 {
        self.width + self.margin_left + self.margin_right
    }

    pub fn center(&self) -> f64 {
        self.left + self.width / 2.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

impl fmt::Display for LatLng {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}", self.lat, self.lng)
    }
}

/// Values of the form inputs on the page, keyed by element id.
pub type FormFields = HashMap<String, String>;

/// Body of `POST /update_station`. Values are sent exactly as typed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StationUpdate {
    pub station_name: String,
    pub operator_name: String,
    pub charging_type: String,
    pub location: String,
    pub total_slots: String,
    pub available_slots: String,
    pub charging_rate: String,
}

impl StationUpdate {
    pub const FIELD_IDS: [&'static str; 7] = [
        "stationName",
        "operatorName",
        "chargingType",
        "location",
        "totalSlots",
        "availableSlots",
        "chargingRate",
    ];
}

/// Raw reply of the update endpoint; one of the two fields is expected.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateResponse {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateOutcome {
    Saved(String),
    Rejected(String),
}

impl UpdateOutcome {
    /// Text shown to the operator.
    pub fn alert_text(&self) -> &str {
        match self {
            UpdateOutcome::Saved(message) => message,
            UpdateOutcome::Rejected(error) => error,
        }
    }

    pub fn is_saved(&self) -> bool {
        matches!(self, UpdateOutcome::Saved(_))
    }
}
