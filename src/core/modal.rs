use crate::domain::ports::MapContainer;
use std::collections::BTreeSet;
use std::time::Duration;

/// Wait for the station modal to become visible before drawing its map.
pub const MODAL_MAP_INIT_DELAY: Duration = Duration::from_millis(300);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModalKind {
    StationUpdate,
    AddVehicle,
}

impl ModalKind {
    pub fn element_id(self) -> &'static str {
        match self {
            ModalKind::StationUpdate => "Modal",
            ModalKind::AddVehicle => "vehicleModal",
        }
    }
}

/// Follow-up work the host must schedule after opening a modal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalEffect {
    None,
    InitMapAfter(MapContainer, Duration),
}

#[derive(Debug, Clone)]
pub struct ModalSet {
    station_open: bool,
    vehicle_open: bool,
    invalid_fields: BTreeSet<String>,
    map_init_delay: Duration,
}

impl Default for ModalSet {
    fn default() -> Self {
        Self::new(MODAL_MAP_INIT_DELAY)
    }
}

impl ModalSet {
    pub fn new(map_init_delay: Duration) -> Self {
        Self {
            station_open: false,
            vehicle_open: false,
            invalid_fields: BTreeSet::new(),
            map_init_delay,
        }
    }

    pub fn is_open(&self, kind: ModalKind) -> bool {
        match kind {
            ModalKind::StationUpdate => self.station_open,
            ModalKind::AddVehicle => self.vehicle_open,
        }
    }

    pub fn open(&mut self, kind: ModalKind) -> ModalEffect {
        self.set_open(kind, true);
        match kind {
            ModalKind::StationUpdate => {
                ModalEffect::InitMapAfter(MapContainer::Modal, self.map_init_delay)
            }
            ModalKind::AddVehicle => {
                // Stale validation from the previous attempt.
                self.invalid_fields.clear();
                ModalEffect::None
            }
        }
    }

    pub fn close(&mut self, kind: ModalKind) {
        self.set_open(kind, false);
    }

    /// Click landed on the modal's backdrop rather than its content.
    pub fn backdrop_click(&mut self, kind: ModalKind) -> bool {
        let was_open = self.is_open(kind);
        self.close(kind);
        was_open
    }

    pub fn mark_invalid(&mut self, field: impl Into<String>) {
        self.invalid_fields.insert(field.into());
    }

    pub fn invalid_fields(&self) -> impl Iterator<Item = &str> {
        self.invalid_fields.iter().map(String::as_str)
    }

    fn set_open(&mut self, kind: ModalKind, open: bool) {
        match kind {
            ModalKind::StationUpdate => self.station_open = open,
            ModalKind::AddVehicle => self.vehicle_open = open,
        }
        tracing::debug!(
            "Modal #{} {}",
            kind.element_id(),
            if open { "opened" } else { "closed" }
        );
    }
}
