//! Everything one page load owns. Built at load, dropped at unload.

use crate::core::carousel::{Carousel, CarouselSettings};
use crate::core::driver::{CarouselDriver, CarouselEvent};
use crate::core::features::FeatureReveal;
use crate::core::map::MapWidget;
use crate::core::modal::{ModalEffect, ModalKind, ModalSet};
use crate::core::nav::NavBar;
use crate::domain::model::{FormFields, StationUpdate, UpdateOutcome};
use crate::domain::ports::{CarouselView, MapContainer, MapProvider, PageShell, StationApi};
use crate::utils::error::Result;
use tokio::sync::mpsc;
use tokio::time::Instant;

const CAROUSEL_EVENT_BUFFER: usize = 32;

pub struct PageContext<P: MapProvider, S: PageShell, A: StationApi> {
    pub nav: NavBar,
    pub modals: ModalSet,
    map: Option<MapWidget<P>>,
    features: Option<FeatureReveal>,
    carousel: Option<mpsc::Sender<CarouselEvent>>,
    shell: S,
    api: A,
}

impl<P: MapProvider, S: PageShell, A: StationApi> PageContext<P, S, A> {
    pub fn new(nav: NavBar, modals: ModalSet, shell: S, api: A) -> Self {
        Self {
            nav,
            modals,
            map: None,
            features: None,
            carousel: None,
            shell,
            api,
        }
    }

    /// Pages with a station location get a map widget.
    pub fn with_map(mut self, map: MapWidget<P>) -> Self {
        self.map = Some(map);
        self
    }

    pub fn map(&self) -> Option<&MapWidget<P>> {
        self.map.as_ref()
    }

    pub fn map_mut(&mut self) -> Option<&mut MapWidget<P>> {
        self.map.as_mut()
    }

    /// Driver pages animate their feature cards in.
    pub fn with_features(mut self, features: FeatureReveal) -> Self {
        self.features = Some(features);
        self
    }

    pub fn features(&self) -> Option<&FeatureReveal> {
        self.features.as_ref()
    }

    /// Visible share of the features section changed. Returns the reveal
    /// deadlines the host should poll at; empty after the first reveal.
    pub fn features_intersected(&mut self, ratio: f64, now: Instant) -> Vec<Instant> {
        match self.features.as_mut() {
            Some(features) => features.intersection_changed(ratio, now),
            None => Vec::new(),
        }
    }

    pub fn shell(&self) -> &S {
        &self.shell
    }

    /// Document loaded at `path`.
    pub fn load(&mut self, path: &str) {
        self.nav.highlight_for_path(path);
        if let Some(map) = self.map.as_mut() {
            map.init(MapContainer::Dashboard);
        }
    }

    /// Mount the carousel and spawn its driver. Must run inside a tokio
    /// runtime. Returns `false` when the page has no cards.
    pub fn attach_carousel<V>(&mut self, view: V, settings: CarouselSettings) -> bool
    where
        V: CarouselView + Send + 'static,
    {
        let Some(carousel) = Carousel::mount(view, settings, Instant::now()) else {
            return false;
        };
        let (tx, rx) = mpsc::channel(CAROUSEL_EVENT_BUFFER);
        tokio::spawn(async move {
            CarouselDriver::new(carousel, rx).run().await;
        });
        self.carousel = Some(tx);
        true
    }

    pub fn has_carousel(&self) -> bool {
        self.carousel.is_some()
    }

    pub async fn carousel_event(&self, event: CarouselEvent) {
        let Some(tx) = &self.carousel else {
            return;
        };
        if tx.send(event).await.is_err() {
            tracing::warn!("Carousel driver is gone, dropping {:?}", event);
        }
    }

    /// Open a modal. The host schedules the returned effect and, for
    /// `InitMapAfter`, calls [`Self::modal_map_due`] once the delay is over.
    /// Other handlers keep running in the meantime.
    pub fn open_modal(&mut self, kind: ModalKind) -> ModalEffect {
        self.modals.open(kind)
    }

    /// Deferred half of [`Self::open_modal`]. Returns whether a map was drawn.
    pub fn modal_map_due(&mut self, container: MapContainer) -> bool {
        self.map
            .as_mut()
            .is_some_and(|map| map.init(container))
    }

    pub fn close_modal(&mut self, kind: ModalKind) {
        self.modals.close(kind);
    }

    pub fn backdrop_click(&mut self, kind: ModalKind) {
        self.modals.backdrop_click(kind);
    }

    /// Submit the station edit form. A reply is always alerted; a successful
    /// one also closes the modal and reloads the page. Transport failures are
    /// logged and yield `Ok(None)`.
    pub async fn save_station(&mut self, form: &FormFields) -> Result<Option<UpdateOutcome>> {
        let update = StationUpdate::from_form(form)?;
        tracing::debug!("Sending update request: {:?}", update);

        match self.api.update_station(&update).await {
            Ok(outcome) => {
                self.shell.alert(outcome.alert_text());
                if outcome.is_saved() {
                    self.modals.close(ModalKind::StationUpdate);
                    self.shell.reload();
                }
                Ok(Some(outcome))
            }
            Err(e) => {
                tracing::error!("Update Error: {}", e);
                Ok(None)
            }
        }
    }
}
