//! Testimonial carousel: slide index, transition guard and auto-rotation.
//!
//! Time is passed in explicitly. The controller only records deadlines;
//! [`crate::core::driver::CarouselDriver`] sleeps until [`Carousel::next_deadline`]
//! and calls [`Carousel::poll`].

use crate::core::driver::CarouselEvent;
use crate::domain::model::{CardState, Layout};
use crate::domain::ports::CarouselView;
use tokio::time::{Duration, Instant};

pub const AUTO_ROTATE_INTERVAL: Duration = Duration::from_millis(4000);
pub const TRANSITION_SETTLE: Duration = Duration::from_millis(800);
pub const MOBILE_MAX_WIDTH: f64 = 768.0;
pub const TABLET_MAX_WIDTH: f64 = 1024.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CarouselSettings {
    pub auto_rotate_interval: Duration,
    /// Must match the CSS transition duration of the track.
    pub settle_delay: Duration,
    pub mobile_max_width: f64,
    pub tablet_max_width: f64,
}

impl Default for CarouselSettings {
    fn default() -> Self {
        Self {
            auto_rotate_interval: AUTO_ROTATE_INTERVAL,
            settle_delay: TRANSITION_SETTLE,
            mobile_max_width: MOBILE_MAX_WIDTH,
            tablet_max_width: TABLET_MAX_WIDTH,
        }
    }
}

impl CarouselSettings {
    pub fn layout_for(&self, viewport_width: f64) -> Layout {
        if viewport_width <= self.mobile_max_width {
            Layout::Mobile
        } else if viewport_width <= self.tablet_max_width {
            Layout::Tablet
        } else {
            Layout::Desktop
        }
    }
}

/// Classify every card relative to `current`.
///
/// With `peek` off only the active card is marked. When two neighbours
/// collapse onto the same card (two slides) it is marked as `Next`.
pub fn classify_cards(count: usize, current: usize, peek: bool) -> Vec<CardState> {
    let mut states = vec![CardState::Idle; count];
    if count == 0 || current >= count {
        return states;
    }
    if peek && count > 1 {
        states[(current + count - 1) % count] = CardState::Prev;
        states[(current + 1) % count] = CardState::Next;
    }
    states[current] = CardState::Active;
    states
}

#[derive(Debug)]
pub struct Carousel<V: CarouselView> {
    view: V,
    settings: CarouselSettings,
    slide_count: usize,
    current_index: usize,
    transitioning: bool,
    settle_due: Option<Instant>,
    auto_rotate_due: Option<Instant>,
    offset: f64,
}

impl<V: CarouselView> Carousel<V> {
    /// Set up the carousel over `view`. Returns `None` when there are no cards,
    /// in which case no timers or listeners exist.
    pub fn mount(view: V, mut settings: CarouselSettings, now: Instant) -> Option<Self> {
        let slide_count = view.card_count();
        if slide_count == 0 {
            tracing::debug!("No testimonial cards found, carousel disabled");
            return None;
        }
        if settings.auto_rotate_interval.is_zero() {
            tracing::warn!(
                "Auto-rotate interval must be positive, using {:?}",
                AUTO_ROTATE_INTERVAL
            );
            settings.auto_rotate_interval = AUTO_ROTATE_INTERVAL;
        }

        let mut carousel = Self {
            view,
            settings,
            slide_count,
            current_index: 0,
            transitioning: false,
            settle_due: None,
            auto_rotate_due: None,
            offset: 0.0,
        };

        carousel.view.render_dots(slide_count, 0);
        carousel.apply_card_states();
        carousel.go_to_slide(0, now);
        carousel.start_auto_rotate(now);

        tracing::debug!("Carousel mounted with {} slides", slide_count);
        Some(carousel)
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn slide_count(&self) -> usize {
        self.slide_count
    }

    pub fn is_transitioning(&self) -> bool {
        self.transitioning
    }

    pub fn is_auto_rotating(&self) -> bool {
        self.auto_rotate_due.is_some()
    }

    /// Track offset last applied, in pixels.
    pub fn offset(&self) -> f64 {
        self.offset
    }

    pub fn settings(&self) -> &CarouselSettings {
        &self.settings
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    pub fn into_view(self) -> V {
        self.view
    }

    pub fn card_states(&self) -> Vec<CardState> {
        classify_cards(self.slide_count, self.current_index, self.peeking())
    }

    fn peeking(&self) -> bool {
        self.settings.layout_for(self.view.viewport_width()) != Layout::Mobile
    }

    fn apply_card_states(&mut self) {
        let states = self.card_states();
        self.view.apply_card_states(&states);
    }

    /// Move to `index`. Dropped (returns `false`) while a transition is in
    /// flight or when `index` is out of range.
    pub fn go_to_slide(&mut self, index: usize, now: Instant) -> bool {
        if self.transitioning {
            tracing::trace!("Transition in progress, ignoring slide {}", index);
            return false;
        }
        if index >= self.slide_count {
            tracing::warn!(
                "Slide index {} out of range (slide count {})",
                index,
                self.slide_count
            );
            return false;
        }

        self.transitioning = true;
        self.current_index = index;
        self.apply_card_states();
        self.view.set_active_dot(index);

        self.offset = self.compute_offset(index);
        self.view.set_track_offset(self.offset);

        self.settle_due = Some(now + self.settings.settle_delay);
        tracing::debug!("Slide {} active, offset {:.1}px", index, self.offset);
        true
    }

    fn compute_offset(&self, index: usize) -> f64 {
        let card_width = self.view.card_box(0).outer_width();
        let viewport_width = self.view.viewport_width();

        match self.settings.layout_for(viewport_width) {
            Layout::Mobile => -(index as f64) * card_width,
            Layout::Tablet => {
                // Measured box already includes the current offset.
                let active = self.view.card_box(index);
                self.offset + (viewport_width / 2.0 - active.center())
            }
            Layout::Desktop => {
                let card = self.view.card_box(index);
                let track_offset = self.view.track_width() / 2.0 - card_width / 2.0;
                -(card.offset_left - track_offset)
            }
        }
    }

    pub fn next_slide(&mut self, now: Instant) -> bool {
        self.go_to_slide((self.current_index + 1) % self.slide_count, now)
    }

    pub fn prev_slide(&mut self, now: Instant) -> bool {
        self.go_to_slide(
            (self.current_index + self.slide_count - 1) % self.slide_count,
            now,
        )
    }

    /// Replace any pending auto-rotate tick with a fresh one.
    pub fn start_auto_rotate(&mut self, now: Instant) {
        self.auto_rotate_due = Some(now + self.settings.auto_rotate_interval);
    }

    pub fn stop_auto_rotate(&mut self) {
        self.auto_rotate_due = None;
    }

    pub fn dot_clicked(&mut self, index: usize, now: Instant) -> bool {
        if self.transitioning {
            return false;
        }
        let moved = self.go_to_slide(index, now);
        if moved {
            self.start_auto_rotate(now);
        }
        moved
    }

    pub fn pointer_enter(&mut self) {
        self.stop_auto_rotate();
    }

    pub fn pointer_leave(&mut self, now: Instant) {
        self.start_auto_rotate(now);
    }

    /// Viewport changed size: rebuild dots and card classes, then realign.
    pub fn resized(&mut self, now: Instant) {
        self.view.render_dots(self.slide_count, self.current_index);
        self.apply_card_states();
        self.go_to_slide(self.current_index, now);
    }

    pub fn handle(&mut self, event: CarouselEvent, now: Instant) {
        match event {
            CarouselEvent::DotClicked(index) => {
                self.dot_clicked(index, now);
            }
            CarouselEvent::PointerEnter => self.pointer_enter(),
            CarouselEvent::PointerLeave => self.pointer_leave(now),
            CarouselEvent::Resized => self.resized(now),
            CarouselEvent::Next => {
                self.next_slide(now);
            }
            CarouselEvent::Prev => {
                self.prev_slide(now);
            }
        }
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        match (self.settle_due, self.auto_rotate_due) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    /// Fire every timer due at or before `now`, earliest first. At most one
    /// auto-rotate tick fires per call.
    pub fn poll(&mut self, now: Instant) {
        let mut ticked = false;
        loop {
            let settle = self.settle_due.filter(|due| *due <= now);
            let tick = self.auto_rotate_due.filter(|due| !ticked && *due <= now);
            match (settle, tick) {
                (None, None) => break,
                (Some(settle_at), Some(tick_at)) if tick_at < settle_at => {
                    self.fire_auto_rotate(tick_at, now);
                    ticked = true;
                }
                (Some(_), _) => self.finish_transition(),
                (None, Some(tick_at)) => {
                    self.fire_auto_rotate(tick_at, now);
                    ticked = true;
                }
            }
        }
    }

    fn finish_transition(&mut self) {
        self.settle_due = None;
        self.transitioning = false;
    }

    fn fire_auto_rotate(&mut self, due: Instant, now: Instant) {
        let mut next_due = due + self.settings.auto_rotate_interval;
        if next_due <= now {
            next_due = now + self.settings.auto_rotate_interval;
        }
        self.auto_rotate_due = Some(next_due);
        self.next_slide(due);
    }
}
