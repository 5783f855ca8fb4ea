//! Staggered reveal of the driver page's feature cards, the first time the
//! features section scrolls into view.

use tokio::time::{Duration, Instant};

pub const REVEAL_STAGGER: Duration = Duration::from_millis(200);
/// Share of the section that must be on screen before cards start to reveal.
pub const VISIBILITY_THRESHOLD: f64 = 0.3;
pub const REVEAL_CLASS: &str = "animate-in";

#[derive(Debug, Clone)]
pub struct FeatureReveal {
    stagger: Duration,
    threshold: f64,
    due: Vec<Option<Instant>>,
    revealed: Vec<bool>,
    observing: bool,
}

impl FeatureReveal {
    /// `None` when the page has no feature cards to animate.
    pub fn new(card_count: usize) -> Option<Self> {
        Self::with_timing(card_count, REVEAL_STAGGER, VISIBILITY_THRESHOLD)
    }

    pub fn with_timing(card_count: usize, stagger: Duration, threshold: f64) -> Option<Self> {
        if card_count == 0 {
            tracing::debug!("No feature cards found, reveal disabled");
            return None;
        }
        Some(Self {
            stagger,
            threshold,
            due: vec![None; card_count],
            revealed: vec![false; card_count],
            observing: true,
        })
    }

    pub fn card_count(&self) -> usize {
        self.revealed.len()
    }

    pub fn is_observing(&self) -> bool {
        self.observing
    }

    pub fn is_revealed(&self, index: usize) -> bool {
        self.revealed.get(index).copied().unwrap_or(false)
    }

    /// The visible share of the section changed.
    pub fn intersection_changed(&mut self, ratio: f64, now: Instant) -> Vec<Instant> {
        if ratio < self.threshold {
            return Vec::new();
        }
        self.section_visible(now)
    }

    /// Schedule every card, `stagger` apart starting at `now`, and stop
    /// observing. Later calls schedule nothing.
    pub fn section_visible(&mut self, now: Instant) -> Vec<Instant> {
        if !self.observing {
            return Vec::new();
        }
        self.observing = false;

        let deadlines: Vec<Instant> = (0..self.card_count())
            .map(|i| now + self.stagger * i as u32)
            .collect();
        for (slot, at) in self.due.iter_mut().zip(&deadlines) {
            *slot = Some(*at);
        }
        tracing::debug!("Revealing {} feature cards", deadlines.len());
        deadlines
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.due.iter().flatten().min().copied()
    }

    /// Reveal every card due at or before `now`. Returns the newly revealed
    /// indices in order.
    pub fn poll(&mut self, now: Instant) -> Vec<usize> {
        let mut shown = Vec::new();
        for (index, slot) in self.due.iter_mut().enumerate() {
            if slot.is_some_and(|at| at <= now) {
                *slot = None;
                self.revealed[index] = true;
                shown.push(index);
            }
        }
        shown
    }
}
