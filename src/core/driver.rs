use crate::core::carousel::Carousel;
use crate::domain::ports::CarouselView;
use tokio::sync::mpsc;
use tokio::time::{sleep_until, Instant};

/// User input forwarded from the page to the carousel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CarouselEvent {
    DotClicked(usize),
    PointerEnter,
    PointerLeave,
    Resized,
    Next,
    Prev,
}

/// Single-task event loop: page events in, timer deadlines out.
pub struct CarouselDriver<V: CarouselView> {
    carousel: Carousel<V>,
    events: mpsc::Receiver<CarouselEvent>,
}

impl<V: CarouselView> CarouselDriver<V> {
    pub fn new(carousel: Carousel<V>, events: mpsc::Receiver<CarouselEvent>) -> Self {
        Self { carousel, events }
    }

    /// Runs until every sender is dropped, then hands the carousel back.
    pub async fn run(mut self) -> Carousel<V> {
        loop {
            let deadline = self.carousel.next_deadline();
            tokio::select! {
                event = self.events.recv() => match event {
                    Some(event) => {
                        tracing::trace!("Carousel event: {:?}", event);
                        self.carousel.handle(event, Instant::now());
                    }
                    None => break,
                },
                _ = wait_for(deadline) => self.carousel.poll(Instant::now()),
            }
        }

        tracing::debug!(
            "Carousel driver stopped at slide {}",
            self.carousel.current_index()
        );
        self.carousel
    }
}

async fn wait_for(deadline: Option<Instant>) {
    match deadline {
        Some(at) => sleep_until(at).await,
        None => std::future::pending::<()>().await,
    }
}
