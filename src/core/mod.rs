pub mod carousel;
pub mod driver;
pub mod features;
pub mod map;
pub mod modal;
pub mod nav;
pub mod page;
pub mod station;

pub use crate::domain::model::{CardBox, CardState, FormFields, LatLng, Layout, StationUpdate};
pub use crate::domain::ports::{CarouselView, MapProvider, PageShell, StationApi};
pub use crate::utils::error::Result;
