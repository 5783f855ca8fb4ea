pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use self::config::CliConfig;

pub use self::adapters::http::HttpStationApi;
pub use self::config::site_config::SiteConfig;
pub use self::core::carousel::{Carousel, CarouselSettings};
pub use self::core::driver::{CarouselDriver, CarouselEvent};
pub use self::core::map::MapWidget;
pub use self::core::page::PageContext;
pub use self::utils::error::{Result, SiteError};
