use crate::core::carousel::CarouselSettings;
use crate::core::map::MapSettings;
use crate::domain::model::LatLng;
use crate::utils::error::{Result, SiteError};
use crate::utils::validation::{
    validate_latitude, validate_longitude, validate_positive_number, validate_url, Validate,
};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "http://localhost:5000";
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 10;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SiteConfig {
    #[serde(default)]
    pub backend: BackendConfig,
    #[serde(default)]
    pub carousel: CarouselConfig,
    #[serde(default)]
    pub map: MapConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BackendConfig {
    pub base_url: Option<String>,
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CarouselConfig {
    pub auto_rotate_ms: Option<u64>,
    pub settle_ms: Option<u64>,
    pub mobile_max_width: Option<f64>,
    pub tablet_max_width: Option<f64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MapConfig {
    pub default_lat: Option<f64>,
    pub default_lng: Option<f64>,
    pub zoom: Option<u8>,
    pub modal_init_delay_ms: Option<u64>,
}

impl SiteConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(SiteError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| SiteError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Expands `${VAR}`; unset variables are left as written.
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| SiteError::ConfigValidationError {
            field: "env_substitution".to_string(),
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn validate_config(&self) -> Result<()> {
        validate_url("backend.base_url", self.base_url())?;
        validate_positive_number("backend.timeout_seconds", self.timeout().as_secs(), 1)?;

        let carousel = self.carousel_settings();
        validate_positive_number(
            "carousel.auto_rotate_ms",
            carousel.auto_rotate_interval.as_millis() as u64,
            1,
        )?;
        validate_positive_number(
            "carousel.settle_ms",
            carousel.settle_delay.as_millis() as u64,
            1,
        )?;
        if carousel.tablet_max_width <= carousel.mobile_max_width {
            return Err(SiteError::InvalidConfigValueError {
                field: "carousel.tablet_max_width".to_string(),
                value: carousel.tablet_max_width.to_string(),
                reason: format!(
                    "Must be greater than carousel.mobile_max_width ({})",
                    carousel.mobile_max_width
                ),
            });
        }

        let map = self.map_settings();
        validate_latitude("map.default_lat", map.default_center.lat)?;
        validate_longitude("map.default_lng", map.default_center.lng)?;

        Ok(())
    }

    pub fn base_url(&self) -> &str {
        self.backend.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(
            self.backend
                .timeout_seconds
                .unwrap_or(DEFAULT_TIMEOUT_SECONDS),
        )
    }

    pub fn carousel_settings(&self) -> CarouselSettings {
        let defaults = CarouselSettings::default();
        let c = &self.carousel;
        CarouselSettings {
            auto_rotate_interval: c
                .auto_rotate_ms
                .map(Duration::from_millis)
                .unwrap_or(defaults.auto_rotate_interval),
            settle_delay: c
                .settle_ms
                .map(Duration::from_millis)
                .unwrap_or(defaults.settle_delay),
            mobile_max_width: c.mobile_max_width.unwrap_or(defaults.mobile_max_width),
            tablet_max_width: c.tablet_max_width.unwrap_or(defaults.tablet_max_width),
        }
    }

    pub fn map_settings(&self) -> MapSettings {
        let defaults = MapSettings::default();
        MapSettings {
            default_center: LatLng::new(
                self.map.default_lat.unwrap_or(defaults.default_center.lat),
                self.map.default_lng.unwrap_or(defaults.default_center.lng),
            ),
            zoom: self.map.zoom.unwrap_or(defaults.zoom),
        }
    }

    pub fn modal_init_delay(&self) -> Duration {
        self.map
            .modal_init_delay_ms
            .map(Duration::from_millis)
            .unwrap_or(crate::core::modal::MODAL_MAP_INIT_DELAY)
    }
}

impl Validate for SiteConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = SiteConfig::from_toml_str("").unwrap();
        assert_eq!(config.base_url(), DEFAULT_BASE_URL);
        assert_eq!(config.carousel_settings(), CarouselSettings::default());
        assert_eq!(config.map_settings(), MapSettings::default());
        assert_eq!(config.modal_init_delay(), Duration::from_millis(300));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_full_config() {
        let toml_content = r#"
[backend]
base_url = "https://stations.example.com"
timeout_seconds = 3

[carousel]
auto_rotate_ms = 6000
settle_ms = 500
mobile_max_width = 600
tablet_max_width = 900

[map]
default_lat = 28.6139
default_lng = 77.2090
zoom = 14
modal_init_delay_ms = 150
"#;

        let config = SiteConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(config.base_url(), "https://stations.example.com");
        assert_eq!(config.timeout(), Duration::from_secs(3));
        let carousel = config.carousel_settings();
        assert_eq!(carousel.auto_rotate_interval, Duration::from_millis(6000));
        assert_eq!(carousel.settle_delay, Duration::from_millis(500));
        assert_eq!(carousel.mobile_max_width, 600.0);
        assert_eq!(config.map_settings().zoom, 14);
        assert_eq!(config.modal_init_delay(), Duration::from_millis(150));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("STATION_WEB_TEST_BACKEND", "https://backend.test");

        let toml_content = r#"
[backend]
base_url = "${STATION_WEB_TEST_BACKEND}"
"#;

        let config = SiteConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.base_url(), "https://backend.test");

        std::env::remove_var("STATION_WEB_TEST_BACKEND");
    }

    #[test]
    fn test_config_validation() {
        let bad_url = SiteConfig::from_toml_str("[backend]\nbase_url = \"invalid-url\"\n").unwrap();
        assert!(bad_url.validate().is_err());

        let bad_widths = SiteConfig::from_toml_str(
            "[carousel]\nmobile_max_width = 1000\ntablet_max_width = 800\n",
        )
        .unwrap();
        assert!(bad_widths.validate().is_err());

        let bad_lat = SiteConfig::from_toml_str("[map]\ndefault_lat = 120.0\n").unwrap();
        assert!(bad_lat.validate().is_err());

        let zero_settle = SiteConfig::from_toml_str("[carousel]\nsettle_ms = 0\n").unwrap();
        assert!(zero_settle.validate().is_err());
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        match SiteConfig::from_toml_str("[backend\nbase_url = 1") {
            Err(SiteError::ConfigValidationError { field, .. }) => {
                assert_eq!(field, "toml_parsing")
            }
            other => panic!("expected parse error, got {:?}", other),
        }
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[backend]\nbase_url = \"http://127.0.0.1:8080\"\n")
            .unwrap();

        let config = SiteConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.base_url(), "http://127.0.0.1:8080");
    }
}
