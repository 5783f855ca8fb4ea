pub mod site_config;

#[cfg(feature = "cli")]
use crate::domain::model::FormFields;
#[cfg(feature = "cli")]
use clap::{Args, Parser, Subcommand};
#[cfg(feature = "cli")]
use std::path::PathBuf;

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "station-web")]
#[command(about = "Headless controllers for the EV charging station site")]
pub struct CliConfig {
    #[arg(long, global = true, help = "TOML site configuration")]
    pub config: Option<PathBuf>,

    #[arg(long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, global = true, help = "Emit logs as JSON lines")]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Submit the station edit form to the backend
    UpdateStation(UpdateStationArgs),
    /// Run the testimonial carousel against a logging view
    Carousel(CarouselArgs),
}

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Args)]
pub struct UpdateStationArgs {
    /// Overrides backend.base_url from the config file
    #[arg(long)]
    pub base_url: Option<String>,
    #[arg(long)]
    pub station_name: String,
    #[arg(long)]
    pub operator_name: String,
    #[arg(long)]
    pub charging_type: String,
    #[arg(long)]
    pub location: String,
    #[arg(long)]
    pub total_slots: String,
    #[arg(long)]
    pub available_slots: String,
    #[arg(long)]
    pub charging_rate: String,
}

#[cfg(feature = "cli")]
impl UpdateStationArgs {
    /// The flags as the edit form's inputs.
    pub fn form_fields(&self) -> FormFields {
        [
            ("stationName", &self.station_name),
            ("operatorName", &self.operator_name),
            ("chargingType", &self.charging_type),
            ("location", &self.location),
            ("totalSlots", &self.total_slots),
            ("availableSlots", &self.available_slots),
            ("chargingRate", &self.charging_rate),
        ]
        .into_iter()
        .map(|(id, value)| (id.to_string(), value.clone()))
        .collect()
    }
}

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Args)]
pub struct CarouselArgs {
    #[arg(long, default_value = "5")]
    pub cards: usize,

    #[arg(long, default_value = "1280")]
    pub width: f64,

    #[arg(long, default_value = "360")]
    pub card_width: f64,

    #[arg(long, default_value = "12")]
    pub card_margin: f64,

    /// How long to let the carousel run
    #[arg(long, default_value = "13")]
    pub seconds: u64,
}

#[cfg(all(test, feature = "cli"))]
mod tests {
    use super::*;
    use crate::domain::model::StationUpdate;

    #[test]
    fn test_parse_update_station_command() {
        let config = CliConfig::parse_from([
            "station-web",
            "--verbose",
            "update-station",
            "--station-name",
            "Central Hub",
            "--operator-name",
            "Asha",
            "--charging-type",
            "DC Fast",
            "--location",
            "Jaipur",
            "--total-slots",
            "8",
            "--available-slots",
            "3",
            "--charging-rate",
            "18",
        ]);

        assert!(config.verbose);
        let Command::UpdateStation(args) = config.command else {
            panic!("expected update-station");
        };
        let update = StationUpdate::from_form(&args.form_fields()).unwrap();
        assert_eq!(update.station_name, "Central Hub");
        assert_eq!(update.available_slots, "3");
    }

    #[test]
    fn test_carousel_defaults() {
        let config = CliConfig::parse_from(["station-web", "carousel"]);
        let Command::Carousel(args) = config.command else {
            panic!("expected carousel");
        };
        assert_eq!(args.cards, 5);
        assert_eq!(args.width, 1280.0);
        assert_eq!(args.seconds, 13);
    }
}
