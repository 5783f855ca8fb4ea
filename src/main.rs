use anyhow::Context;
use clap::Parser;
use station_web::adapters::terminal::{HeadlessMap, LoggingView, TerminalShell};
use station_web::config::{CarouselArgs, Command, UpdateStationArgs};
use station_web::core::modal::ModalSet;
use station_web::core::nav::NavBar;
use station_web::domain::model::UpdateOutcome;
use station_web::utils::{logger, validation::Validate};
use station_web::{
    Carousel, CarouselDriver, CliConfig, HttpStationApi, PageContext, SiteConfig, SiteError,
};
use std::time::Duration;
use tokio::sync::mpsc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    if cli.json_logs {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_cli_logger(cli.verbose);
    }
    tracing::debug!("CLI config: {:?}", cli);

    let site = match &cli.config {
        Some(path) => SiteConfig::from_file(path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => SiteConfig::default(),
    };

    if let Err(e) = site.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    let result = match cli.command {
        Command::UpdateStation(args) => update_station(&site, args).await,
        Command::Carousel(args) => run_carousel(&site, args).await,
    };

    if let Err(e) = result {
        tracing::error!("❌ {} (Severity: {:?})", e, e.severity());
        eprintln!("❌ {}", e.user_friendly_message());

        let exit_code = e.severity().exit_code();
        if exit_code > 0 {
            std::process::exit(exit_code);
        }
    }

    Ok(())
}

async fn update_station(site: &SiteConfig, args: UpdateStationArgs) -> Result<(), SiteError> {
    let base_url = args.base_url.as_deref().unwrap_or(site.base_url());
    let api = HttpStationApi::new(base_url, site.timeout())?;
    tracing::info!("Submitting station update to {}", api.endpoint());

    let mut page: PageContext<HeadlessMap, TerminalShell, HttpStationApi> = PageContext::new(
        NavBar::default(),
        ModalSet::new(site.modal_init_delay()),
        TerminalShell::default(),
        api,
    );

    match page.save_station(&args.form_fields()).await? {
        Some(UpdateOutcome::Saved(_)) => tracing::info!("✅ Station updated"),
        Some(UpdateOutcome::Rejected(reason)) => {
            return Err(SiteError::UpdateRejected { reason });
        }
        None => tracing::warn!("Station update was not delivered"),
    }
    Ok(())
}

async fn run_carousel(site: &SiteConfig, args: CarouselArgs) -> Result<(), SiteError> {
    let view = LoggingView::new(args.cards, args.width, args.card_width, args.card_margin);
    let Some(carousel) =
        Carousel::mount(view, site.carousel_settings(), tokio::time::Instant::now())
    else {
        tracing::warn!("No cards to show");
        return Ok(());
    };

    let (tx, rx) = mpsc::channel(8);
    let driver = tokio::spawn(CarouselDriver::new(carousel, rx).run());

    tokio::time::sleep(Duration::from_secs(args.seconds)).await;
    drop(tx);

    match driver.await {
        Ok(carousel) => tracing::info!(
            "Stopped on slide {} of {}",
            carousel.current_index() + 1,
            carousel.slide_count()
        ),
        Err(e) => tracing::error!("Carousel driver panicked: {}", e),
    }
    Ok(())
}
