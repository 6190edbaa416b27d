//! Wiring & DI. Entry point: bootstrap adapters, inject into services, run UI.
//! No business logic here.

use dotenv::dotenv;
use historial_sync::adapters::backend::{HttpBackend, MockBackend};
use historial_sync::adapters::geo::{ConfiguredPosition, IpApiAdapter};
use historial_sync::adapters::ui::tui::TuiInputPort;
use historial_sync::ports::{
    DevicePositionPort, DiaryPort, ExamPort, GeoIpPort, InputPort, RosterPort,
};
use historial_sync::usecases::{LocationService, TimelineService};
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let env_loaded = dotenv();
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    match &env_loaded {
        Ok(path) => info!(path = %path.display(), "loaded .env"),
        Err(_) => info!("no .env found"),
    }

    historial_sync::adapters::ui::init_ui();

    let cfg = historial_sync::shared::config::AppConfig::load().unwrap_or_default();

    // --- Record services: real backend when configured, mock otherwise ---
    let (roster, diary, exams): (Arc<dyn RosterPort>, Arc<dyn DiaryPort>, Arc<dyn ExamPort>) =
        match cfg.backend_url() {
            Some(base_url) => {
                info!(%base_url, "backend configured");
                let backend = Arc::new(HttpBackend::new(base_url));
                (
                    Arc::clone(&backend) as Arc<dyn RosterPort>,
                    Arc::clone(&backend) as Arc<dyn DiaryPort>,
                    backend as Arc<dyn ExamPort>,
                )
            }
            None => {
                warn!("HISTORIAL_BACKEND_URL not set, using mock backend");
                let backend = Arc::new(MockBackend::with_delay(cfg.mock_delay_ms_or_default()));
                (
                    Arc::clone(&backend) as Arc<dyn RosterPort>,
                    Arc::clone(&backend) as Arc<dyn DiaryPort>,
                    backend as Arc<dyn ExamPort>,
                )
            }
        };

    let timeline_service = Arc::new(TimelineService::new(roster, diary, exams));

    // --- Geolocation: optional configured position, then IP lookup ---
    let geo_ip: Arc<dyn GeoIpPort> = Arc::new(IpApiAdapter::new(cfg.geoip_url_or_default()));
    let device: Option<Arc<dyn DevicePositionPort>> = cfg
        .configured_position()
        .map(|p| Arc::new(ConfiguredPosition::new(p)) as Arc<dyn DevicePositionPort>);
    if device.is_some() {
        info!("configured practice position available");
    }
    let location_service = Arc::new(LocationService::new(device, geo_ip));

    // --- Run (main menu -> Browse history / Preview media) ---
    let input_port: Arc<dyn InputPort> = Arc::new(TuiInputPort::new(
        timeline_service,
        location_service,
        cfg.specialist_id_or_default(),
    ));

    input_port
        .run()
        .await
        .map_err(|e| anyhow::anyhow!("{}", e))?;

    Ok(())
}
