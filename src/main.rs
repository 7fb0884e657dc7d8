use anyhow::Result;
use ppg_report::api::ApiState;
use ppg_report::{
    CachedHttpClient, ElevationResolver, PersistentCache, PpgReportConfig, SiteResolver,
    TimezoneResolver, web,
};
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

fn init_tracing(config: &PpgReportConfig) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.logging.level));

    if config.logging.format == "json" {
        tracing_subscriber::fmt().with_env_filter(filter).json().init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let config = PpgReportConfig::load()?;
    init_tracing(&config);
    info!("Starting ppg-report v{}", ppg_report::VERSION);

    let cache = Arc::new(PersistentCache::open(config.cache_path())?);
    let http = Arc::new(CachedHttpClient::new(
        cache,
        Duration::from_secs(config.providers.timeout_seconds.into()),
    )?);

    let sites = Arc::new(SiteResolver::new(
        ElevationResolver::new(http.clone(), config.providers.base_url.clone()),
        TimezoneResolver::new(http.clone(), config.providers.base_url.clone()),
    ));

    web::run(ApiState { sites }, config.server.port).await?;
    Ok(())
}
