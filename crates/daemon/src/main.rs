use daemon::{
    create_folder, get_config_info, load_site_config, render_report, save_report, setup_logger,
    subfolder_exists, Cli, ForecastService, JsonFetcher, ResponseCache, SiteConfig,
};
use minecast_core::IST;
use slog::{debug, error, info, Logger};
use std::{sync::Arc, time::Duration};
use time::{format_description::well_known::Rfc3339, OffsetDateTime};
use tokio::sync::Mutex;
use tokio::task::JoinSet;
use tokio::time::interval;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    let (cli, config_source) = get_config_info();
    let logger = setup_logger(&cli);

    info!(logger, "Minecast Daemon starting...");
    info!(logger, "  Config: {}", config_source);
    info!(logger, "  Data dir: {}", cli.data_dir());
    info!(logger, "  Fetch interval: {} seconds", cli.sleep_interval());

    let site_config = load_site_config(&config_source)?;
    if site_config.sites.is_empty() {
        anyhow::bail!("no sites configured, add at least one [[sites]] entry to the config file");
    }
    info!(logger, "  Sites: {}", site_config.sites.len());

    // Provider responses are reused across sites and runs while fresh
    let cache = Arc::new(Mutex::new(ResponseCache::new(cli.cache_ttl())));

    process_forecasts_hourly(cli, site_config, logger, cache).await;
    Ok(())
}

async fn process_forecasts_hourly(
    cli: Cli,
    site_config: SiteConfig,
    logger: Logger,
    cache: Arc<Mutex<ResponseCache>>,
) {
    let sleep_between_checks = cli.sleep_interval();
    info!(
        logger,
        "Wait time between data pulls: {} seconds", sleep_between_checks
    );

    let mut check_interval = interval(Duration::from_secs(sleep_between_checks));
    loop {
        tokio::select! {
            _ = check_interval.tick() => {
                match process_data(cli.clone(), &site_config, logger.clone(), cache.clone()).await {
                    Ok(report_path) => info!(logger, "Report written to {}, waiting {} seconds for next run", report_path, sleep_between_checks),
                    Err(err) => error!(&logger, "Error processing forecasts: {}", err)
                }
            }
        }
    }
}

async fn process_data(
    cli: Cli,
    site_config: &SiteConfig,
    logger: Logger,
    cache: Arc<Mutex<ResponseCache>>,
) -> Result<String, anyhow::Error> {
    let logger_cpy = &logger.clone();
    let fetcher = JsonFetcher::new(logger.clone(), cli.user_agent(), cli.request_timeout(), cache)?;
    let service = Arc::new(ForecastService::new(
        logger.clone(),
        fetcher,
        cli.provider_keys(),
        site_config.thresholds.clone(),
    ));

    let now_ist = OffsetDateTime::now_utc().to_offset(IST);

    let mut tasks = JoinSet::new();
    for site in site_config.sites.clone() {
        let service = Arc::clone(&service);
        tasks.spawn(async move { service.site_forecast(&site, now_ist).await });
    }

    let mut forecasts = Vec::with_capacity(site_config.sites.len());
    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok(forecast) => forecasts.push(forecast),
            Err(err) => error!(logger_cpy, "site forecast task failed: {}", err),
        }
    }
    // Tasks finish in any order, the report reads in config order
    forecasts.sort_by_key(|forecast| {
        site_config
            .sites
            .iter()
            .position(|site| site.name == forecast.site_name)
    });
    debug!(logger_cpy, "forecasts count: {}", forecasts.len());

    let report = render_report(&forecasts, &site_config.thresholds, now_ist)?;

    let current_utc_time: String = OffsetDateTime::now_utc().format(&Rfc3339)?;
    let root_path = cli.data_dir();
    create_folder(&root_path, logger_cpy);

    let current_date = now_ist.date();
    let subfolder = format!("{}/{}", root_path, current_date);
    if !subfolder_exists(&subfolder) {
        create_folder(&subfolder, logger_cpy)
    }

    save_report(
        &report,
        &subfolder,
        &format!("report_{}.txt", current_utc_time),
    )
}
