use anyhow::Error;
use clap::Parser;
use minecast_core::{
    find_config_file, load_config, ConfigSource, DEFAULT_CACHE_TTL, DEFAULT_FETCH_INTERVAL,
    DEFAULT_REQUEST_TIMEOUT,
};
use reqwest::Client;
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_retry::{policies::ExponentialBackoff, RetryTransientMiddleware};
use serde::de::DeserializeOwned;
use slog::{debug, error, info, o, Drain, Level, Logger};
use std::{env, fs, path::Path, sync::Arc, time::Duration};
use tokio::sync::Mutex;

use crate::ResponseCache;

#[derive(Parser, Clone, Debug, serde::Deserialize, Default)]
#[command(
    author,
    version,
    about = "Minecast Daemon - Consolidates multi-provider weather forecasts into mine-site reports"
)]
pub struct Cli {
    /// Path to config file (TOML format)
    /// Searched in order: this flag, $MINECAST_DAEMON_CONFIG, ./daemon.toml,
    /// $XDG_CONFIG_HOME/minecast/daemon.toml, /etc/minecast/daemon.toml
    #[arg(short, long)]
    #[serde(skip)]
    pub config: Option<String>,

    /// Log level: trace, debug, info, warn, error
    #[arg(short, long, env = "MINECAST_DAEMON_LEVEL")]
    pub level: Option<String>,

    /// Local directory the forecast reports are written to
    #[arg(short, long, env = "MINECAST_DAEMON_DATA_DIR")]
    pub data_dir: Option<String>,

    /// Fetch interval in seconds (providers refresh their feeds hourly)
    #[arg(short, long, env = "MINECAST_DAEMON_SLEEP_INTERVAL")]
    pub sleep_interval: Option<u64>,

    /// Per-request timeout for provider APIs, in seconds
    #[arg(short, long, env = "MINECAST_DAEMON_REQUEST_TIMEOUT")]
    pub request_timeout: Option<u64>,

    /// How long a provider response is reused before refetching, in seconds
    #[arg(long, env = "MINECAST_DAEMON_CACHE_TTL")]
    pub cache_ttl: Option<u64>,

    /// OpenWeatherMap One Call 3.0 API key
    #[arg(short, long, env = "MINECAST_DAEMON_OPENWEATHER_KEY")]
    pub openweather_key: Option<String>,

    /// Tomorrow.io API key
    #[arg(short, long, env = "MINECAST_DAEMON_TOMORROW_KEY")]
    pub tomorrow_key: Option<String>,

    /// AccuWeather API key, used for the supplementary daily outlook
    #[arg(short, long, env = "MINECAST_DAEMON_ACCUWEATHER_KEY")]
    pub accuweather_key: Option<String>,

    /// HTTP User-Agent header for provider API requests
    #[arg(short, long, env = "MINECAST_DAEMON_USER_AGENT")]
    pub user_agent: Option<String>,
}

impl Cli {
    /// Get the effective configuration value with defaults
    pub fn data_dir(&self) -> String {
        self.data_dir
            .clone()
            .unwrap_or_else(|| "./data".to_string())
    }

    pub fn sleep_interval(&self) -> u64 {
        self.sleep_interval.unwrap_or(DEFAULT_FETCH_INTERVAL)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout.unwrap_or(DEFAULT_REQUEST_TIMEOUT))
    }

    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl.unwrap_or(DEFAULT_CACHE_TTL))
    }

    pub fn user_agent(&self) -> String {
        self.user_agent
            .clone()
            .unwrap_or_else(|| "minecast-daemon/1.0".to_string())
    }

    pub fn provider_keys(&self) -> ProviderKeys {
        ProviderKeys {
            open_weather: self.openweather_key.clone(),
            tomorrow_io: self.tomorrow_key.clone(),
            accu_weather: self.accuweather_key.clone(),
        }
    }
}

/// API keys for the providers that require one; a missing key skips that provider
#[derive(Clone, Debug, Default)]
pub struct ProviderKeys {
    pub open_weather: Option<String>,
    pub tomorrow_io: Option<String>,
    pub accu_weather: Option<String>,
}

/// Load configuration from CLI args, config file, and environment
///
/// Also returns where the config file was found so the site list can be
/// loaded from the same file.
pub fn get_config_info() -> (Cli, ConfigSource) {
    let cli_args = Cli::parse();

    // Determine config file path
    let source = if let Some(ref path) = cli_args.config {
        ConfigSource::Explicit(path.into())
    } else {
        find_config_file("MINECAST_DAEMON_CONFIG", "daemon.toml")
    };

    // Load from config file
    let file_config: Cli = load_config(&source).unwrap_or_default();

    // CLI args override file config (env vars are handled by clap)
    let cli = Cli {
        config: cli_args.config,
        level: cli_args.level.or(file_config.level),
        data_dir: cli_args.data_dir.or(file_config.data_dir),
        sleep_interval: cli_args.sleep_interval.or(file_config.sleep_interval),
        request_timeout: cli_args.request_timeout.or(file_config.request_timeout),
        cache_ttl: cli_args.cache_ttl.or(file_config.cache_ttl),
        openweather_key: cli_args.openweather_key.or(file_config.openweather_key),
        tomorrow_key: cli_args.tomorrow_key.or(file_config.tomorrow_key),
        accuweather_key: cli_args.accuweather_key.or(file_config.accuweather_key),
        user_agent: cli_args.user_agent.or(file_config.user_agent),
    };

    (cli, source)
}

pub fn setup_logger(cli: &Cli) -> Logger {
    let log_level = if let Some(level) = cli.level.as_ref() {
        match level.to_lowercase().as_str() {
            "trace" => Level::Trace,
            "debug" => Level::Debug,
            "info" => Level::Info,
            "warn" => Level::Warning,
            "error" => Level::Error,
            _ => Level::Info,
        }
    } else {
        let rust_log = env::var("RUST_LOG").unwrap_or_default();
        match rust_log.to_lowercase().as_str() {
            "trace" => Level::Trace,
            "debug" => Level::Debug,
            "info" => Level::Info,
            "warn" => Level::Warning,
            "error" => Level::Error,
            _ => Level::Info,
        }
    };

    let decorator = slog_term::TermDecorator::new().build();
    let drain = slog_term::CompactFormat::new(decorator).build().fuse();
    let drain = slog_async::Async::new(drain).build().fuse();
    let drain = drain.filter_level(log_level).fuse();
    slog::Logger::root(drain, o!("version" => env!("CARGO_PKG_VERSION")))
}

#[derive(thiserror::Error, Debug)]
pub enum FetchError {
    #[error("error sending request: {0}")]
    Request(#[from] reqwest_middleware::Error),
    #[error("error response from request: {0}")]
    Status(reqwest::StatusCode),
    #[error("error reading body of request: {0}")]
    Body(#[from] reqwest::Error),
    #[error("error decoding response: {0}")]
    Decode(#[from] serde_json::Error),
}

pub struct JsonFetcher {
    logger: Logger,
    client: ClientWithMiddleware,
    timeout: Duration,
    cache: Arc<Mutex<ResponseCache>>,
}

impl JsonFetcher {
    pub fn new(
        logger: Logger,
        user_agent: String,
        timeout: Duration,
        cache: Arc<Mutex<ResponseCache>>,
    ) -> Result<JsonFetcher, Error> {
        let retry_policy = ExponentialBackoff::builder().build_with_max_retries(3);
        let client = ClientBuilder::new(Client::builder().user_agent(&user_agent).build()?)
            .with(RetryTransientMiddleware::new_with_policy(retry_policy))
            .build();

        Ok(Self {
            logger,
            client,
            timeout,
            cache,
        })
    }

    /// Fetch `url` and decode the JSON body into `T`, reusing a cached body
    /// while it is fresh. Query strings carry API keys and are never logged.
    pub async fn fetch_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, FetchError> {
        let endpoint = url.split('?').next().unwrap_or(url);

        {
            let mut cache = self.cache.lock().await;
            if let Some(body) = cache.fresh(url) {
                debug!(self.logger, "cached response: {}", endpoint);
                return Ok(serde_json::from_str(&body)?);
            }
        }

        debug!(self.logger, "requesting: {}", endpoint);
        let response = self.client.get(url).timeout(self.timeout).send().await?;
        if !response.status().is_success() {
            return Err(FetchError::Status(response.status()));
        }

        let body = response.text().await?;
        let parsed = serde_json::from_str(&body)?;
        self.cache.lock().await.store(url, body);
        Ok(parsed)
    }
}

pub fn create_folder(root_path: &str, logger: &Logger) {
    let path = Path::new(root_path);

    if !path.exists() || !path.is_dir() {
        if let Err(err) = fs::create_dir_all(path) {
            error!(logger, "error creating folder: {}", err);
        } else {
            info!(logger, "folder created: {}", root_path);
        }
    } else {
        info!(logger, "folder already exists: {}", root_path);
    }
}

pub fn subfolder_exists(subfolder_path: &str) -> bool {
    fs::metadata(subfolder_path).is_ok()
}
