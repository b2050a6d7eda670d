//! the `serve` subcommand - runs the api server.

use std::path::PathBuf;

use clap::Args;
use color_eyre::eyre::{Context, Result, bail};
use tokio::net::TcpListener;
use tracing::{Level, debug, info};
use tracing_subscriber::FmtSubscriber;

use crate::create_app;
use alphaloan_db::AlphaloanDb;
use alphaloan_types::{Config, DatabaseConfig};

/// default config file search paths (in order of priority).
const CONFIG_SEARCH_PATHS: &[&str] = &["/etc/alphaloan/config.toml", "./config.toml"];

/// run the alphaloan api server
#[derive(Args, Debug)]
pub struct ServeCommand {
    /// path to config file (toml format)
    #[arg(short, long, env = "ALPHALOAN_CONFIG")]
    config: Option<PathBuf>,

    /// database url (sqlite:// or postgres://)
    #[arg(long, env = "ALPHALOAN_DATABASE_URL")]
    database_url: Option<String>,

    /// address to listen on
    #[arg(long, env = "ALPHALOAN_LISTEN_ADDR")]
    listen_addr: Option<String>,

    /// log level
    #[arg(long, env = "ALPHALOAN_LOG_LEVEL")]
    log_level: Option<String>,
}

impl ServeCommand {
    /// find and load a config file, returning none if no config file is found.
    fn load_config_file(config_path: Option<&PathBuf>) -> Result<Option<Config>> {
        // if explicit path provided, it must exist
        if let Some(path) = config_path {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read config file: {:?}", path))?;
            let config: Config = toml::from_str(&content)
                .with_context(|| format!("failed to parse config file: {:?}", path))?;
            return Ok(Some(config));
        }

        // search default paths
        for path_str in CONFIG_SEARCH_PATHS {
            let path = PathBuf::from(path_str);
            if path.exists() {
                debug!("Found config file at {:?}", path);
                let content = std::fs::read_to_string(&path)
                    .with_context(|| format!("failed to read config file: {:?}", path))?;
                let config: Config = toml::from_str(&content)
                    .with_context(|| format!("failed to parse config file: {:?}", path))?;
                return Ok(Some(config));
            }
        }

        Ok(None)
    }

    /// convert cli arguments into a config struct, merging with config file if
    /// present.
    ///
    /// priority order: defaults -> config file -> cli flags
    fn into_config(self) -> Result<Config> {
        let mut config = match Self::load_config_file(self.config.as_ref())? {
            Some(file_config) => {
                info!("Loaded configuration from file");
                file_config
            }
            None => {
                debug!("No config file found, using defaults");
                Config::default()
            }
        };

        if let Some(db_url) = self.database_url {
            config.database = parse_database_url(&db_url)?;
        }
        if let Some(listen_addr) = self.listen_addr {
            config.listen_addr = listen_addr;
        }

        Ok(config)
    }

    /// run the serve command
    pub async fn run(self) -> Result<()> {
        // initialize logging (use CLI override or default to info)
        let log_level_str = self.log_level.clone().unwrap_or_else(|| "info".to_string());
        let log_level = match log_level_str.to_lowercase().as_str() {
            "trace" => Level::TRACE,
            "debug" => Level::DEBUG,
            "info" => Level::INFO,
            "warn" => Level::WARN,
            "error" => Level::ERROR,
            _ => Level::INFO,
        };

        let subscriber = FmtSubscriber::builder().with_max_level(log_level).finish();
        tracing::subscriber::set_global_default(subscriber)?;

        info!("Starting alphaloan...");

        let config = self.into_config()?;

        let db = AlphaloanDb::new(&config)
            .await
            .context("failed to open database")?;
        info!(db_type = %config.database.db_type, "database ready");

        let listen_addr = config.listen_addr.clone();
        let app = create_app(db, config);

        let listener = TcpListener::bind(&listen_addr)
            .await
            .with_context(|| format!("failed to bind {}", listen_addr))?;
        info!("Listening on {}", listen_addr);

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .context("server error")?;

        info!("Shutdown complete");
        Ok(())
    }
}

/// resolve on SIGINT or SIGTERM.
async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        signal::ctrl_c().await.expect("failed to listen for ctrl-c");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received ctrl-c, shutting down"),
        _ = terminate => info!("Received SIGTERM, shutting down"),
    }
}

/// parse a database url into a database config.
fn parse_database_url(url: &str) -> Result<DatabaseConfig> {
    let mut config = DatabaseConfig::default();
    if let Some(path) = url.strip_prefix("sqlite://") {
        config.db_type = "sqlite".to_string();
        config.connection_string = path.to_string();
    } else if url.starts_with("sqlite:") {
        config.db_type = "sqlite".to_string();
        config.connection_string = url.to_string();
    } else if url.starts_with("postgres://") || url.starts_with("postgresql://") {
        config.db_type = "postgres".to_string();
        config.connection_string = url.to_string();
    } else {
        bail!("unsupported database url: {}", url);
    }
    Ok(config)
}
