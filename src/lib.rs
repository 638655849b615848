pub mod api;
pub mod cli;
pub mod config;
pub mod db;
pub mod domain;
pub mod entities;
pub mod models;
pub mod services;
pub mod state;

use std::sync::Arc;
use tokio::signal;

use anyhow::Context;
pub use cli::{Cli, Commands};
pub use config::Config;
use db::Store;
use state::SharedState;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// Reads the file named by `--config`, or searches the default locations.
/// Environment overrides are applied either way.
pub fn load_config(cli: &Cli) -> anyhow::Result<Config> {
    let Some(path) = cli.config.as_deref() else {
        return Config::load();
    };

    let mut config = if path.exists() {
        Config::load_from_path(path)?
    } else {
        Config::default()
    };
    config.apply_env_overrides(|key| std::env::var(key).ok());
    Ok(config)
}

pub async fn run(cli: Cli, config: Config) -> anyhow::Result<()> {
    init_tracing(&config);

    match cli.command() {
        Commands::Init { force } => cmd_init(&cli, force),
        Commands::Migrate => {
            config.validate()?;
            cmd_migrate(&config).await
        }
        Commands::Serve => {
            config.validate()?;
            let prometheus_handle = if config.observability.metrics_enabled {
                use metrics_exporter_prometheus::PrometheusBuilder;
                let handle = PrometheusBuilder::new()
                    .install_recorder()
                    .context("Failed to install Prometheus recorder")?;
                info!("Prometheus metrics recorder initialized");
                Some(handle)
            } else {
                None
            };
            run_server(config, prometheus_handle).await
        }
    }
}

fn init_tracing(config: &Config) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.general.log_level));

    let registry = tracing_subscriber::registry().with(env_filter);

    if config.general.log_format.eq_ignore_ascii_case("json") {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

fn cmd_init(cli: &Cli, force: bool) -> anyhow::Result<()> {
    match cli.config.as_deref() {
        None if !force => {
            if Config::create_default_if_missing()? {
                println!(
                    "Created default config at {}",
                    Config::default_config_path().display()
                );
            } else {
                println!(
                    "Config already exists at {} (use --force to overwrite)",
                    Config::default_config_path().display()
                );
            }
        }
        path => {
            let path = path.map_or_else(Config::default_config_path, ToOwned::to_owned);
            if path.exists() && !force {
                println!(
                    "Config already exists at {} (use --force to overwrite)",
                    path.display()
                );
            } else {
                Config::default().save_to_path(&path)?;
                println!("Created default config at {}", path.display());
            }
        }
    }
    Ok(())
}

async fn cmd_migrate(config: &Config) -> anyhow::Result<()> {
    let store = Store::with_pool_options(&config.general.database_path, 1, 1).await?;
    store.ping().await?;
    info!("Migrations applied to {}", config.general.database_path);
    Ok(())
}

async fn run_server(
    config: Config,
    prometheus_handle: Option<metrics_exporter_prometheus::PrometheusHandle>,
) -> anyhow::Result<()> {
    info!("Marquee v{} starting...", env!("CARGO_PKG_VERSION"));

    if !config.server.enabled {
        info!("Web API disabled in config; nothing to do");
        return Ok(());
    }

    for kind in [
        domain::EntityKind::Movie,
        domain::EntityKind::Character,
        domain::EntityKind::Genre,
    ] {
        let dir = std::path::Path::new(&config.uploads.root).join(kind.upload_dir());
        tokio::fs::create_dir_all(&dir)
            .await
            .with_context(|| format!("Failed to create upload directory {}", dir.display()))?;
    }

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let shared = Arc::new(SharedState::new(config).await?);
    let api_state = api::create_app_state(shared, prometheus_handle);
    let app = api::router(api_state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    info!("Web server running at http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    match signal::ctrl_c().await {
        Ok(()) => info!("Shutdown signal received"),
        Err(e) => error!("Error listening for shutdown: {}", e),
    }
}
