//! Songbook entry-point: loads settings, prepares the database, wires the
//! catalogue service and serves HTTP until a shutdown signal arrives.

mod server;

use std::sync::Arc;

use actix_web::web;
use color_eyre::eyre::{Context, Result, eyre};
use ortho_config::OrthoConfig;
use tracing::level_filters::LevelFilter;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use server::{ServerConfig, create_server};
use songbook::config::SongbookSettings;
use songbook::domain::SongCatalogService;
use songbook::inbound::http::health::HealthState;
use songbook::inbound::http::state::HttpState;
use songbook::outbound::persistence::{DbPool, DieselSongRepository, run_migrations_blocking};
use songbook::outbound::song_details::SongDetailsHttpSource;

/// Install the JSON subscriber. `RUST_LOG` wins over the configured level.
fn init_tracing(fallback_level: LevelFilter) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(fallback_level.to_string()));
    if let Err(e) = fmt().with_env_filter(filter).json().try_init() {
        warn!(error = %e, "tracing init failed");
    }
}

/// Resolve once either Ctrl-C or SIGTERM arrives.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(error) = tokio::signal::ctrl_c().await {
            warn!(%error, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(error) => {
                warn!(%error, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };
    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
}

/// Application bootstrap.
#[actix_web::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let settings =
        SongbookSettings::load().map_err(|err| eyre!("failed to load configuration: {err}"))?;
    match settings.log_level() {
        Ok(level) => init_tracing(level),
        Err(err) => {
            init_tracing(LevelFilter::INFO);
            warn!(error = %err, "falling back to info logging");
        }
    }

    let database_url = settings.database_url()?.to_owned();
    let pool_config = settings.pool_config()?;
    let details_url = settings.details_api_url()?;
    let retry = settings.connect_retry();

    let applied = retry
        .run("migrations", || run_migrations_blocking(database_url.clone()))
        .await
        .wrap_err("failed to apply database migrations")?;
    info!(applied, "database migrations applied");

    let pool = retry
        .run("connection pool", || DbPool::new(pool_config.clone()))
        .await
        .wrap_err("failed to connect to the database")?;

    let details = SongDetailsHttpSource::new(details_url, settings.details_timeout())
        .wrap_err("failed to build the details provider client")?;
    let service = Arc::new(SongCatalogService::new(
        Arc::new(DieselSongRepository::new(pool)),
        Arc::new(details),
    ));

    let bind_addr = settings.bind_addr();
    let health_state = web::Data::new(HealthState::new());
    let server = create_server(
        health_state.clone(),
        ServerConfig::new(bind_addr, HttpState::from_service(service)),
    )
    .wrap_err_with(|| format!("failed to bind {bind_addr}"))?;
    info!(%bind_addr, "songbook listening");

    let handle = server.handle();
    let running = actix_web::rt::spawn(server);

    shutdown_signal().await;
    info!("shutdown signal received, draining connections");
    health_state.mark_unhealthy();
    handle.stop(true).await;

    running
        .await
        .wrap_err("server task failed")?
        .wrap_err("server terminated with an error")?;
    info!("songbook stopped");
    Ok(())
}
