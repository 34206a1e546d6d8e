use std::net::SocketAddr;
use std::sync::Arc;

use innkeep_api::{app, state::{AppState, AuthConfig}};
use innkeep_store::{Config, DbClient, MemoryStore, Repositories};
use tokio::signal::ctrl_c;
#[cfg(unix)]
use tokio::signal::unix::{signal, SignalKind};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_SECRET: &str = "change-me";

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "innkeep_api=debug,tower_http=debug,axum::rejection=trace".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::load().expect("Failed to load config");
    info!("Starting Innkeep API on port {}", config.server.port);

    let repos = match &config.database.url {
        Some(url) => {
            let db = DbClient::new(url, &config.database)
                .await
                .expect("Failed to connect to Postgres");
            if config.database.run_migrations {
                db.migrate().await.expect("Failed to run migrations");
            }
            Repositories::postgres(&db, &config.collections)
        }
        None => {
            tracing::warn!("No database.url configured, using the in-memory store");
            Repositories::memory(Arc::new(MemoryStore::default()))
        }
    };

    if config.auth.session_secret == DEFAULT_SECRET || config.auth.admin_password == DEFAULT_SECRET {
        tracing::warn!("Admin credentials are still the defaults; set INNKEEP__AUTH__SESSION_SECRET and INNKEEP__AUTH__ADMIN_PASSWORD");
    }

    let app_state = AppState::new(
        repos,
        AuthConfig {
            secret: config.auth.session_secret.clone(),
            expiration: config.auth.session_expiration_seconds,
            admin_password: config.auth.admin_password.clone(),
        },
        &config.booking,
    );

    let app = app(app_state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .unwrap();

    info!("Server shut down");
}

async fn shutdown_signal() {
    let ctrl_c = async {
        ctrl_c().await.expect("Failed to install Ctrl+C handler");
        info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        signal(SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
        info!("Received terminate signal, shutting down");
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
