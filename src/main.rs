//! lightstack-api - HTTP server entry point.

use std::sync::Arc;

use anyhow::Context;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use lightstack_api::adapters::auth::JwtSessionService;
use lightstack_api::adapters::provisioner::ScriptProvisioner;
use lightstack_api::adapters::{app_router, AppServices};
use lightstack_api::config::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::load().context("failed to load configuration")?;
    config.validate().context("invalid configuration")?;

    init_tracing(&config);

    info!(
        "lightstack-api v{} ({:?})",
        env!("CARGO_PKG_VERSION"),
        config.server.environment
    );

    let sessions = Arc::new(JwtSessionService::from_config(&config.auth));
    let provisioner = ScriptProvisioner::from_config(&config.provisioner);
    info!(
        executable = %config.provisioner.executable.display(),
        timeout_secs = provisioner.timeout().as_secs(),
        serialize_mutations = provisioner.serializes_mutations(),
        "provisioner configured"
    );

    let services = AppServices {
        token_issuer: sessions.clone(),
        session_validator: sessions,
        provisioner: Arc::new(provisioner),
    };
    let app = app_router(services, &config.server.cors_origins_list());

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    info!("listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("shut down cleanly");
    Ok(())
}

/// `RUST_LOG` wins over the configured level; production logs are JSON.
fn init_tracing(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.server.log_level));

    let registry = tracing_subscriber::registry().with(filter);

    if config.is_production() {
        registry
            .with(fmt::layer().with_target(false).json())
            .init();
    } else {
        registry.with(fmt::layer().compact()).init();
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("received SIGINT (Ctrl+C)"),
        _ = terminate => info!("received SIGTERM"),
    }
}
