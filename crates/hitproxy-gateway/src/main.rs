//! hitproxy gateway
//!
//! - Public listener: every request is counted, forwarded, and answered with
//!   the downstream's response
//! - Admin listener: `/hits`, `/hits.json`, `/healthz`, `/readyz`, `/metrics`
//! - Config path: first CLI argument, default `hitproxy.yaml`

use std::process::ExitCode;

use tokio::sync::watch;
use tracing_subscriber::{fmt, EnvFilter};

use hitproxy_core::error::{HitProxyError, Result};
use hitproxy_gateway::{app_state::AppState, config, router};

#[tokio::main]
async fn main() -> ExitCode {
    fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(code = e.client_code().as_str(), error = %e, "hitproxy-gateway failed");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<()> {
    let path = std::env::args().nth(1).unwrap_or_else(|| "hitproxy.yaml".to_string());
    let cfg = config::load_from_file(&path)?;
    let listen = cfg.gateway.listen_addr()?;
    let admin_listen = cfg.gateway.admin_listen_addr()?;

    let state = AppState::from_config(cfg).await?;
    let public_app = router::build_public_router(state.clone());
    let admin_app = router::build_admin_router(state.clone());

    let public_listener = bind(listen).await?;
    let admin_listener = bind(admin_listen).await?;
    tracing::info!(%listen, %admin_listen, "hitproxy-gateway starting");

    let (stop_tx, stop_rx) = watch::channel(false);
    let drain_state = state.clone();
    tokio::spawn(async move {
        shutdown_signal().await;
        drain_state.set_draining();
        let _ = stop_tx.send(true);
    });

    let public = async {
        axum::serve(public_listener, public_app)
            .with_graceful_shutdown(stopped(stop_rx.clone()))
            .await
    };
    let admin = async {
        axum::serve(admin_listener, admin_app)
            .with_graceful_shutdown(stopped(stop_rx.clone()))
            .await
    };

    tokio::try_join!(public, admin)
        .map_err(|e| HitProxyError::Internal(format!("server failed: {e}")))?;

    tracing::info!("hitproxy-gateway stopped");
    Ok(())
}

async fn bind(addr: std::net::SocketAddr) -> Result<tokio::net::TcpListener> {
    tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| HitProxyError::Internal(format!("failed to bind {addr}: {e}")))
}

async fn stopped(mut rx: watch::Receiver<bool>) {
    while !*rx.borrow() {
        if rx.changed().await.is_err() {
            return;
        }
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    tracing::info!("signal received, draining");
}
