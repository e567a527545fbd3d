use crate::adapters::http::{build_router, AppState};
use crate::config::BrokerConfig;
use crate::core::broker::StaticBroker;
use crate::utils::error::Result;
use std::future::Future;

/// Builds the shared state from validated configuration.
pub fn build_state(config: &BrokerConfig) -> Result<AppState> {
    let broker = StaticBroker::new(config.descriptor(), config.app_url()?);
    Ok(AppState::new(broker))
}

pub async fn run(config: BrokerConfig) -> Result<()> {
    run_with_shutdown(config, shutdown_signal()).await
}

pub async fn run_with_shutdown<F>(config: BrokerConfig, shutdown: F) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let addr = config.bind_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    serve(listener, build_state(&config)?, shutdown).await
}

pub async fn serve<F>(listener: tokio::net::TcpListener, state: AppState, shutdown: F) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let addr = listener.local_addr()?;
    tracing::info!(%addr, "service broker listening");

    axum::serve(listener, build_router(state).into_make_service())
        .with_graceful_shutdown(shutdown)
        .await?;

    tracing::info!("service broker stopped");
    Ok(())
}

/// Resolves on Ctrl-C, or SIGTERM on unix (what the platform sends on stop).
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::warn!(error = %err, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                tracing::warn!(error = %err, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }
    tracing::info!("shutdown signal received");
}
