use resize_processor::config::Config;
use resize_processor::{router, telemetry, AppState};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() {
    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("invalid configuration: {e}");
            std::process::exit(1);
        }
    };
    telemetry::setup_tracing(config.log_format);

    let mut state = AppState::new(config.storage_client());
    if config.serialize_writes {
        state = state.with_key_locks();
    }

    let listener = match TcpListener::bind(config.listen_addr).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!(addr = %config.listen_addr, error = %e, "failed to bind");
            std::process::exit(1);
        }
    };
    tracing::info!(
        addr = %config.listen_addr,
        storage = %config.storage_url,
        serialize_writes = config.serialize_writes,
        "resize processor listening"
    );

    if let Err(e) = axum::serve(listener, router(state, config.max_body_bytes))
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        tracing::error!(error = %e, "server error");
        std::process::exit(1);
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutting down");
}
