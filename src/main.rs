use centre_portal::{gate, router, AppState, Config, Gate, StoreClient};
use std::net::SocketAddr;
use tracing::{error, info};
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    let config = Config::from_env()?;
    let store = StoreClient::new(config.store_url.clone(), config.store_timeout)?;
    let gate = Gate::new(config.closes_at);
    let state = AppState::new(store, gate.clone());

    let _watcher = gate::spawn_watch(gate);
    let loader = state.clone();
    tokio::spawn(async move {
        if let Err(err) = loader.load().await {
            error!("initial load skipped: {err}");
        }
    });

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    info!("listening on http://{addr}");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router(state))
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
        })
        .await?;

    Ok(())
}
