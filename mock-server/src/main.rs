use mock_server::config::Config;
use tokio::{net::TcpListener, signal};
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = Config::load()?;
    let addr = config.address();
    let listener = TcpListener::bind(&addr).await?;
    info!("listening on {addr}, tokens valid for {}s", config.token_ttl_secs);

    let router = mock_server::app_with_token_ttl(config.token_ttl());
    mock_server::run_until(listener, router, async {
        if signal::ctrl_c().await.is_ok() {
            info!("received Ctrl+C, shutting down");
        }
    })
    .await?;
    Ok(())
}
