use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), std::io::Error> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let port = std::env::var("PORT").unwrap_or_else(|_| "8000".to_string());
    let seed = std::env::var("SEED_DEMO").map_or(true, |v| v != "0" && v != "false");
    let addr = format!("127.0.0.1:{port}");
    let listener = TcpListener::bind(&addr).await?;

    let items = if seed { mock_server::demo_items() } else { Vec::new() };
    info!(%addr, seeded = items.len(), "listening");
    mock_server::run_with(listener, items).await
}
