use std::env;

use tracing::info;
use tracing_subscriber::EnvFilter;

use payroll_engine::api::{AppState, create_router};
use payroll_engine::config::ConfigLoader;

const DEFAULT_CONFIG_DIR: &str = "config/ie_2024";
const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("payroll_engine=info")),
        )
        .init();

    let config_dir =
        env::var("PAYROLL_CONFIG_DIR").unwrap_or_else(|_| DEFAULT_CONFIG_DIR.to_string());
    let addr = env::var("PAYROLL_BIND_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string());

    let config = ConfigLoader::load(&config_dir)?;
    let app = create_router(AppState::new(config));

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(addr = %addr, config_dir = %config_dir, "Payroll API listening");

    axum::serve(listener, app).await?;
    Ok(())
}
