
use std::net::SocketAddr;
use std::sync::Arc;

use genai_api_proxy::{api, config, FalClient, OpenAiClient};

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    // Load configuration
    config::Config::dotenv_load();
    let config = config::Config::new().expect("Failed to load configuration");
    config.log_summary();

    // Missing keys only disable the routes that need them
    if config.fal_api_key.is_none() {
        tracing::warn!("No FAL_KEY set; /api/fal and /api/falfast will fail");
    }
    if config.openai_api_key.is_none() {
        tracing::warn!("No OPENAI_API_KEY set; /api/gpt and /api/dalle will fail");
    }

    // Create provider clients
    let state = Arc::new(api::routes::AppState {
        openai: OpenAiClient::new(&config),
        fal: FalClient::new(&config),
    });

    // Build our application with a route
    let app = api::routes::app(state, &config.public_dir);

    // Run our application with safe parsing
    let host_str = config.api_host.clone();
    let port_str = config.api_port.clone();
    let ip: std::net::IpAddr = host_str.parse().unwrap_or_else(|_| {
        tracing::warn!("Invalid API_HOST '{}', falling back to 127.0.0.1", host_str);
        std::net::IpAddr::from([127, 0, 0, 1])
    });
    let port: u16 = port_str.parse().unwrap_or_else(|_| {
        tracing::warn!("Invalid API_PORT '{}', falling back to 2000", port_str);
        2000
    });
    let socket_address = SocketAddr::new(ip, port);
    tracing::info!("listening on {}", socket_address);
    axum::Server::bind(&socket_address)
        .serve(app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .unwrap();
}

async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to install interrupt handler");
    tracing::info!("shutdown signal received, stopping listener");
}
