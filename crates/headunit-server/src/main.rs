use std::sync::Arc;

use anyhow::Context;
use axum::Json;
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use headunit::{PhoneService, SystemClock};

mod config;
mod models;
mod routes;

use config::ServerConfig;

/// Application state shared across all routes
#[derive(Clone)]
pub struct AppState {
    pub phone: PhoneService,
}

#[derive(Serialize)]
struct HealthCheck {
    status: String,
    message: String,
    version: String,
}

async fn health_check() -> Json<HealthCheck> {
    Json(HealthCheck {
        status: "ok".to_string(),
        message: "Head unit API is running".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    tracing::info!("🚗 Head unit API initializing...");

    let config = ServerConfig::from_env()?;

    let phone = PhoneService::with_sample_data(config.phone.clone(), Arc::new(SystemClock))
        .context("Failed to initialize phone service")?;

    if !config.phone.simulator.enabled {
        tracing::warn!("⚠️  Simulator disabled - no incoming calls or device drift");
    }
    phone.start().await;

    let state = AppState {
        phone: phone.clone(),
    };
    let router = routes::app(state);

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("Failed to bind {}", config.bind_addr))?;

    tracing::info!("📚 Swagger UI: /swagger-ui");
    tracing::info!("✅ Head unit API ready on {}", config.bind_addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    phone.stop().await;
    tracing::info!("👋 Head unit API shut down");

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("⚠️  Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
