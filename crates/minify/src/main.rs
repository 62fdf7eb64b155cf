//! Minify server binary.
//!
//! Serves the submit form, the minification endpoint and the health check.
//! All real work happens in the `minify-core` pipeline with the oxc engine
//! plugged in behind it.

use std::net::SocketAddr;
use std::sync::Arc;

use color_eyre::Result;
use minify_core::{Pipeline, ScratchStore};
use minify_oxc::OxcEngine;

mod config;
mod pages;
mod routes;

use config::ServerConfig;
use routes::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("minify=info".parse()?),
        )
        .init();

    let config = ServerConfig::from_env()?;
    let pipeline = Pipeline::new(Arc::new(OxcEngine), ScratchStore::in_temp_dir());
    let app = routes::build_router(Arc::new(AppState {
        pipeline,
        meta: config.meta.clone(),
    }));

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("listening on http://{addr}");
    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            tracing::info!("shutting down");
        })
        .await?;

    Ok(())
}
