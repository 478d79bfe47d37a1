//! Annotator Server
//!
//! Serves a browser PDF viewer and relays text annotations to Notion:
//!
//! - `GET /` viewer page
//! - `POST /upload` store a PDF in the upload directory
//! - `GET /pdf/:filename` fetch a stored PDF
//! - `POST /annotate` append the selection and note to a Notion page

use std::net::SocketAddr;

use clap::Parser;
use tracing::{info, Level};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod api;
mod config;
mod error;
mod notion;
mod routes;
mod state;
mod storage;

use config::{Args, Config};
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let args = Args::parse();

    let log_level = if args.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env().add_directive(log_level.into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let addr: SocketAddr = format!("{}:{}", args.host, args.port).parse()?;

    let config = Config::from(args);
    info!("Configuration: {:?}", config);

    let state = AppState::new(config).await?;
    let app = routes::build_router(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Server listening on http://{}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
