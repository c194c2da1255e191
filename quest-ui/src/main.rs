//! Web presentation server for the quest client.
//!
//! Thin adapter over a shared [`Session`](quest::session::Session): exposes
//! the catalog, the run state and run submission as a JSON API, and
//! optionally serves a static front-end directory. Holds no state of its
//! own beyond the shared session.

mod routes;
mod state;

use std::net::SocketAddr;
use std::path::PathBuf;

use axum::Router;
use clap::Parser;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tracing::{info, warn};

use quest::core::catalog::Catalog;
use quest::io::catalog_file::load_catalog;
use quest::io::config::load_config;
use quest::io::service::ExecutionClient;
use quest::session::Session;

use crate::state::AppState;

#[derive(Parser)]
#[command(name = "quest-ui")]
#[command(about = "Web UI for the code + tests execution sandbox client")]
struct Args {
    /// Address to bind the server to
    #[arg(long, default_value = "127.0.0.1")]
    bind: String,

    /// Port to listen on
    #[arg(long, default_value = "3000")]
    port: u16,

    /// Path of the client configuration file
    #[arg(long, default_value = "quest.toml")]
    config: PathBuf,

    /// Directory containing static front-end files (API-only mode if absent)
    #[arg(long, default_value = "web")]
    web_dir: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("quest_ui=info".parse()?),
        )
        .init();

    let args = Args::parse();

    let config = load_config(&args.config)?;
    // A broken or absent catalog must not block the server; runs remain
    // possible with no mission loaded.
    let catalog = match load_catalog(&config.missions_path) {
        Ok(catalog) => catalog,
        Err(err) => {
            warn!("no mission catalog loaded: {err:#}");
            Catalog::empty()
        }
    };
    info!(
        missions = catalog.missions().len(),
        service_url = %config.service_url,
        "starting quest-ui"
    );

    // The blocking HTTP client owns its own runtime thread; build it off the
    // async runtime, where its calls will also run.
    let client = tokio::task::spawn_blocking(move || ExecutionClient::new(&config)).await??;
    let state = AppState::new(Session::new(catalog), client);

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let mut app = Router::new()
        .nest("/api", routes::api_router())
        .layer(cors)
        .with_state(state);

    if args.web_dir.exists() {
        info!(web_dir = %args.web_dir.display(), "serving static front-end files");
        app = app
            .fallback_service(ServeDir::new(&args.web_dir).append_index_html_on_directories(true));
    } else {
        info!(web_dir = %args.web_dir.display(), "front-end directory not found, API-only mode");
    }

    let addr: SocketAddr = format!("{}:{}", args.bind, args.port).parse()?;
    info!(addr = %addr, "listening");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
