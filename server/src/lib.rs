//! Backend for the Mkhonto National Union membership site.
//!
//! # General Infrastructure
//! - The frontend is a thin static client; every page's copy and the whole
//!   affiliation workflow come from this API over CORS
//! - `/pages/*` serves the landing, affiliate, and contact page content
//! - `/affiliate` validates a membership form and mails it to the
//!   membership desk
//! - `/pending` is the durable retry queue for submissions whose delivery
//!   failed; the frontend offers per-item and bulk retry from it
//!
//! # Mail
//! There is no mail server in this deployment. `MAIL_MODE=http` posts to an
//! external relay API; `MAIL_MODE=simulated` (the default) logs the send and
//! succeeds, which is enough for local development and demos.
//! Failed deliveries are never lost: they land in the pending queue backed
//! by Redis (see [`pending`] and [`database`]).
//!
//! # Setup
//!
//! Run the server.
//! ```sh
//! RUST_LOG=info cargo run -p server
//! ```
//!
//! Exercise it end to end with the tester.
//! ```sh
//! cargo run -p tester -- http://127.0.0.1:8080
//! ```
use std::time::Duration;

use axum::{
    Router,
    http::{Method, header::CONTENT_TYPE},
    routing::{delete, get, post},
};

use tokio::{net::TcpListener, signal};
use tower_http::cors::CorsLayer;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt};

pub mod affiliation;
pub mod config;
pub mod content;
pub mod database;
pub mod email;
pub mod error;
pub mod pending;
pub mod routes;
pub mod state;

use routes::{
    affiliate_handler, affiliate_page_handler, contact_page_handler, delete_pending_handler,
    home_page_handler, list_pending_handler, retry_all_handler, retry_one_handler,
};
use state::AppState;

pub async fn start_server() {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    info!("Initializing state...");
    let state = AppState::new().await;

    info!("Starting server...");

    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE])
        .max_age(Duration::from_secs(60 * 60));

    let app = Router::new()
        .route("/pages/home", get(home_page_handler))
        .route("/pages/affiliate", get(affiliate_page_handler))
        .route("/pages/contact", get(contact_page_handler))
        .route("/affiliate", post(affiliate_handler))
        .route("/pending", get(list_pending_handler))
        .route("/pending/retry", post(retry_all_handler))
        .route("/pending/{id}/retry", post(retry_one_handler))
        .route("/pending/{id}", delete(delete_pending_handler))
        .layer(cors)
        .with_state(state.clone());

    let address = format!("0.0.0.0:{}", state.config.port);
    info!("Binding to {address}");

    let listener = TcpListener::bind(&address).await.unwrap();
    info!("Server running on {address}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .unwrap();

    println!("Server shutting down...");
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c().await.expect("Failed to install Ctrl+C handler");

        info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;

        info!("Received terminate signal, shutting down");
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
