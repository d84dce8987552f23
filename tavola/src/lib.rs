//! HTTP service for a restaurant website: the menu, table reservations and contact
//! messages, stored in a document database.
//!
//! # Routes
//!
//! | Method | Path | |
//! |---|---|---|
//! | GET | `/` | greeting |
//! | GET | `/api/hello` | greeting |
//! | GET | `/api/menu` | all menu items, seeding the demo menu on first use |
//! | POST | `/api/reservations` | create a reservation |
//! | POST | `/api/contact` | store a contact message |
//! | GET | `/test` | database diagnostics, always 200 |
//!
//! # Configuration
//!
//! - `PORT` - listen port, default 8000
//! - `DATABASE_URL` - MongoDB connection string, or `memory://` for an in-process store
//! - `DATABASE_NAME` - database holding the collections
//!
//! Without both database variables the service still starts; storage routes answer 500
//! and `/test` reports the missing configuration.
//!
//! # Logging
//!
//! Filtered through `RUST_LOG`, e.g. `RUST_LOG=tavola=debug,tower_http=debug`.

use axum::{
    Router,
    routing::{get, post},
};
use tokio::{
    net::TcpListener,
    signal::{self, ctrl_c},
};
use tower_http::{
    cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer},
    trace::TraceLayer,
};
use tracing::{error, info, warn};

pub mod config;
pub mod diagnostics;
pub mod error;
pub mod extract;
pub mod routes;
pub mod state;

use config::Config;
use diagnostics::test_handler;
use error::ServerError;
use routes::{contact_handler, hello_handler, menu_handler, reservation_handler, root_handler};
use state::AppState;

/// Any origin, method and header, with credentials.
///
/// `*` cannot be combined with credentials, so the request's own values are mirrored.
pub fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(AllowOrigin::mirror_request())
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true)
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(root_handler))
        .route("/api/hello", get(hello_handler))
        .route("/api/menu", get(menu_handler))
        .route("/api/reservations", post(reservation_handler))
        .route("/api/contact", post(contact_handler))
        .route("/test", get(test_handler))
        .layer(cors_layer())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Opens the store, serves until Ctrl+C or SIGTERM, then shuts the store down.
pub async fn run(config: Config) -> Result<(), ServerError> {
    let address = config.socket_addr();

    info!("Initializing state...");
    let state = AppState::connect(config).await;
    let store = state.store.clone();

    let app = router(state);

    info!("Binding to {address}");
    let listener = TcpListener::bind(&address)
        .await
        .map_err(|source| ServerError::Bind {
            address: address.clone(),
            source,
        })?;
    info!("Server running on {address}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(ServerError::Serve)?;

    if let Some(store) = store {
        if let Err(e) = store.shutdown().await {
            warn!("Failed to close database connection: {e}");
        }
    }

    info!("Server stopped");

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        match ctrl_c().await {
            Ok(()) => info!("Received Ctrl+C, shutting down"),
            Err(e) => {
                error!("Failed to install Ctrl+C handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut terminate) => {
                terminate.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                error!("Failed to install signal handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
