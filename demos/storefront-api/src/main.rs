mod error;
mod routes;
mod state;

use std::sync::{Arc, Mutex};

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

use state::AppState;

#[tokio::main]
async fn main() {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    info!("Initializing Dropcito SDK...");
    let sdk = dropcito_sdk::AsyncDropcitoSdk::builder()
        .build()
        .await
        .expect("Failed to initialize Dropcito SDK");
    info!("SDK ready.");

    let state = Arc::new(AppState {
        sdk,
        catalog: Mutex::new(None),
    });

    let app = Router::new()
        .route("/api/shop", get(routes::shop::get_shop))
        .route("/api/shop/{id}/whatsapp", get(routes::shop::whatsapp_link))
        .route("/api/rates", get(routes::rates::get_rates))
        .route("/api/accounts", get(routes::friends::list_accounts))
        .route("/api/friend-requests", post(routes::friends::send_friend_request))
        .layer(CorsLayer::permissive())
        .with_state(state);

    let addr = "0.0.0.0:3000";
    info!("Listening on http://{addr}");
    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}
