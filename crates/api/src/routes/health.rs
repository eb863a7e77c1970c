use axum::{routing::get, Json, Router};
use serde::Serialize;

const WELCOME: &str = "welcome to melody api";

#[derive(Serialize)]
struct WelcomeResponse {
    message: &'static str,
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
}

pub fn router() -> Router {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
}

async fn root() -> Json<WelcomeResponse> {
    Json(WelcomeResponse { message: WELCOME })
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}
