use std::sync::Arc;

use axum::{
    routing::{get, patch},
    Json, Router,
};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use common::types::Health;
use service::prices::PriceStore;

use crate::openapi::{PricesApiDoc, SayApiDoc};

pub mod prices;
pub mod say;

pub use say::SayState;

pub const OPENAPI_PATH: &str = "/api-docs/openapi.json";
pub const DOCS_PATH: &str = "/docs";

#[utoipa::path(get, path = "/health", tag = "health", responses((status = 200, description = "OK", body = crate::openapi::HealthResponse)))]
pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

pub fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Router for the price service: CRUD over both collections, health and docs.
pub fn build_prices_router(store: Arc<PriceStore>, cors: CorsLayer) -> Router {
    let api = Router::new()
        .route("/prices/:collection", get(prices::list).post(prices::create))
        .route(
            "/prices/:collection/:id",
            patch(prices::update_price).delete(prices::delete),
        )
        .with_state(store);

    let app = Router::new()
        .route("/health", get(health))
        .merge(api)
        .merge(SwaggerUi::new(DOCS_PATH).url(OPENAPI_PATH, PricesApiDoc::openapi()));

    with_http_layers(app, cors)
}

/// Router for the relay service in front of the say function.
pub fn build_say_router(state: SayState, cors: CorsLayer) -> Router {
    let api = Router::new().route("/say", get(say::say)).with_state(state);

    let app = Router::new()
        .route("/health", get(health))
        .merge(api)
        .merge(SwaggerUi::new(DOCS_PATH).url(OPENAPI_PATH, SayApiDoc::openapi()));

    with_http_layers(app, cors)
}

fn with_http_layers(app: Router, cors: CorsLayer) -> Router {
    app.layer(cors).layer(
        TraceLayer::new_for_http()
            // one INFO span per request
            .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
            .on_request(DefaultOnRequest::new().level(Level::INFO))
            .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
            // 5xx
            .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
    )
}
