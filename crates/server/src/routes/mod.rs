use axum::{
    routing::{delete, get, post},
    Json, Router,
};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use common::types::Health;

use crate::state::ServerState;

pub mod shops;

pub async fn health() -> Json<Health> {
    Json(Health::ok())
}

/// Build the full application router: health plus the shop API.
pub fn build_router(state: ServerState, cors: CorsLayer) -> Router {
    let api = Router::new()
        .route("/api/shops", get(shops::list).post(shops::create))
        .route("/api/shops/:id", get(shops::get_one).delete(shops::remove))
        .route("/api/shops/:id/like", post(shops::like))
        .route("/api/shops/:id/unlike", post(shops::unlike))
        .route("/api/shops/:id/comments", post(shops::add_comment))
        .route("/api/shops/:id/comments/:comment_id", delete(shops::remove_comment));

    Router::new()
        .route("/health", get(health))
        .merge(api)
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
