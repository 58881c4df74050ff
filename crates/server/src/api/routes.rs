use axum::{
    extract::Request,
    middleware::{self, Next},
    response::Response,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use super::{conversions, handlers, janitor};
use crate::state::AppState;

pub fn create_router(state: Arc<AppState>) -> Router {
    // API routes
    let api_routes = Router::new()
        // Health and config
        .route("/health", get(handlers::health))
        .route("/config", get(handlers::get_config))
        .route("/formats", get(handlers::list_formats))
        // Conversions
        .route("/conversions", post(conversions::create_conversion))
        .route("/conversions", get(conversions::list_conversions))
        .route("/conversions/{id}", get(conversions::get_conversion))
        // Janitor
        .route("/janitor/staged", get(janitor::list_staged))
        .route("/janitor/sweep", post(janitor::sweep))
        .with_state(state);

    Router::new()
        .route("/metrics", get(handlers::metrics))
        .nest("/api/v1", api_routes)
        .layer(middleware::from_fn(track_requests))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

async fn track_requests(request: Request, next: Next) -> Response {
    let path = request.uri().path().to_string();
    crate::metrics::HTTP_REQUESTS_TOTAL
        .with_label_values(&[&path])
        .inc();
    next.run(request).await
}
