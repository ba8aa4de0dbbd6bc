use crate::server::handlers;
use crate::server::middleware::{log_requests, require_api_key};
use crate::server::state::AppState;
use axum::middleware::{from_fn, from_fn_with_state};
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health::health_handler))
        .route("/api/auth/signup", post(handlers::auth::signup_handler))
        .route("/api/auth/login", post(handlers::auth::login_handler))
        .route(
            "/api/bucket-items",
            get(handlers::items::list_items_handler).post(handlers::items::create_item_handler),
        )
        .route(
            "/api/bucket-items/category/:category",
            get(handlers::items::list_by_category_handler),
        )
        .route("/api/bucket-items/reorder", post(handlers::items::reorder_handler))
        .route(
            "/api/bucket-items/archive/all",
            get(handlers::archive::list_archived_handler),
        )
        .route(
            "/api/bucket-items/archive/previous-year",
            post(handlers::archive::archive_previous_year_handler),
        )
        .route(
            "/api/bucket-items/archive/:year",
            get(handlers::archive::list_archived_by_year_handler),
        )
        .route(
            "/api/bucket-items/:id",
            get(handlers::items::get_item_handler)
                .patch(handlers::items::update_item_handler)
                .delete(handlers::items::delete_item_handler),
        )
        .fallback(handlers::health::not_found_handler)
        .layer(from_fn_with_state(state.clone(), require_api_key))
        .layer(from_fn(log_requests))
        .layer(CorsLayer::permissive())
        .with_state(state)
}
