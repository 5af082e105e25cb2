use std::sync::Arc;

use axum::{middleware, routing::get, Router};
use tower_http::cors::CorsLayer;

pub mod config;
pub mod db;
pub mod domain;
pub mod errors;
pub mod http;
pub mod logging;
pub mod store;

use store::MessageStore;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn MessageStore>,
    pub expose_store_errors: bool,
}

impl AppState {
    pub fn new(store: Arc<dyn MessageStore>, expose_store_errors: bool) -> Self {
        Self {
            store,
            expose_store_errors,
        }
    }
}

pub fn build_app(state: AppState) -> Router {
    Router::new()
        .route("/", get(http::handlers::index))
        .route(
            "/messages",
            get(http::handlers::list_messages).post(http::handlers::create_message),
        )
        .route(
            "/messages/{id}",
            get(http::handlers::get_message)
                .patch(http::handlers::update_message)
                .delete(http::handlers::delete_message),
        )
        .layer(CorsLayer::permissive())
        .layer(middleware::from_fn(logging::request_logging_middleware))
        .with_state(state)
}
