pub mod health;
pub mod page;

use axum::{
    routing::{get, post},
    Router,
};

use crate::contact::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/", get(page::page_handler))
        .route("/contact", post(handlers::handle_contact_submit))
        .with_state(state)
}
