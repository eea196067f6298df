pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::awards::handlers as awards;
use crate::catalog::handlers as catalog;
use crate::discovery::handlers as discovery;
use crate::history::handlers as history;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Catalog
        .route("/api/v1/genres", get(catalog::handle_list_genres))
        .route(
            "/api/v1/catalog/works/:external_id",
            get(catalog::handle_work_detail),
        )
        // Discovery
        .route("/api/v1/discovery/next", get(discovery::handle_next_item))
        .route(
            "/api/v1/discovery/decision",
            post(discovery::handle_decision),
        )
        // History
        .route("/api/v1/history", get(history::handle_history))
        .route("/api/v1/liked", get(history::handle_list_liked))
        .route("/api/v1/liked/export", get(history::handle_export_liked))
        .route(
            "/api/v1/liked/:external_id",
            get(history::handle_liked_detail).delete(history::handle_remove_liked),
        )
        .route("/api/v1/profile/stats", get(history::handle_profile_stats))
        // Awards
        .route("/api/v1/awards", get(awards::handle_list_awards))
        .with_state(state)
}
