use crate::handlers;
use crate::state::AppState;
use axum::{routing::{get, post}, Router};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/card", get(handlers::card))
        .route("/search", post(handlers::search_form))
        .route("/save", post(handlers::save_form))
        .route("/reload", post(handlers::reload_form))
        .route("/dismiss", post(handlers::dismiss_form))
        .route("/api/state", get(handlers::get_state))
        .route("/api/dashboard", get(handlers::get_dashboard))
        .route("/api/search", post(handlers::search))
        .route("/api/choice", post(handlers::choose))
        .route("/api/save", post(handlers::save_selection))
        .route("/api/assignments", post(handlers::save_assignment))
        .route("/api/reload", post(handlers::reload))
        .route("/api/dismiss", post(handlers::dismiss))
        .with_state(state)
}
