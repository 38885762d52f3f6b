pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::planner::handlers;
use crate::state::AppState;
use crate::view::handlers as pages;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Planner JSON API
        .route("/api/v1/options", get(handlers::handle_get_options))
        .route("/api/v1/sessions", post(handlers::handle_create_session))
        .route(
            "/api/v1/sessions/:id",
            get(handlers::handle_get_session).delete(handlers::handle_delete_session),
        )
        .route(
            "/api/v1/sessions/:id/events",
            get(handlers::handle_session_events),
        )
        .route(
            "/api/v1/sessions/:id/summary",
            post(handlers::handle_generate_summary),
        )
        .route(
            "/api/v1/sessions/:id/plan",
            post(handlers::handle_generate_plan),
        )
        .route(
            "/api/v1/sessions/:id/skills/toggle",
            post(handlers::handle_toggle_skill),
        )
        .route(
            "/api/v1/sessions/:id/preferences",
            axum::routing::put(handlers::handle_set_preferences),
        )
        // HTML form flow
        .route("/", get(pages::handle_index))
        .route("/sessions/:id", get(pages::handle_page))
        .route("/sessions/:id/summary", post(pages::handle_summary_form))
        .route(
            "/sessions/:id/skills/toggle",
            post(pages::handle_toggle_skill_form),
        )
        .route(
            "/sessions/:id/preferences",
            post(pages::handle_preferences_form),
        )
        .route("/sessions/:id/plan", post(pages::handle_plan_form))
        .route(
            "/sessions/:id/panels/:index/toggle",
            post(pages::handle_toggle_panel),
        )
        .route(
            "/sessions/:id/tasks/:week/:task/toggle",
            post(pages::handle_toggle_task),
        )
        .with_state(state)
}
