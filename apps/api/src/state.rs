use crate::planner::advisor::StructuredAiClient;
use crate::planner::session::SessionStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// In-memory sessions, each owning one planner state. Carries the configured label sets.
    pub sessions: SessionStore,
    /// Structured AI client shared by every session. Stateless; safe to clone.
    pub advisor: StructuredAiClient,
}
