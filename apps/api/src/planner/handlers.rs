//! Axum route handlers for the Planner JSON API.

use std::convert::Infallible;
use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::sse::{Event, KeepAlive, Sse},
    Json,
};
use chrono::{DateTime, Utc};
use futures::stream::{self, Stream, StreamExt};
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use crate::errors::AppError;
use crate::planner::controller::PlannerState;
use crate::planner::options::PlannerOptions;
use crate::planner::session::{spawn_plan_generation, spawn_summary_generation, Session};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponse {
    pub session_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub state: PlannerState,
}

#[derive(Debug, Deserialize)]
pub struct SummaryRequest {
    pub skills: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToggleSkillRequest {
    pub skill_name: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreferencesRequest {
    pub experience_level: Option<String>,
    pub prep_time: Option<String>,
}

fn session_or_404(state: &AppState, id: Uuid) -> Result<Arc<Session>, AppError> {
    state
        .sessions
        .get(id)
        .ok_or_else(|| AppError::session_not_found(id))
}

fn respond(session: &Session, state: PlannerState) -> Json<SessionResponse> {
    Json(SessionResponse {
        session_id: session.id(),
        created_at: session.created_at(),
        state,
    })
}

/// Applies whichever preferences are present. Validates both before changing either.
pub fn apply_preferences(session: &Session, request: &PreferencesRequest) -> Result<(), AppError> {
    let options = session.options();
    session.update(|state| -> Result<(), AppError> {
        let mut next = state.clone();
        if let Some(level) = &request.experience_level {
            next.set_experience_level(options, level)?;
        }
        if let Some(time) = &request.prep_time {
            next.set_prep_time(options, time)?;
        }
        *state = next;
        Ok(())
    })
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/options
pub async fn handle_get_options(State(state): State<AppState>) -> Json<PlannerOptions> {
    Json(state.sessions.options().clone())
}

/// POST /api/v1/sessions
pub async fn handle_create_session(
    State(state): State<AppState>,
) -> (StatusCode, Json<SessionResponse>) {
    let session = state.sessions.create();
    let snapshot = session.snapshot();
    (StatusCode::CREATED, respond(&session, snapshot))
}

/// GET /api/v1/sessions/:id
pub async fn handle_get_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionResponse>, AppError> {
    let session = session_or_404(&state, id)?;
    Ok(respond(&session, session.snapshot()))
}

/// DELETE /api/v1/sessions/:id
pub async fn handle_delete_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    if state.sessions.remove(id) {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::session_not_found(id))
    }
}

/// GET /api/v1/sessions/:id/events
///
/// Streams the current snapshot, then one event per state change.
pub async fn handle_session_events(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Sse<impl Stream<Item = Result<Event, Infallible>>>, AppError> {
    let session = session_or_404(&state, id)?;
    let mut changes = session.subscribe();
    let initial = changes.borrow_and_update().clone();

    let updates = stream::unfold(changes, |mut changes| async move {
        changes.changed().await.ok()?;
        let snapshot = changes.borrow_and_update().clone();
        Some((snapshot, changes))
    });

    let events = stream::once(async move { initial })
        .chain(updates)
        .map(|snapshot| Ok(snapshot_event(&snapshot)));

    Ok(Sse::new(events).keep_alive(KeepAlive::default()))
}

fn snapshot_event(snapshot: &PlannerState) -> Event {
    Event::default()
        .event("state")
        .json_data(snapshot)
        .unwrap_or_else(|e| Event::default().event("error").data(e.to_string()))
}

/// POST /api/v1/sessions/:id/summary
///
/// Runs the job-summary call to completion. AI failures do not fail the request:
/// they show up as `state.error` in the returned snapshot.
pub async fn handle_generate_summary(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<SummaryRequest>,
) -> Result<Json<SessionResponse>, AppError> {
    let skills = request.skills.trim();
    if skills.is_empty() {
        return Err(AppError::Validation("skills cannot be empty".to_string()));
    }

    let session = session_or_404(&state, id)?;
    let snapshot =
        spawn_summary_generation(session.clone(), state.advisor.clone(), skills.to_string())
            .await?;
    Ok(respond(&session, snapshot))
}

/// POST /api/v1/sessions/:id/plan
///
/// Runs the study-plan call for the current selection. An empty selection makes no call
/// and returns the corrective message in `state.error`.
pub async fn handle_generate_plan(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionResponse>, AppError> {
    let session = session_or_404(&state, id)?;
    let snapshot = spawn_plan_generation(session.clone(), state.advisor.clone()).await?;
    Ok(respond(&session, snapshot))
}

/// POST /api/v1/sessions/:id/skills/toggle
pub async fn handle_toggle_skill(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<ToggleSkillRequest>,
) -> Result<Json<SessionResponse>, AppError> {
    let session = session_or_404(&state, id)?;
    session.update(|s| s.toggle_skill(&request.skill_name))?;
    debug!("Session {id}: toggled skill {:?}", request.skill_name);
    Ok(respond(&session, session.snapshot()))
}

/// PUT /api/v1/sessions/:id/preferences
pub async fn handle_set_preferences(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<PreferencesRequest>,
) -> Result<Json<SessionResponse>, AppError> {
    let session = session_or_404(&state, id)?;
    apply_preferences(&session, &request)?;
    Ok(respond(&session, session.snapshot()))
}
