//! HTML form routes. Every POST redirects back to the session page (303).

use axum::{
    extract::{Path, State},
    response::{Html, Redirect},
    Form,
};
use serde::Deserialize;
use tracing::debug;
use uuid::Uuid;

use crate::errors::AppError;
use crate::planner::handlers::{apply_preferences, PreferencesRequest};
use crate::planner::session::{spawn_plan_generation, spawn_summary_generation, Session};
use crate::state::AppState;
use crate::view::pages::render_session_page;

#[derive(Debug, Deserialize)]
pub struct SkillsForm {
    pub skills: String,
}

#[derive(Debug, Deserialize)]
pub struct ToggleSkillForm {
    pub skill: String,
}

fn session_page(id: Uuid) -> Redirect {
    Redirect::to(&format!("/sessions/{id}"))
}

fn find_session(state: &AppState, id: Uuid) -> Result<std::sync::Arc<Session>, AppError> {
    state
        .sessions
        .get(id)
        .ok_or_else(|| AppError::session_not_found(id))
}

/// GET /
///
/// Starts a fresh session and sends the browser to its page.
pub async fn handle_index(State(state): State<AppState>) -> Redirect {
    let session = state.sessions.create();
    session_page(session.id())
}

/// GET /sessions/:id
pub async fn handle_page(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Html<String>, AppError> {
    let session = find_session(&state, id)?;
    let html = session.with_view(|view, planner| {
        render_session_page(id, planner, view, session.options())
    });
    Ok(Html(html))
}

/// POST /sessions/:id/summary
///
/// Blank input is ignored; the page is shown again unchanged.
pub async fn handle_summary_form(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Form(form): Form<SkillsForm>,
) -> Result<Redirect, AppError> {
    let session = find_session(&state, id)?;
    let skills = form.skills.trim();
    if skills.is_empty() {
        debug!("Session {id}: ignoring blank skills submission");
        return Ok(session_page(id));
    }

    spawn_summary_generation(session, state.advisor.clone(), skills.to_string()).await?;
    Ok(session_page(id))
}

/// POST /sessions/:id/skills/toggle
pub async fn handle_toggle_skill_form(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Form(form): Form<ToggleSkillForm>,
) -> Result<Redirect, AppError> {
    let session = find_session(&state, id)?;
    if let Err(e) = session.update(|s| s.toggle_skill(&form.skill)) {
        debug!("Session {id}: ignoring skill toggle: {e}");
    }
    Ok(session_page(id))
}

/// POST /sessions/:id/preferences
pub async fn handle_preferences_form(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Form(form): Form<PreferencesRequest>,
) -> Result<Redirect, AppError> {
    let session = find_session(&state, id)?;
    apply_preferences(&session, &form)?;
    Ok(session_page(id))
}

/// POST /sessions/:id/plan
///
/// The plan form carries the experience and time selects; they are applied first.
pub async fn handle_plan_form(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Form(form): Form<PreferencesRequest>,
) -> Result<Redirect, AppError> {
    let session = find_session(&state, id)?;
    apply_preferences(&session, &form)?;
    spawn_plan_generation(session, state.advisor.clone()).await?;
    Ok(session_page(id))
}

/// POST /sessions/:id/panels/:index/toggle
pub async fn handle_toggle_panel(
    State(state): State<AppState>,
    Path((id, index)): Path<(Uuid, usize)>,
) -> Result<Redirect, AppError> {
    let session = find_session(&state, id)?;
    if !session.with_view(|view, _| view.toggle_panel(index)) {
        return Err(AppError::NotFound(format!("Plan panel {index} not found")));
    }
    Ok(session_page(id))
}

/// POST /sessions/:id/tasks/:week/:task/toggle
pub async fn handle_toggle_task(
    State(state): State<AppState>,
    Path((id, week, task)): Path<(Uuid, usize, usize)>,
) -> Result<Redirect, AppError> {
    let session = find_session(&state, id)?;
    if !session.with_view(|view, _| view.toggle_task(week, task)) {
        return Err(AppError::NotFound(format!(
            "Task {task} of week {week} not found"
        )));
    }
    Ok(session_page(id))
}
