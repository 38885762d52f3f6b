//! Sessions: one planner state per browser flow, observable by subscribers.
//!
//! State lives behind a mutex that is only held for synchronous transitions; every
//! change is published on a watch channel. Generation runs on spawned tasks so a
//! dropped HTTP request cannot abandon a call half-way and leave a loading flag set.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use chrono::{DateTime, Duration, Utc};
use dashmap::DashMap;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::planner::advisor::StructuredAiClient;
use crate::planner::controller::PlannerState;
use crate::planner::options::PlannerOptions;
use crate::view::checklist::StudyPlanView;

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

pub struct Session {
    id: Uuid,
    created_at: DateTime<Utc>,
    last_active: Mutex<DateTime<Utc>>,
    options: Arc<PlannerOptions>,
    state: Mutex<PlannerState>,
    changes: watch::Sender<PlannerState>,
    /// Presentation-only; synced from the plan revision, never read by the controller.
    view: Mutex<StudyPlanView>,
}

impl Session {
    pub fn new(options: Arc<PlannerOptions>) -> Self {
        let state = PlannerState::new(&options);
        let (changes, _) = watch::channel(state.clone());
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            created_at: now,
            last_active: Mutex::new(now),
            options,
            state: Mutex::new(state),
            changes,
            view: Mutex::new(StudyPlanView::default()),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn last_active(&self) -> DateTime<Utc> {
        *lock(&self.last_active)
    }

    pub fn options(&self) -> &PlannerOptions {
        &self.options
    }

    pub fn snapshot(&self) -> PlannerState {
        lock(&self.state).clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<PlannerState> {
        self.changes.subscribe()
    }

    /// Applies a transition and publishes the resulting state.
    pub fn update<R>(&self, transition: impl FnOnce(&mut PlannerState) -> R) -> R {
        let mut state = lock(&self.state);
        let result = transition(&mut state);
        self.changes.send_replace(state.clone());
        *lock(&self.last_active) = Utc::now();
        result
    }

    /// Runs `f` against the study-plan view, rebuilt first if the plan has changed.
    pub fn with_view<R>(&self, f: impl FnOnce(&mut StudyPlanView, &PlannerState) -> R) -> R {
        let state = lock(&self.state);
        let mut view = lock(&self.view);
        view.sync(state.study_plan.as_ref(), state.plan_revision);
        f(&mut view, &state)
    }
}

/// Runs the job-summary flow for a session and returns the resulting snapshot.
pub async fn generate_summary(
    session: &Session,
    advisor: &StructuredAiClient,
    raw_skills: &str,
) -> PlannerState {
    let ticket = session.update(PlannerState::begin_summary);
    debug!("Session {}: job summary request started", session.id());

    let outcome = advisor.request_job_summary(raw_skills).await;
    session.update(|state| state.finish_summary(ticket, outcome));
    session.snapshot()
}

/// Runs the study-plan flow for a session and returns the resulting snapshot.
/// With an empty selection no request is made; the state carries the corrective message.
pub async fn generate_plan(session: &Session, advisor: &StructuredAiClient) -> PlannerState {
    let request = match session.update(PlannerState::begin_plan) {
        Ok(request) => request,
        Err(e) => {
            debug!("Session {}: study plan not requested: {e}", session.id());
            return session.snapshot();
        }
    };
    debug!(
        "Session {}: study plan request started for {} skills",
        session.id(),
        request.skills.len()
    );

    let outcome = advisor
        .request_study_plan(&request.skills, &request.experience_level, &request.prep_time)
        .await;
    session.update(|state| state.finish_plan(request.ticket, outcome));
    session.snapshot()
}

pub fn spawn_summary_generation(
    session: Arc<Session>,
    advisor: StructuredAiClient,
    raw_skills: String,
) -> JoinHandle<PlannerState> {
    tokio::spawn(async move { generate_summary(&session, &advisor, &raw_skills).await })
}

pub fn spawn_plan_generation(
    session: Arc<Session>,
    advisor: StructuredAiClient,
) -> JoinHandle<PlannerState> {
    tokio::spawn(async move { generate_plan(&session, &advisor).await })
}

/// In-memory session registry. Nothing is persisted.
#[derive(Clone)]
pub struct SessionStore {
    sessions: Arc<DashMap<Uuid, Arc<Session>>>,
    options: Arc<PlannerOptions>,
}

impl SessionStore {
    pub fn new(options: PlannerOptions) -> Self {
        Self {
            sessions: Arc::new(DashMap::new()),
            options: Arc::new(options),
        }
    }

    pub fn options(&self) -> &PlannerOptions {
        &self.options
    }

    pub fn create(&self) -> Arc<Session> {
        let session = Arc::new(Session::new(self.options.clone()));
        self.sessions.insert(session.id(), session.clone());
        info!("Session {} created ({} active)", session.id(), self.sessions.len());
        session
    }

    pub fn get(&self, id: Uuid) -> Option<Arc<Session>> {
        self.sessions.get(&id).map(|entry| entry.value().clone())
    }

    pub fn remove(&self, id: Uuid) -> bool {
        self.sessions.remove(&id).is_some()
    }

    /// Drops sessions idle for longer than `max_idle`. Returns how many were removed.
    pub fn prune_idle(&self, max_idle: Duration) -> usize {
        let Some(cutoff) = Utc::now().checked_sub_signed(max_idle) else {
            warn!("Idle cutoff {max_idle} is out of range; skipping prune");
            return 0;
        };
        let before = self.sessions.len();
        self.sessions.retain(|_, session| session.last_active() >= cutoff);
        let removed = before.saturating_sub(self.sessions.len());
        if removed > 0 {
            info!("Pruned {removed} idle sessions");
        }
        removed
    }
}
