//! Planner state machine: the per-session state and its transitions.
//!
//! Generation is split into `begin_*` (synchronous state change, returns a ticket) and
//! `finish_*` (applies the AI outcome). The caller awaits the AI call in between without
//! holding the state lock, so every other transition stays available meanwhile.
//!
//! Each `begin_*` takes a new request id. A `finish_*` carrying an id that is no longer
//! current is discarded: the last request started wins, not the last one to complete.

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::planner::errors::PlannerError;
use crate::planner::models::{JobSummary, StudyPlan};
use crate::planner::options::PlannerOptions;
use crate::planner::selection::SkillSelection;

pub const SUMMARY_FAILED_MESSAGE: &str =
    "Failed to generate job summary. Please check your input and try again.";
pub const PLAN_FAILED_MESSAGE: &str = "Failed to generate study plan. Please try again later.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SummaryTicket(u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlanTicket(u64);

/// Everything the study-plan call needs, captured when the request starts.
#[derive(Debug, Clone)]
pub struct PlanRequest {
    pub ticket: PlanTicket,
    pub skills: Vec<String>,
    pub experience_level: String,
    pub prep_time: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlannerState {
    pub summary_loading: bool,
    pub plan_loading: bool,
    pub error: Option<String>,
    pub job_summary: Option<JobSummary>,
    pub study_plan: Option<StudyPlan>,
    pub selected_skills: SkillSelection,
    pub experience_level: String,
    pub prep_time: String,
    /// Bumped whenever `study_plan` is replaced or cleared.
    pub plan_revision: u64,
    #[serde(skip)]
    summary_request: u64,
    #[serde(skip)]
    plan_request: u64,
}

impl PlannerState {
    pub fn new(options: &PlannerOptions) -> Self {
        Self {
            summary_loading: false,
            plan_loading: false,
            error: None,
            job_summary: None,
            study_plan: None,
            selected_skills: SkillSelection::default(),
            experience_level: options.default_experience_level().to_string(),
            prep_time: options.default_prep_time().to_string(),
            plan_revision: 0,
            summary_request: 0,
            plan_request: 0,
        }
    }

    /// Starts a job-summary request: resets everything derived from a previous summary.
    ///
    /// Any plan request still in flight is superseded, since its skills came from the
    /// selection being cleared here.
    pub fn begin_summary(&mut self) -> SummaryTicket {
        self.summary_request += 1;
        self.plan_request += 1;
        self.summary_loading = true;
        self.plan_loading = false;
        self.error = None;
        self.job_summary = None;
        self.set_study_plan(None);
        self.selected_skills.clear();
        SummaryTicket(self.summary_request)
    }

    /// Applies the outcome of a job-summary request. Returns false if the ticket was stale.
    pub fn finish_summary(
        &mut self,
        ticket: SummaryTicket,
        outcome: Result<JobSummary, PlannerError>,
    ) -> bool {
        if ticket.0 != self.summary_request {
            debug!(
                "Discarding stale job summary response (request {}, current {})",
                ticket.0, self.summary_request
            );
            return false;
        }

        match outcome {
            Ok(summary) => {
                self.selected_skills = SkillSelection::seeded_from(&summary);
                info!(
                    "Stored job summary {:?}; {} skills pre-selected",
                    summary.job_title,
                    self.selected_skills.len()
                );
                self.job_summary = Some(summary);
            }
            Err(e) => {
                warn!("Job summary generation failed: {e}");
                self.error = Some(SUMMARY_FAILED_MESSAGE.to_string());
            }
        }
        self.summary_loading = false;
        true
    }

    /// Starts a study-plan request from the current selection and preferences.
    ///
    /// With nothing selected, records the corrective message and returns
    /// `InvalidSelection` without touching the loading flags.
    pub fn begin_plan(&mut self) -> Result<PlanRequest, PlannerError> {
        if self.selected_skills.is_empty() {
            self.error = Some(PlannerError::InvalidSelection.to_string());
            return Err(PlannerError::InvalidSelection);
        }

        self.plan_request += 1;
        self.plan_loading = true;
        self.error = None;
        self.set_study_plan(None);

        Ok(PlanRequest {
            ticket: PlanTicket(self.plan_request),
            skills: self.selected_skills.as_slice().to_vec(),
            experience_level: self.experience_level.clone(),
            prep_time: self.prep_time.clone(),
        })
    }

    /// Applies the outcome of a study-plan request. Returns false if the ticket was stale.
    pub fn finish_plan(&mut self, ticket: PlanTicket, outcome: Result<StudyPlan, PlannerError>) -> bool {
        if ticket.0 != self.plan_request {
            debug!(
                "Discarding stale study plan response (request {}, current {})",
                ticket.0, self.plan_request
            );
            return false;
        }

        match outcome {
            Ok(plan) => self.set_study_plan(Some(plan)),
            Err(e) => {
                warn!("Study plan generation failed: {e}");
                self.error = Some(PLAN_FAILED_MESSAGE.to_string());
            }
        }
        self.plan_loading = false;
        true
    }

    /// Flips a skill of the current summary in or out of the selection.
    /// Names the summary does not mention are rejected and leave the selection unchanged.
    pub fn toggle_skill(&mut self, skill: &str) -> Result<(), PlannerError> {
        let known = self
            .job_summary
            .as_ref()
            .is_some_and(|summary| summary.skill_names().any(|name| name == skill));
        if !known {
            return Err(PlannerError::UnknownSkill(skill.to_string()));
        }
        self.selected_skills.toggle(skill);
        Ok(())
    }

    pub fn set_experience_level(
        &mut self,
        options: &PlannerOptions,
        value: &str,
    ) -> Result<(), PlannerError> {
        if !options.is_experience_level(value) {
            return Err(PlannerError::UnknownLabel {
                kind: "experience level",
                value: value.to_string(),
            });
        }
        self.experience_level = value.to_string();
        Ok(())
    }

    pub fn set_prep_time(&mut self, options: &PlannerOptions, value: &str) -> Result<(), PlannerError> {
        if !options.is_prep_time(value) {
            return Err(PlannerError::UnknownLabel {
                kind: "preparation time",
                value: value.to_string(),
            });
        }
        self.prep_time = value.to_string();
        Ok(())
    }

    fn set_study_plan(&mut self, plan: Option<StudyPlan>) {
        if plan.is_none() && self.study_plan.is_none() {
            return;
        }
        self.study_plan = plan;
        self.plan_revision += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::planner::models::{SkillBreakdown, SkillPlan, WeeklyTask};

    fn options() -> PlannerOptions {
        PlannerOptions::default()
    }

    fn summary(names: &[&str]) -> JobSummary {
        JobSummary {
            job_title: "Backend Engineer".to_string(),
            job_description: "...".to_string(),
            skill_breakdown: names
                .iter()
                .map(|n| SkillBreakdown {
                    skill_name: n.to_string(),
                    description: "...".to_string(),
                })
                .collect(),
        }
    }

    fn plan() -> StudyPlan {
        StudyPlan {
            skill_plans: vec![SkillPlan {
                skill_name: "React".to_string(),
                plan: "# React".to_string(),
            }],
            weekly_todos: vec![
                WeeklyTask {
                    week: "Week 1".to_string(),
                    tasks: vec!["Hooks".to_string()],
                },
                WeeklyTask {
                    week: "Week 2".to_string(),
                    tasks: vec!["Testing".to_string()],
                },
            ],
        }
    }

    /// A state with a stored summary, a stored plan and an error.
    fn populated_state() -> PlannerState {
        let mut state = PlannerState::new(&options());
        let ticket = state.begin_summary();
        state.finish_summary(ticket, Ok(summary(&["React", "Node.js"])));
        let request = state.begin_plan().unwrap();
        state.finish_plan(request.ticket, Ok(plan()));
        state.error = Some("old".to_string());
        state
    }

    #[test]
    fn test_new_state_uses_first_labels() {
        let state = PlannerState::new(&options());
        assert_eq!(state.experience_level, "Entry-level");
        assert_eq!(state.prep_time, "1 week");
        assert!(!state.summary_loading && !state.plan_loading);
    }

    #[test]
    fn test_summary_success_preselects_all_skills_in_order() {
        let mut state = PlannerState::new(&options());
        let ticket = state.begin_summary();
        assert!(state.summary_loading);

        assert!(state.finish_summary(ticket, Ok(summary(&["React", "Node.js"]))));
        assert!(!state.summary_loading);
        assert_eq!(state.selected_skills.as_slice(), ["React", "Node.js"]);
        assert_eq!(state.job_summary.unwrap().job_title, "Backend Engineer");
    }

    #[test]
    fn test_begin_summary_clears_previous_results() {
        let mut state = populated_state();
        let revision = state.plan_revision;
        state.begin_summary();

        assert!(state.summary_loading);
        assert!(state.error.is_none());
        assert!(state.job_summary.is_none());
        assert!(state.study_plan.is_none());
        assert!(state.selected_skills.is_empty());
        assert_eq!(state.plan_revision, revision + 1);
    }

    #[test]
    fn test_summary_failure_sets_generic_message() {
        let mut state = PlannerState::new(&options());
        let ticket = state.begin_summary();
        state.finish_summary(ticket, Err(PlannerError::EmptyResponse));

        assert_eq!(state.error.as_deref(), Some(SUMMARY_FAILED_MESSAGE));
        assert!(!state.summary_loading);
        assert!(state.job_summary.is_none());
    }

    #[test]
    fn test_begin_plan_with_empty_selection_short_circuits() {
        let mut state = PlannerState::new(&options());
        let result = state.begin_plan();

        assert!(matches!(result, Err(PlannerError::InvalidSelection)));
        assert_eq!(
            state.error.as_deref(),
            Some("Please select at least one skill to practice.")
        );
        assert!(!state.plan_loading);
    }

    #[test]
    fn test_plan_request_captures_selection_and_preferences() {
        let mut state = PlannerState::new(&options());
        let ticket = state.begin_summary();
        state.finish_summary(ticket, Ok(summary(&["React", "Node.js"])));
        state.toggle_skill("Node.js").unwrap();
        state.set_experience_level(&options(), "Mid-level").unwrap();
        state.set_prep_time(&options(), "2 weeks").unwrap();

        let request = state.begin_plan().unwrap();
        assert_eq!(request.skills, vec!["React".to_string()]);
        assert_eq!(request.experience_level, "Mid-level");
        assert_eq!(request.prep_time, "2 weeks");
        assert!(state.plan_loading);

        assert!(state.finish_plan(request.ticket, Ok(plan())));
        assert_eq!(state.study_plan, Some(plan()));
        assert!(!state.plan_loading);
    }

    #[test]
    fn test_plan_failure_sets_generic_message() {
        let mut state = populated_state();
        let request = state.begin_plan().unwrap();
        assert!(state.study_plan.is_none());
        state.finish_plan(request.ticket, Err(PlannerError::EmptyResponse));

        assert_eq!(state.error.as_deref(), Some(PLAN_FAILED_MESSAGE));
        assert!(state.study_plan.is_none());
        assert!(!state.plan_loading);
    }

    #[test]
    fn test_stale_summary_is_discarded() {
        let mut state = PlannerState::new(&options());
        let first = state.begin_summary();
        let second = state.begin_summary();

        assert!(state.finish_summary(second, Ok(summary(&["Rust"]))));
        assert!(!state.finish_summary(first, Ok(summary(&["React"]))));
        assert_eq!(state.selected_skills.as_slice(), ["Rust"]);
        assert!(!state.summary_loading);
    }

    #[test]
    fn test_stale_failure_does_not_clear_loading_of_newer_request() {
        let mut state = PlannerState::new(&options());
        let first = state.begin_summary();
        let _second = state.begin_summary();

        assert!(!state.finish_summary(first, Err(PlannerError::EmptyResponse)));
        assert!(state.summary_loading);
        assert!(state.error.is_none());
    }

    #[test]
    fn test_new_summary_supersedes_inflight_plan() {
        let mut state = populated_state();
        let plan_request = state.begin_plan().unwrap();
        state.begin_summary();

        assert!(!state.plan_loading);
        assert!(!state.finish_plan(plan_request.ticket, Ok(plan())));
        assert!(state.study_plan.is_none());
    }

    #[test]
    fn test_toggle_does_not_touch_results() {
        let mut state = populated_state();
        let before_summary = state.job_summary.clone();
        let before_plan = state.study_plan.clone();
        state.toggle_skill("React").unwrap();
        state.toggle_skill("React").unwrap();
        assert_eq!(state.selected_skills.as_slice(), ["Node.js", "React"]);
        assert_eq!(state.job_summary, before_summary);
        assert_eq!(state.study_plan, before_plan);
    }

    #[test]
    fn test_toggle_without_summary_is_rejected() {
        let mut state = PlannerState::new(&options());
        assert!(matches!(
            state.toggle_skill("Docker"),
            Err(PlannerError::UnknownSkill(_))
        ));
        assert!(state.selected_skills.is_empty());
        assert!(state.begin_plan().is_err());
        assert!(!state.plan_loading);
    }

    #[test]
    fn test_toggle_of_skill_outside_summary_is_rejected() {
        let mut state = populated_state();
        assert!(state.toggle_skill("Docker").is_err());
        assert_eq!(state.selected_skills.as_slice(), ["React", "Node.js"]);
    }

    #[test]
    fn test_toggle_is_rejected_while_new_summary_loads() {
        let mut state = populated_state();
        state.begin_summary();
        assert!(state.toggle_skill("React").is_err());
        assert!(state.selected_skills.is_empty());
    }

    #[test]
    fn test_stale_plan_is_discarded() {
        let mut state = populated_state();
        let first = state.begin_plan().unwrap();
        state.toggle_skill("Node.js").unwrap();
        let second = state.begin_plan().unwrap();

        let mut older = plan();
        older.skill_plans[0].skill_name = "Node.js".to_string();
        assert!(!state.finish_plan(first.ticket, Ok(older)));
        assert!(state.plan_loading);
        assert!(state.study_plan.is_none());

        assert!(state.finish_plan(second.ticket, Ok(plan())));
        assert!(!state.plan_loading);
        assert_eq!(state.study_plan, Some(plan()));
    }

    #[test]
    fn test_stale_plan_failure_leaves_newer_request_loading() {
        let mut state = populated_state();
        let first = state.begin_plan().unwrap();
        let _second = state.begin_plan().unwrap();

        assert!(!state.finish_plan(first.ticket, Err(PlannerError::EmptyResponse)));
        assert!(state.plan_loading);
        assert!(state.error.is_none());
    }

    #[test]
    fn test_unknown_labels_are_rejected() {
        let mut state = PlannerState::new(&options());
        assert!(matches!(
            state.set_experience_level(&options(), "Wizard"),
            Err(PlannerError::UnknownLabel { .. })
        ));
        assert!(state.set_prep_time(&options(), "10 years").is_err());
        assert_eq!(state.experience_level, "Entry-level");
        assert_eq!(state.prep_time, "1 week");
    }

    #[test]
    fn test_internal_counters_are_not_serialized() {
        let value = serde_json::to_value(PlannerState::new(&options())).unwrap();
        assert!(value.get("summaryRequest").is_none());
        assert_eq!(value["selectedSkills"], serde_json::json!([]));
        assert_eq!(value["planRevision"], 0);
    }
}
