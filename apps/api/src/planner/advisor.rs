//! Structured AI client: turns the two planner questions into schema-constrained
//! generation requests and parses the answers into typed values.
//!
//! Each call is a single attempt bounded by a deadline. No state, no caching.

use std::sync::Arc;
use std::time::Duration;

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, info};

use crate::llm_client::prompts::system_with_persona;
use crate::llm_client::{strip_json_fences, TextGenerator};
use crate::planner::errors::PlannerError;
use crate::planner::models::{JobSummary, StudyPlan};
use crate::planner::prompts::{
    build_job_summary_prompt, build_study_plan_prompt, job_summary_schema, study_plan_schema,
    JOB_SUMMARY_PERSONA, STUDY_PLAN_PERSONA,
};

#[derive(Clone)]
pub struct StructuredAiClient {
    generator: Arc<dyn TextGenerator>,
    deadline: Duration,
}

impl StructuredAiClient {
    pub fn new(generator: Arc<dyn TextGenerator>, deadline: Duration) -> Self {
        Self {
            generator,
            deadline,
        }
    }

    /// Suggests a job profile for a free-text list of skills.
    pub async fn request_job_summary(&self, raw_skills: &str) -> Result<JobSummary, PlannerError> {
        let prompt = build_job_summary_prompt(raw_skills);
        let summary: JobSummary = self
            .request(&prompt, JOB_SUMMARY_PERSONA, &job_summary_schema())
            .await?;
        info!(
            "Job summary generated: {:?} with {} skills",
            summary.job_title,
            summary.skill_breakdown.len()
        );
        Ok(summary)
    }

    /// Builds a study plan for the selected skills at the given experience level and time budget.
    pub async fn request_study_plan(
        &self,
        skills: &[String],
        experience_level: &str,
        prep_time: &str,
    ) -> Result<StudyPlan, PlannerError> {
        let prompt = build_study_plan_prompt(skills, experience_level, prep_time);
        let plan: StudyPlan = self
            .request(&prompt, STUDY_PLAN_PERSONA, &study_plan_schema())
            .await?;
        info!(
            "Study plan generated: {} skill plans, {} weeks",
            plan.skill_plans.len(),
            plan.weekly_todos.len()
        );
        Ok(plan)
    }

    async fn request<T: DeserializeOwned>(
        &self,
        prompt: &str,
        persona: &str,
        schema: &Value,
    ) -> Result<T, PlannerError> {
        let system = system_with_persona(persona);
        let text = tokio::time::timeout(
            self.deadline,
            self.generator.generate(prompt, &system, schema),
        )
        .await
        .map_err(|_| PlannerError::DeadlineExceeded {
            seconds: self.deadline.as_secs(),
        })??;

        let text = text.ok_or(PlannerError::EmptyResponse)?;
        let text = strip_json_fences(&text);
        if text.is_empty() {
            return Err(PlannerError::EmptyResponse);
        }
        debug!("Parsing {} bytes of structured AI output", text.len());

        Ok(serde_json::from_str(text)?)
    }
}
