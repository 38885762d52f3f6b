//! Structured shapes returned by the two AI calls.
//!
//! Field names follow the camelCase wire shape requested from the model, so the same
//! types deserialize AI output and serialize API responses.

use serde::{Deserialize, Serialize};

/// How a single input skill is used in the suggested role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillBreakdown {
    pub skill_name: String,
    pub description: String,
}

/// Output of the job-summary call: a role suggestion plus a per-skill breakdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobSummary {
    pub job_title: String,
    pub job_description: String,
    pub skill_breakdown: Vec<SkillBreakdown>,
}

impl JobSummary {
    /// Skill names in breakdown order. May contain duplicates if the model repeated one.
    pub fn skill_names(&self) -> impl Iterator<Item = &str> {
        self.skill_breakdown.iter().map(|s| s.skill_name.as_str())
    }
}

/// Markdown-formatted preparation guide for one skill.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillPlan {
    pub skill_name: String,
    pub plan: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeeklyTask {
    /// Label such as "Week 1".
    pub week: String,
    pub tasks: Vec<String>,
}

/// Output of the study-plan call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudyPlan {
    pub skill_plans: Vec<SkillPlan>,
    pub weekly_todos: Vec<WeeklyTask>,
}
