// All LLM prompt constants and response schemas for the planner.
// Reuses cross-cutting fragments from llm_client::prompts.

use serde_json::{json, Value};

/// Persona for the job-summary call.
pub const JOB_SUMMARY_PERSONA: &str = "You are a career coach.";

/// Job summary prompt template. Replace `{skills}` before sending.
pub const JOB_SUMMARY_PROMPT_TEMPLATE: &str = r#"Based on the following skills: "{skills}", generate a suitable job title, a brief job description, and a breakdown of how each skill is used in that role. Ensure the skill names in the breakdown match the input skills."#;

/// Persona for the study-plan call.
pub const STUDY_PLAN_PERSONA: &str = "You are an expert technical tutor.";

/// Study plan prompt template.
/// Replace: {skills}, {experience_level}, {prep_time}
pub const STUDY_PLAN_PROMPT_TEMPLATE: &str = r#"Create a detailed study plan for a job candidate with the following profile:
- Skills to practice: {skills}
- Current experience level: {experience_level}
- Total preparation time: {prep_time}

Your response must include two parts:
1. A detailed, step-by-step preparation plan for each individual skill. Use markdown for clear formatting (headings, lists, bold text).
2. A weekly to-do list that breaks down the preparation into actionable tasks over the specified time frame."#;

/// Response schema for the job-summary call (Gemini OpenAPI subset).
pub fn job_summary_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "jobTitle": {
                "type": "STRING",
                "description": "A suitable job title for the given skills."
            },
            "jobDescription": {
                "type": "STRING",
                "description": "A brief, one-paragraph summary of the job role."
            },
            "skillBreakdown": {
                "type": "ARRAY",
                "description": "A breakdown for each skill provided.",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "skillName": {
                            "type": "STRING",
                            "description": "The name of the skill."
                        },
                        "description": {
                            "type": "STRING",
                            "description": "How this skill is typically used in the specified job role."
                        }
                    },
                    "required": ["skillName", "description"]
                }
            }
        },
        "required": ["jobTitle", "jobDescription", "skillBreakdown"]
    })
}

/// Response schema for the study-plan call.
pub fn study_plan_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "skillPlans": {
                "type": "ARRAY",
                "description": "A detailed preparation plan for each selected skill.",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "skillName": {
                            "type": "STRING",
                            "description": "The name of the skill."
                        },
                        "plan": {
                            "type": "STRING",
                            "description": "A detailed, step-by-step preparation guide for this skill, formatted with markdown for readability."
                        }
                    },
                    "required": ["skillName", "plan"]
                }
            },
            "weeklyTodos": {
                "type": "ARRAY",
                "description": "A weekly to-do list based on the total preparation time.",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "week": {
                            "type": "STRING",
                            "description": "The week number, e.g., 'Week 1'."
                        },
                        "tasks": {
                            "type": "ARRAY",
                            "description": "A list of actionable tasks for that week.",
                            "items": { "type": "STRING" }
                        }
                    },
                    "required": ["week", "tasks"]
                }
            }
        },
        "required": ["skillPlans", "weeklyTodos"]
    })
}

pub fn build_job_summary_prompt(raw_skills: &str) -> String {
    JOB_SUMMARY_PROMPT_TEMPLATE.replace("{skills}", raw_skills)
}

pub fn build_study_plan_prompt(skills: &[String], experience_level: &str, prep_time: &str) -> String {
    STUDY_PLAN_PROMPT_TEMPLATE
        .replace("{skills}", &skills.join(", "))
        .replace("{experience_level}", experience_level)
        .replace("{prep_time}", prep_time)
}
