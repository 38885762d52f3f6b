use anyhow::{bail, Result};
use serde::Serialize;

pub const DEFAULT_EXPERIENCE_LEVELS: &[&str] = &["Entry-level", "Mid-level", "Senior", "Lead"];
pub const DEFAULT_PREP_TIMES: &[&str] = &["1 week", "2 weeks", "1 month", "3 months"];

/// The fixed label sets offered for experience level and preparation time.
/// The first label of each set is the initial choice for a new session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlannerOptions {
    pub experience_levels: Vec<String>,
    pub prep_times: Vec<String>,
}

impl PlannerOptions {
    pub fn new(experience_levels: Vec<String>, prep_times: Vec<String>) -> Result<Self> {
        if experience_levels.is_empty() {
            bail!("At least one experience level must be configured");
        }
        if prep_times.is_empty() {
            bail!("At least one preparation time must be configured");
        }
        Ok(Self {
            experience_levels,
            prep_times,
        })
    }

    pub fn default_experience_level(&self) -> &str {
        self.experience_levels.first().map(String::as_str).unwrap_or_default()
    }

    pub fn default_prep_time(&self) -> &str {
        self.prep_times.first().map(String::as_str).unwrap_or_default()
    }

    pub fn is_experience_level(&self, value: &str) -> bool {
        self.experience_levels.iter().any(|l| l == value)
    }

    pub fn is_prep_time(&self, value: &str) -> bool {
        self.prep_times.iter().any(|t| t == value)
    }
}

impl Default for PlannerOptions {
    fn default() -> Self {
        Self {
            experience_levels: DEFAULT_EXPERIENCE_LEVELS.iter().map(|s| s.to_string()).collect(),
            prep_times: DEFAULT_PREP_TIMES.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// Parses a comma-separated label list, dropping blanks.
pub fn parse_label_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
