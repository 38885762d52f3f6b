use serde::{Deserialize, Serialize};

use crate::planner::models::JobSummary;

/// Skills the user wants to practice, kept in the order they were added.
///
/// A new job summary seeds the selection with every skill it names (pre-select-all);
/// afterwards only `toggle` changes it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SkillSelection(Vec<String>);

impl SkillSelection {
    /// Selects every skill in the summary's breakdown. Repeated names keep their first position.
    pub fn seeded_from(summary: &JobSummary) -> Self {
        let mut selection = Self::default();
        for name in summary.skill_names() {
            if !selection.contains(name) {
                selection.0.push(name.to_string());
            }
        }
        selection
    }

    /// Removes the skill if selected, otherwise appends it.
    pub fn toggle(&mut self, skill: &str) {
        match self.0.iter().position(|s| s == skill) {
            Some(index) => {
                self.0.remove(index);
            }
            None => self.0.push(skill.to_string()),
        }
    }

    pub fn contains(&self, skill: &str) -> bool {
        self.0.iter().any(|s| s == skill)
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }
}
