//! Presentation-only state for a rendered study plan: which skill panels are expanded
//! and which weekly tasks are ticked off.
//!
//! Nothing here is ever written back to the planner state. The whole view is rebuilt
//! from scratch whenever the plan revision changes.

use serde::Serialize;

use crate::planner::models::StudyPlan;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaskStatus {
    pub text: String,
    pub completed: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WeeklyTaskStatus {
    pub week: String,
    pub tasks: Vec<TaskStatus>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StudyPlanView {
    revision: u64,
    pub expanded: Vec<bool>,
    pub weeks: Vec<WeeklyTaskStatus>,
}

impl StudyPlanView {
    /// First panel expanded, everything else collapsed, no task completed.
    pub fn from_plan(plan: &StudyPlan, revision: u64) -> Self {
        Self {
            revision,
            expanded: (0..plan.skill_plans.len()).map(|i| i == 0).collect(),
            weeks: plan
                .weekly_todos
                .iter()
                .map(|weekly| WeeklyTaskStatus {
                    week: weekly.week.clone(),
                    tasks: weekly
                        .tasks
                        .iter()
                        .map(|text| TaskStatus {
                            text: text.clone(),
                            completed: false,
                        })
                        .collect(),
                })
                .collect(),
        }
    }

    /// Rebuilds the view if the plan changed since it was built. Returns true on rebuild.
    pub fn sync(&mut self, plan: Option<&StudyPlan>, revision: u64) -> bool {
        if self.revision == revision {
            return false;
        }
        *self = match plan {
            Some(plan) => Self::from_plan(plan, revision),
            None => Self {
                revision,
                ..Self::default()
            },
        };
        true
    }

    /// Flips a skill panel. Returns false if there is no such panel.
    pub fn toggle_panel(&mut self, index: usize) -> bool {
        match self.expanded.get_mut(index) {
            Some(open) => {
                *open = !*open;
                true
            }
            None => false,
        }
    }

    /// Flips a task's completion. Returns false if there is no such task.
    pub fn toggle_task(&mut self, week: usize, task: usize) -> bool {
        match self.weeks.get_mut(week).and_then(|w| w.tasks.get_mut(task)) {
            Some(status) => {
                status.completed = !status.completed;
                true
            }
            None => false,
        }
    }

    pub fn is_expanded(&self, index: usize) -> bool {
        self.expanded.get(index).copied().unwrap_or(false)
    }

    pub fn total_count(&self) -> usize {
        self.weeks.iter().map(|w| w.tasks.len()).sum()
    }

    pub fn completed_count(&self) -> usize {
        self.weeks
            .iter()
            .flat_map(|w| &w.tasks)
            .filter(|t| t.completed)
            .count()
    }
}
