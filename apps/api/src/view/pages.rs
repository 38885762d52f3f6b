//! Server-rendered HTML for the three-step planner page.
//!
//! Sections appear as state fills in: skills form always, job profile and planner once a
//! summary exists, study plan once a plan exists.

use uuid::Uuid;

use crate::planner::controller::PlannerState;
use crate::planner::models::{JobSummary, StudyPlan};
use crate::planner::options::PlannerOptions;
use crate::view::checklist::StudyPlanView;
use crate::view::markdown::{html_escape, render_markdown};

const STYLES: &str = r#"
body { font-family: system-ui, sans-serif; background: #f1f5f9; color: #334155; margin: 0; }
header { background: #fff; box-shadow: 0 1px 3px rgba(0,0,0,.1); padding: 1rem 2rem; }
main { max-width: 56rem; margin: 0 auto; padding: 2rem 1rem; }
section { background: #fff; border-radius: .75rem; padding: 1.5rem; margin-bottom: 2rem; box-shadow: 0 4px 6px rgba(0,0,0,.08); }
.error { background: #fee2e2; border: 1px solid #f87171; color: #b91c1c; padding: .75rem 1rem; border-radius: .5rem; margin-bottom: 2rem; }
.chip { border: 2px solid #cbd5e1; background: #fff; border-radius: 999px; padding: .3rem .8rem; margin: .2rem; cursor: pointer; }
.chip.selected { background: #4f46e5; border-color: #4f46e5; color: #fff; }
.done { color: #94a3b8; text-decoration: line-through; }
.panel { border-bottom: 1px solid #e2e8f0; }
.inline { display: inline; }
button[disabled] { opacity: .5; cursor: not-allowed; }
"#;

pub fn render_session_page(
    session_id: Uuid,
    state: &PlannerState,
    view: &StudyPlanView,
    options: &PlannerOptions,
) -> String {
    let base = format!("/sessions/{session_id}");
    let mut body = String::new();

    body.push_str(&render_skill_form(&base, state.summary_loading));

    if let Some(error) = &state.error {
        body.push_str(&format!(
            r#"<div class="error" role="alert"><strong>Error: </strong>{}</div>"#,
            html_escape(error)
        ));
    }

    if let Some(summary) = &state.job_summary {
        body.push_str(&render_job_summary(summary));
        body.push_str(&render_planner(&base, state, summary, options));
    }

    if let Some(plan) = &state.study_plan {
        body.push_str(&render_study_plan(&base, plan, view));
    }

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>Career Catalyst</title>
<style>{STYLES}</style>
</head>
<body>
<header><h1>Career Catalyst</h1><p>Your AI-powered job preparation partner.</p></header>
<main>{body}</main>
</body>
</html>"#
    )
}

fn disabled(flag: bool) -> &'static str {
    if flag {
        " disabled"
    } else {
        ""
    }
}

fn render_skill_form(base: &str, loading: bool) -> String {
    let label = if loading { "Generating…" } else { "Generate Job Profile" };
    format!(
        r#"<section>
<h2>Step 1: Define Your Skills</h2>
<p>Enter a few skills you have, separated by commas, to see what job roles might be a good fit.</p>
<form method="post" action="{base}/summary">
<label for="skills-input">Your Skills (e.g., React, Node.js, AWS)</label>
<textarea id="skills-input" name="skills" rows="3" placeholder="Enter skills here..."{dis}></textarea>
<button type="submit"{dis}>{label}</button>
</form>
</section>"#,
        dis = disabled(loading),
    )
}

fn render_job_summary(summary: &JobSummary) -> String {
    let breakdown: String = summary
        .skill_breakdown
        .iter()
        .map(|item| {
            format!(
                "<div><p><strong>{}</strong></p><p>{}</p></div>",
                html_escape(&item.skill_name),
                html_escape(&item.description)
            )
        })
        .collect();

    format!(
        r#"<section>
<h2>Suggested Job Profile</h2>
<h3>{}</h3>
<p>{}</p>
<h4>How Your Skills Apply:</h4>
{breakdown}
</section>"#,
        html_escape(&summary.job_title),
        html_escape(&summary.job_description),
    )
}

fn render_options(labels: &[String], current: &str) -> String {
    labels
        .iter()
        .map(|label| {
            let selected = if label == current { " selected" } else { "" };
            let label = html_escape(label);
            format!(r#"<option value="{label}"{selected}>{label}</option>"#)
        })
        .collect()
}

fn render_planner(
    base: &str,
    state: &PlannerState,
    summary: &JobSummary,
    options: &PlannerOptions,
) -> String {
    let mut seen: Vec<&str> = Vec::new();
    let chips: String = summary
        .skill_names()
        .filter(|name| {
            if seen.contains(name) {
                false
            } else {
                seen.push(*name);
                true
            }
        })
        .map(|name| {
            let selected = state.selected_skills.contains(name);
            let escaped = html_escape(name);
            format!(
                r#"<form class="inline" method="post" action="{base}/skills/toggle"><input type="hidden" name="skill" value="{escaped}"><button class="chip{class}" type="submit" aria-pressed="{selected}">{mark}{escaped}</button></form>"#,
                class = if selected { " selected" } else { "" },
                mark = if selected { "✓ " } else { "" },
            )
        })
        .collect();

    let generate_disabled = state.plan_loading || state.selected_skills.is_empty();
    let label = if state.plan_loading { "Generating…" } else { "Generate Study Plan" };

    format!(
        r#"<section>
<h2>Step 2: Create Your Plan</h2>
<p>Customize your preparation by selecting the skills to focus on, your experience level, and how much time you have.</p>
<h3>Skills to Practice</h3>
<div>{chips}</div>
<form method="post" action="{base}/plan">
<label for="experience-level">Your Experience Level</label>
<select id="experience-level" name="experienceLevel">{levels}</select>
<label for="prep-time">Preparation Time</label>
<select id="prep-time" name="prepTime">{times}</select>
<button type="submit"{dis}>{label}</button>
</form>
</section>"#,
        levels = render_options(&options.experience_levels, &state.experience_level),
        times = render_options(&options.prep_times, &state.prep_time),
        dis = disabled(generate_disabled),
    )
}

fn render_study_plan(base: &str, plan: &StudyPlan, view: &StudyPlanView) -> String {
    let panels: String = plan
        .skill_plans
        .iter()
        .enumerate()
        .map(|(index, skill_plan)| {
            let open = view.is_expanded(index);
            let content = if open {
                format!("<div>{}</div>", render_markdown(&skill_plan.plan))
            } else {
                String::new()
            };
            format!(
                r#"<div class="panel"><form method="post" action="{base}/panels/{index}/toggle"><button type="submit" aria-expanded="{open}">{arrow} {title}</button></form>{content}</div>"#,
                arrow = if open { "▾" } else { "▸" },
                title = html_escape(&skill_plan.skill_name),
            )
        })
        .collect();

    let weeks: String = view
        .weeks
        .iter()
        .enumerate()
        .map(|(week_index, weekly)| {
            let tasks: String = weekly
                .tasks
                .iter()
                .enumerate()
                .map(|(task_index, task)| {
                    let text = html_escape(&task.text);
                    format!(
                        r#"<li><form class="inline" method="post" action="{base}/tasks/{week_index}/{task_index}/toggle"><button type="submit" aria-label="Mark task as complete: {text}">{check}</button> <span{class}>{text}</span></form></li>"#,
                        check = if task.completed { "☑" } else { "☐" },
                        class = if task.completed { r#" class="done""# } else { "" },
                    )
                })
                .collect();
            format!(
                "<div><h4>{}</h4><ul>{tasks}</ul></div>",
                html_escape(&weekly.week)
            )
        })
        .collect();

    format!(
        r#"<section>
<h2>Step 3: Your Personalized Study Plan</h2>
<p>Follow this guide to get job-ready. Good luck!</p>
<h3>Skill-by-Skill Breakdown</h3>
{panels}
<h3>Weekly To-Do List</h3>
<p>{done} of {total} tasks completed</p>
{weeks}
</section>"#,
        done = view.completed_count(),
        total = view.total_count(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::planner::controller::PlannerState;
    use crate::planner::models::{SkillBreakdown, SkillPlan, WeeklyTask};

    fn summary() -> JobSummary {
        JobSummary {
            job_title: "Frontend <Engineer>".to_string(),
            job_description: "Builds UIs.".to_string(),
            skill_breakdown: vec![
                SkillBreakdown {
                    skill_name: "React".to_string(),
                    description: "Components".to_string(),
                },
                SkillBreakdown {
                    skill_name: "CSS".to_string(),
                    description: "Layout".to_string(),
                },
            ],
        }
    }

    fn plan() -> StudyPlan {
        StudyPlan {
            skill_plans: vec![
                SkillPlan {
                    skill_name: "React".to_string(),
                    plan: "## Hooks\n- **useState**".to_string(),
                },
                SkillPlan {
                    skill_name: "CSS".to_string(),
                    plan: "## Grid".to_string(),
                },
            ],
            weekly_todos: vec![WeeklyTask {
                week: "Week 1".to_string(),
                tasks: vec!["Build a form".to_string()],
            }],
        }
    }

    fn state_with_summary() -> PlannerState {
        let mut state = PlannerState::new(&PlannerOptions::default());
        let ticket = state.begin_summary();
        state.finish_summary(ticket, Ok(summary()));
        state
    }

    #[test]
    fn test_empty_state_renders_only_skill_form() {
        let options = PlannerOptions::default();
        let state = PlannerState::new(&options);
        let html = render_session_page(Uuid::nil(), &state, &StudyPlanView::default(), &options);

        assert!(html.contains("Step 1: Define Your Skills"));
        assert!(!html.contains("Suggested Job Profile"));
        assert!(!html.contains("Step 3"));
        assert!(!html.contains("role=\"alert\""));
    }

    #[test]
    fn test_summary_renders_escaped_profile_and_selected_chips() {
        let options = PlannerOptions::default();
        let mut state = state_with_summary();
        state.toggle_skill("CSS").unwrap();
        let html = render_session_page(Uuid::nil(), &state, &StudyPlanView::default(), &options);

        assert!(html.contains("Frontend &lt;Engineer&gt;"));
        assert!(html.contains(r#"class="chip selected" type="submit" aria-pressed="true">✓ React"#));
        assert!(html.contains(r#"class="chip" type="submit" aria-pressed="false">CSS"#));
        assert!(html.contains(r#"<option value="Entry-level" selected>"#));
    }

    #[test]
    fn test_generate_button_disabled_without_selection() {
        let options = PlannerOptions::default();
        let mut state = state_with_summary();
        state.toggle_skill("React").unwrap();
        state.toggle_skill("CSS").unwrap();
        let html = render_session_page(Uuid::nil(), &state, &StudyPlanView::default(), &options);
        assert!(html.contains("<button type=\"submit\" disabled>Generate Study Plan</button>"));
    }

    #[test]
    fn test_plan_renders_first_panel_open_and_checklist() {
        let options = PlannerOptions::default();
        let mut state = state_with_summary();
        let request = state.begin_plan().unwrap();
        state.finish_plan(request.ticket, Ok(plan()));
        let mut view = StudyPlanView::from_plan(&plan(), state.plan_revision);
        view.toggle_task(0, 0);

        let html = render_session_page(Uuid::nil(), &state, &view, &options);

        assert!(html.contains("<h2>Hooks</h2>"));
        assert!(html.contains("<strong>useState</strong>"));
        assert!(!html.contains("<h2>Grid</h2>"));
        assert!(html.contains(r#"<span class="done">Build a form</span>"#));
        assert!(html.contains("/tasks/0/0/toggle"));
        assert!(html.contains("<p>1 of 1 tasks completed</p>"));
    }

    #[test]
    fn test_error_banner_is_escaped() {
        let options = PlannerOptions::default();
        let mut state = PlannerState::new(&options);
        state.error = Some("<oops>".to_string());
        let html = render_session_page(Uuid::nil(), &state, &StudyPlanView::default(), &options);
        assert!(html.contains("&lt;oops&gt;"));
    }
}
