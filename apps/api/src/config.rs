use anyhow::{ensure, Context, Result};

use crate::planner::options::{parse_label_list, PlannerOptions};

/// Application configuration loaded from environment variables.
/// Fails at startup if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub gemini_api_key: String,
    pub port: u16,
    pub rust_log: String,
    /// Deadline applied to each AI call.
    pub ai_timeout_secs: u64,
    /// Sessions idle longer than this are evicted.
    pub session_idle_minutes: u32,
    pub planner_options: PlannerOptions,
}

/// Upper bound for `SESSION_IDLE_MINUTES` (30 days).
const MAX_SESSION_IDLE_MINUTES: u32 = 30 * 24 * 60;

impl Config {
    pub fn session_idle_ttl(&self) -> chrono::Duration {
        chrono::Duration::minutes(i64::from(self.session_idle_minutes))
    }

    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let defaults = PlannerOptions::default();
        let experience_levels = std::env::var("EXPERIENCE_LEVELS")
            .map(|raw| parse_label_list(&raw))
            .unwrap_or(defaults.experience_levels);
        let prep_times = std::env::var("PREP_TIMES")
            .map(|raw| parse_label_list(&raw))
            .unwrap_or(defaults.prep_times);

        Ok(Config {
            gemini_api_key: require_env("GEMINI_API_KEY")?,
            port: parse_env("PORT", 8080).context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            ai_timeout_secs: parse_env("AI_TIMEOUT_SECS", 120)
                .context("AI_TIMEOUT_SECS must be a whole number of seconds")?,
            session_idle_minutes: check_idle_minutes(
                parse_env("SESSION_IDLE_MINUTES", 60)
                    .context("SESSION_IDLE_MINUTES must be a whole number of minutes")?,
            )?,
            planner_options: PlannerOptions::new(experience_levels, prep_times)
                .context("EXPERIENCE_LEVELS and PREP_TIMES must each list at least one label")?,
        })
    }
}

fn check_idle_minutes(minutes: u32) -> Result<u32> {
    ensure!(
        (1..=MAX_SESSION_IDLE_MINUTES).contains(&minutes),
        "SESSION_IDLE_MINUTES must be between 1 and {MAX_SESSION_IDLE_MINUTES}, got {minutes}"
    );
    Ok(minutes)
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => Ok(raw.trim().parse::<T>()?),
        Err(_) => Ok(default),
    }
}
