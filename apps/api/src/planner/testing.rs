//! Test doubles for the `TextGenerator` seam.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::oneshot;

use crate::llm_client::{LlmError, TextGenerator};

#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub prompt: String,
    pub system: String,
    pub schema: Value,
}

/// Answers calls from a fixed script, in order, and records every request.
pub struct ScriptedGenerator {
    responses: Mutex<VecDeque<Result<Option<String>, LlmError>>>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl ScriptedGenerator {
    pub fn new(responses: Vec<Result<Option<String>, LlmError>>) -> Self {
        Self {
            responses: Mutex::new(responses.into()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn with_texts<'a>(texts: impl IntoIterator<Item = &'a str>) -> Self {
        Self::new(texts.into_iter().map(|t| Ok(Some(t.to_string()))).collect())
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl TextGenerator for ScriptedGenerator {
    async fn generate(
        &self,
        prompt: &str,
        system: &str,
        schema: &Value,
    ) -> Result<Option<String>, LlmError> {
        self.calls.lock().unwrap().push(RecordedCall {
            prompt: prompt.to_string(),
            system: system.to_string(),
            schema: schema.clone(),
        });
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Ok(None))
    }
}

/// Never answers. Used with paused time to exercise deadlines.
pub struct StalledGenerator;

#[async_trait]
impl TextGenerator for StalledGenerator {
    async fn generate(&self, _: &str, _: &str, _: &Value) -> Result<Option<String>, LlmError> {
        futures::future::pending().await
    }
}

/// Holds each call open until the test releases it, so completion order can be chosen.
pub struct GatedGenerator {
    gates: Mutex<VecDeque<oneshot::Receiver<String>>>,
    calls: Mutex<Vec<String>>,
}

impl GatedGenerator {
    /// Returns the generator and one release handle per expected call, in call order.
    pub fn new(expected_calls: usize) -> (Self, Vec<oneshot::Sender<String>>) {
        let (senders, receivers): (Vec<_>, VecDeque<_>) =
            (0..expected_calls).map(|_| oneshot::channel()).unzip();
        (
            Self {
                gates: Mutex::new(receivers),
                calls: Mutex::new(Vec::new()),
            },
            senders,
        )
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// Yields to the scheduler until at least `n` calls have arrived.
    pub async fn wait_for_calls(&self, n: usize) {
        while self.call_count() < n {
            tokio::task::yield_now().await;
        }
    }
}

#[async_trait]
impl TextGenerator for GatedGenerator {
    async fn generate(
        &self,
        prompt: &str,
        _system: &str,
        _schema: &Value,
    ) -> Result<Option<String>, LlmError> {
        let gate = {
            self.calls.lock().unwrap().push(prompt.to_string());
            self.gates.lock().unwrap().pop_front()
        };
        match gate {
            Some(gate) => Ok(gate.await.ok()),
            None => Ok(None),
        }
    }
}

pub const SUMMARY_REACT_NODE: &str = r#"{
    "jobTitle": "Backend Engineer",
    "jobDescription": "Builds and operates web services.",
    "skillBreakdown": [
        {"skillName": "React", "description": "Internal dashboards"},
        {"skillName": "Node.js", "description": "API services"}
    ]
}"#;

pub const SUMMARY_RUST: &str = r#"{
    "jobTitle": "Systems Engineer",
    "jobDescription": "Writes low-level services.",
    "skillBreakdown": [
        {"skillName": "Rust", "description": "Core services"}
    ]
}"#;

pub const PLAN_REACT: &str = r####"{
    "skillPlans": [
        {"skillName": "React", "plan": "## Week focus\n- **Hooks** and *state*"}
    ],
    "weeklyTodos": [
        {"week": "Week 1", "tasks": ["Review hooks", "Build a form"]},
        {"week": "Week 2", "tasks": ["Study rendering", "Mock interview"]}
    ]
}"####;
