// Career planner: structured AI calls, per-session state machine, skill selection.
// All LLM calls go through llm_client via the StructuredAiClient; no direct HTTP calls here.

pub mod advisor;
pub mod controller;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod options;
pub mod prompts;
pub mod selection;
pub mod session;

#[cfg(test)]
pub mod testing;
