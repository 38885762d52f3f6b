// Shared prompt constants and prompt-building utilities.
// Each service that needs LLM calls defines its own prompts.rs alongside it.
// This file contains cross-cutting prompt fragments.

/// System prompt fragment that enforces JSON-only output.
pub const JSON_ONLY_SYSTEM: &str = "You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// Builds a full system instruction from a persona line and the JSON-only rule.
pub fn system_with_persona(persona: &str) -> String {
    format!("{persona} {JSON_ONLY_SYSTEM}")
}
