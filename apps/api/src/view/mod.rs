// Presentation layer: HTML pages, the markdown subset renderer, and the
// ephemeral checklist/panel state that never flows back into the planner.

pub mod checklist;
pub mod handlers;
pub mod markdown;
pub mod pages;
