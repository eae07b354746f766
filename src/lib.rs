// Helpdesk Router - Bilingual help-desk ticket triage
// Library exports

pub mod classifier; // LLM classification, prompts and parsing
pub mod config;
pub mod errors;
pub mod knowledge; // Canned resolutions per category and language
pub mod language;
pub mod metrics;
pub mod providers; // Gemini / OpenAI-compatible backends
pub mod router;
pub mod server; // HTTP surface
pub mod triage;
