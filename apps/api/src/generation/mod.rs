// Program generation: prompt construction and the HTTP generation surface.
// All LLM calls go through llm_client; no direct Anthropic calls here.

pub mod builder;
pub mod handlers;
pub mod prompts;
