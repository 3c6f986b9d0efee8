// Coach endpoints: thin prompt wrappers over the LLM collaborator.
// All completion calls go through llm_client — no direct API calls here.

pub mod handlers;
pub mod interview;
pub mod prompts;
