// Evaluation: prompt construction, the model call, and reply parsing.
// All LLM calls go through llm_client — no direct Anthropic calls here.

pub mod evaluator;
pub mod parser;
pub mod prompt_builder;
pub mod prompts;
