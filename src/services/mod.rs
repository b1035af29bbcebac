pub mod llm_service;
pub mod normalizer;
pub mod prompt_builder;
pub mod response_extractor;

pub use llm_service::{LlmService, QuestionSource};
