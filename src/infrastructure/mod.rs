pub mod converter;
pub mod llm;
pub mod observability;
pub mod text_processing;
