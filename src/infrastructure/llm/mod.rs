mod gemini_client;
mod llm_reformatter;
mod mock_llm_client;

pub use gemini_client::{
    Candidate, Content, GeminiClient, GenerateContentRequest, GenerateContentResponse, Part,
    PromptFeedback,
};
pub use llm_reformatter::{LlmReformatter, SYSTEM_INSTRUCTION, build_prompt};
pub use mock_llm_client::MockLlmClient;
