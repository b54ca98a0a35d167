use std::sync::Arc;

use crate::application::ports::{HtmlFormatter, LlmClientError};
use crate::infrastructure::llm::{GeminiClient, LlmReformatter};
use crate::presentation::config::{ConversionSettings, LlmSettings, Pipeline};

use super::html_normalizer::HtmlNormalizer;

#[derive(Debug, thiserror::Error)]
pub enum FormatterFactoryError {
    #[error("GEMINI_API_KEY is required for the reformat pipeline")]
    CredentialMissing,
    #[error("formatter initialization failed: {0}")]
    InitializationFailed(String),
}

pub struct FormatterFactory;

impl FormatterFactory {
    pub fn create(
        conversion: &ConversionSettings,
        llm: &LlmSettings,
    ) -> Result<Arc<dyn HtmlFormatter>, FormatterFactoryError> {
        match conversion.pipeline {
            Pipeline::Normalize => {
                tracing::info!("Using HTML normalizer pipeline");
                Ok(Arc::new(HtmlNormalizer::new()))
            }
            Pipeline::Reformat => {
                let client = GeminiClient::new(llm).map_err(|e| match e {
                    LlmClientError::CredentialMissing => FormatterFactoryError::CredentialMissing,
                    other => FormatterFactoryError::InitializationFailed(other.to_string()),
                })?;
                tracing::info!(model = %llm.model, "Using LLM reformatter pipeline");
                Ok(Arc::new(LlmReformatter::new(Arc::new(client))))
            }
        }
    }
}
