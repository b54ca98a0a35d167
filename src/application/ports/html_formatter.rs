use async_trait::async_trait;

use crate::domain::{ConversionArtifact, FormattedHtml, OutputMode};

use super::LlmClientError;

/// Turns a conversion artifact into the HTML handed back to the client.
///
/// Each formatter declares which converter output it consumes, so the
/// service can pick the right tool before invoking it.
#[async_trait]
pub trait HtmlFormatter: Send + Sync {
    fn name(&self) -> &'static str;

    fn required_mode(&self) -> OutputMode;

    async fn format(&self, artifact: ConversionArtifact) -> Result<FormattedHtml, FormatterError>;
}

#[derive(Debug, thiserror::Error)]
pub enum FormatterError {
    #[error("normalization failed: {0}")]
    NormalizationFailed(String),
    #[error("api key is not configured")]
    CredentialMissing,
    #[error("formatting failed: {0}")]
    FormattingFailed(String),
}

impl From<LlmClientError> for FormatterError {
    fn from(error: LlmClientError) -> Self {
        match error {
            LlmClientError::CredentialMissing => FormatterError::CredentialMissing,
            other => FormatterError::FormattingFailed(other.to_string()),
        }
    }
}
