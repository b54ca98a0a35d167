use async_trait::async_trait;

use crate::domain::{ConversionArtifact, OutputMode, StagedDocument};

#[async_trait]
pub trait PdfConverter: Send + Sync {
    async fn convert(
        &self,
        document: &StagedDocument,
        mode: OutputMode,
    ) -> Result<ConversionArtifact, ConverterError>;
}

#[derive(Debug, thiserror::Error)]
pub enum ConverterError {
    #[error("conversion tool unavailable: {tool}: {reason}")]
    ToolUnavailable { tool: String, reason: String },
    #[error("conversion failed: {0}")]
    ConversionFailed(String),
    #[error("no HTML output found for {0}")]
    OutputNotFound(String),
}
