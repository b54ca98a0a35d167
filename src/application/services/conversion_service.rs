use std::sync::Arc;

use crate::application::ports::{ConverterError, FormatterError, HtmlFormatter, PdfConverter};
use crate::domain::{ContentType, FormattedHtml, StagedDocument, UploadedDocument};

const WORKSPACE_PREFIX: &str = "pdf-web-viewer-";

/// Drives one upload through validation, staging, conversion and formatting.
///
/// Every call gets its own temporary directory. It is removed when the call
/// returns, whether conversion succeeded or not.
pub struct ConversionService<C>
where
    C: PdfConverter + ?Sized,
{
    converter: Arc<C>,
    formatter: Arc<dyn HtmlFormatter>,
}

impl<C> ConversionService<C>
where
    C: PdfConverter + ?Sized,
{
    pub fn new(converter: Arc<C>, formatter: Arc<dyn HtmlFormatter>) -> Self {
        Self {
            converter,
            formatter,
        }
    }

    pub fn pipeline(&self) -> &'static str {
        self.formatter.name()
    }

    #[tracing::instrument(
        skip(self, upload),
        fields(
            filename = %upload.filename,
            size_bytes = upload.size_bytes(),
            pipeline = self.formatter.name(),
        )
    )]
    pub async fn convert(&self, upload: &UploadedDocument) -> Result<FormattedHtml, ConversionError> {
        if upload.content_type() != Some(ContentType::Pdf) {
            return Err(ConversionError::InvalidContentType(upload.media_type.clone()));
        }

        let workspace = tempfile::Builder::new()
            .prefix(WORKSPACE_PREFIX)
            .tempdir()
            .map_err(|e| ConversionError::StagingFailed(format!("failed to create temp dir: {e}")))?;

        let staged = StagedDocument::new(workspace.path());
        tokio::fs::write(staged.pdf_path(), &upload.data)
            .await
            .map_err(|e| ConversionError::StagingFailed(format!("failed to write upload: {e}")))?;

        tracing::debug!(path = %staged.pdf_path().display(), "Upload staged");

        let mode = self.formatter.required_mode();
        let artifact = self.converter.convert(&staged, mode).await?;

        tracing::debug!(mode = mode.as_str(), artifact = artifact.kind(), "Conversion finished");

        let html = self.formatter.format(artifact).await?;

        tracing::info!(html_chars = html.as_str().len(), "PDF converted to HTML");

        if let Err(e) = workspace.close() {
            tracing::warn!(error = %e, "Failed to remove conversion workspace");
        }

        Ok(html)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConversionError {
    #[error("invalid content type: {0}")]
    InvalidContentType(String),
    #[error("failed to stage upload: {0}")]
    StagingFailed(String),
    #[error("{tool} is not available: {reason}")]
    ToolUnavailable { tool: String, reason: String },
    #[error("{0}")]
    ConversionFailed(String),
    #[error("HTML file not found after conversion: {0}")]
    OutputNotFound(String),
    #[error("{0}")]
    NormalizationFailed(String),
    #[error("LLM api key is not configured")]
    CredentialMissing,
    #[error("{0}")]
    FormattingFailed(String),
}

impl ConversionError {
    pub fn is_client_error(&self) -> bool {
        matches!(self, ConversionError::InvalidContentType(_))
    }
}

impl From<ConverterError> for ConversionError {
    fn from(error: ConverterError) -> Self {
        match error {
            ConverterError::ToolUnavailable { tool, reason } => {
                ConversionError::ToolUnavailable { tool, reason }
            }
            ConverterError::ConversionFailed(message) => ConversionError::ConversionFailed(message),
            ConverterError::OutputNotFound(prefix) => ConversionError::OutputNotFound(prefix),
        }
    }
}

impl From<FormatterError> for ConversionError {
    fn from(error: FormatterError) -> Self {
        match error {
            FormatterError::NormalizationFailed(message) => {
                ConversionError::NormalizationFailed(message)
            }
            FormatterError::CredentialMissing => ConversionError::CredentialMissing,
            FormatterError::FormattingFailed(message) => ConversionError::FormattingFailed(message),
        }
    }
}
