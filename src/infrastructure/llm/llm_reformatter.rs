use std::sync::Arc;

use async_trait::async_trait;

use crate::application::ports::{FormatterError, HtmlFormatter, LlmClient};
use crate::domain::{ConversionArtifact, FormattedHtml, OutputMode};
use crate::infrastructure::observability::sanitize_prompt;

pub const SYSTEM_INSTRUCTION: &str = "\
You are an expert at turning text extracted from PDF files into HTML.
Convert the raw text you are given into clean HTML following these rules:

1. Remove every header, footer and page number that came from the original PDF.
2. Wrap the document title in an <h1> tag.
3. Wrap major section headings (for example \"1. Introduction\" or \"ABSTRACT\") in <h2> tags.
4. Wrap subsection headings in <h3> tags.
5. Wrap body paragraphs in <p> tags.
6. Remove meaningless line breaks and extra spaces so the prose reads naturally.
7. Output only the inner content of <body>; do not include <html> or <body> tags.
8. Never add style or class attributes.";

/// Builds the user turn that carries the extracted text.
pub fn build_prompt(raw_text: &str) -> String {
    format!("Format the following text:\n\n---\n{raw_text}\n---")
}

/// Delegates formatting of extracted text to a hosted language model and
/// returns its answer verbatim.
pub struct LlmReformatter {
    client: Arc<dyn LlmClient>,
}

impl LlmReformatter {
    pub fn new(client: Arc<dyn LlmClient>) -> Self {
        Self { client }
    }

    pub async fn reformat(&self, raw_text: &str) -> Result<FormattedHtml, FormatterError> {
        tracing::debug!(preview = %sanitize_prompt(raw_text), "Calling LLM for HTML formatting");

        let html = self
            .client
            .generate(SYSTEM_INSTRUCTION, &build_prompt(raw_text))
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "LLM formatting failed");
                FormatterError::from(e)
            })?;

        tracing::info!(html_chars = html.len(), "LLM formatting complete");
        Ok(FormattedHtml::new(html))
    }
}

#[async_trait]
impl HtmlFormatter for LlmReformatter {
    fn name(&self) -> &'static str {
        "reformat"
    }

    fn required_mode(&self) -> OutputMode {
        OutputMode::Text
    }

    async fn format(&self, artifact: ConversionArtifact) -> Result<FormattedHtml, FormatterError> {
        match artifact {
            ConversionArtifact::Text(text) => self.reformat(&text).await,
            ConversionArtifact::HtmlFile(path) => Err(FormatterError::FormattingFailed(format!(
                "expected extracted text, got HTML file {}",
                path.display()
            ))),
        }
    }
}
