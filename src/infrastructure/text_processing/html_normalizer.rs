use std::path::Path;

use async_trait::async_trait;

use crate::application::ports::{FormatterError, HtmlFormatter};
use crate::domain::{ConversionArtifact, FormattedHtml, OutputMode, ParagraphBlock};

use super::html_cleaner::strip_non_content;
use super::html_decoder::decode_html_bytes;
use super::html_tree::parse_html;
use super::paragraph_grouper::group_paragraphs;
use super::text_sanitizer::{collapse_whitespace, decompose_ligatures};

/// Cleans `pdftohtml` output into a sequence of `<p>` blocks.
#[derive(Debug, Default, Clone, Copy)]
pub struct HtmlNormalizer;

impl HtmlNormalizer {
    pub fn new() -> Self {
        Self
    }

    pub async fn normalize_file(&self, path: &Path) -> Result<FormattedHtml, FormatterError> {
        let bytes = tokio::fs::read(path).await.map_err(|e| {
            FormatterError::NormalizationFailed(format!(
                "failed to read {}: {e}",
                path.display()
            ))
        })?;

        tokio::task::spawn_blocking(move || normalize_html(&decode_html_bytes(&bytes)))
            .await
            .map_err(|e| FormatterError::NormalizationFailed(format!("task join error: {e}")))
    }
}

/// Normalizes an HTML document or fragment.
///
/// The result has no document wrapper, no non-content elements and no
/// presentational attributes, and every whitespace run is a single space.
/// Feeding the result back in yields the same paragraphs.
pub fn normalize_html(source: &str) -> FormattedHtml {
    let root = strip_non_content(parse_html(source));
    let body_children = match root.find("body") {
        Some(body) => &body.children,
        None => &root.children,
    };

    let blocks = group_paragraphs(body_children);
    tracing::debug!(paragraphs = blocks.len(), "Regrouped HTML into paragraphs");

    let html = blocks
        .iter()
        .map(ParagraphBlock::to_html)
        .collect::<Vec<_>>()
        .join("\n");

    FormattedHtml::new(collapse_whitespace(&decompose_ligatures(&html)))
}

#[async_trait]
impl HtmlFormatter for HtmlNormalizer {
    fn name(&self) -> &'static str {
        "normalize"
    }

    fn required_mode(&self) -> OutputMode {
        OutputMode::Html
    }

    #[tracing::instrument(skip(self, artifact), fields(artifact = artifact.kind()))]
    async fn format(&self, artifact: ConversionArtifact) -> Result<FormattedHtml, FormatterError> {
        match artifact {
            ConversionArtifact::HtmlFile(path) => self.normalize_file(&path).await,
            ConversionArtifact::Text(_) => Err(FormatterError::NormalizationFailed(
                "expected an HTML artifact, got extracted text".to_string(),
            )),
        }
    }
}
