use std::path::PathBuf;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::application::ports::{ConverterError, PdfConverter};
use crate::domain::{ConversionArtifact, OutputMode, StagedDocument};

use super::poppler_converter::locate_html_output;

/// What [`MockPdfConverter`] does when invoked.
#[derive(Debug, Clone)]
pub enum MockConversion {
    /// Writes the given markup to `<stem>-html.html`, as pdftohtml does in
    /// single-document mode.
    Html(String),
    Text(String),
    ToolMissing,
    Fails(String),
    NoOutput,
}

pub struct MockPdfConverter {
    behaviour: MockConversion,
    staged_dirs: Mutex<Vec<PathBuf>>,
}

impl MockPdfConverter {
    pub fn new(behaviour: MockConversion) -> Self {
        Self {
            behaviour,
            staged_dirs: Mutex::new(Vec::new()),
        }
    }

    /// Temp directories the converter was handed, in call order.
    pub fn staged_dirs(&self) -> Vec<PathBuf> {
        self.staged_dirs
            .lock()
            .map(|dirs| dirs.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl PdfConverter for MockPdfConverter {
    async fn convert(
        &self,
        document: &StagedDocument,
        mode: OutputMode,
    ) -> Result<ConversionArtifact, ConverterError> {
        if let Ok(mut dirs) = self.staged_dirs.lock() {
            dirs.push(document.dir().to_path_buf());
        }

        if !document.pdf_path().exists() {
            return Err(ConverterError::ConversionFailed(format!(
                "staged PDF missing: {}",
                document.pdf_path().display()
            )));
        }

        match (&self.behaviour, mode) {
            (MockConversion::Html(markup), OutputMode::Html) => {
                let path = document.dir().join(format!("{}-html.html", document.stem()));
                tokio::fs::write(&path, markup)
                    .await
                    .map_err(|e| ConverterError::ConversionFailed(e.to_string()))?;
                let located = locate_html_output(document).await?;
                Ok(ConversionArtifact::HtmlFile(located))
            }
            (MockConversion::Text(text), OutputMode::Text) => {
                Ok(ConversionArtifact::Text(text.clone()))
            }
            (MockConversion::ToolMissing, mode) => Err(ConverterError::ToolUnavailable {
                tool: match mode {
                    OutputMode::Text => "pdftotext".to_string(),
                    OutputMode::Html => "pdftohtml".to_string(),
                },
                reason: "No such file or directory (os error 2)".to_string(),
            }),
            (MockConversion::Fails(message), _) => {
                Err(ConverterError::ConversionFailed(message.clone()))
            }
            (MockConversion::NoOutput, _) => {
                locate_html_output(document).await.map(ConversionArtifact::HtmlFile)
            }
            (_, mode) => Err(ConverterError::ConversionFailed(format!(
                "mock not configured for {} mode",
                mode.as_str()
            ))),
        }
    }
}
