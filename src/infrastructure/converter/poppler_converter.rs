use std::ffi::OsString;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::process::{Output, Stdio};
use std::time::Duration;

use async_trait::async_trait;
use tokio::process::Command;

use crate::application::ports::{ConverterError, PdfConverter};
use crate::domain::{ConversionArtifact, OutputMode, StagedDocument};
use crate::presentation::config::ConversionSettings;

/// Runs poppler's `pdftotext` / `pdftohtml` as subprocesses.
pub struct PopplerConverter {
    pdftotext_path: PathBuf,
    pdftohtml_path: PathBuf,
    timeout: Duration,
}

impl PopplerConverter {
    pub fn new(settings: &ConversionSettings) -> Self {
        Self {
            pdftotext_path: PathBuf::from(&settings.pdftotext_path),
            pdftohtml_path: PathBuf::from(&settings.pdftohtml_path),
            timeout: Duration::from_secs(settings.timeout_secs),
        }
    }

    /// Layout-preserving UTF-8 text on stdout.
    pub fn text_args(document: &StagedDocument) -> Vec<OsString> {
        vec![
            "-layout".into(),
            "-enc".into(),
            "UTF-8".into(),
            document.pdf_path().into(),
            "-".into(),
        ]
    }

    /// Single-document HTML without frames or images, written next to the PDF.
    pub fn html_args(document: &StagedDocument) -> Vec<OsString> {
        vec![
            "-s".into(),
            "-i".into(),
            "-noframes".into(),
            "-nomerge".into(),
            "-enc".into(),
            "UTF-8".into(),
            document.pdf_path().into(),
            document.output_prefix().into(),
        ]
    }

    async fn run(&self, tool: &Path, args: Vec<OsString>) -> Result<Output, ConverterError> {
        let tool_name = tool.display().to_string();
        tracing::debug!(tool = %tool_name, ?args, "Running converter");

        let child = Command::new(tool)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| match e.kind() {
                ErrorKind::NotFound | ErrorKind::PermissionDenied => {
                    tracing::error!(tool = %tool_name, error = %e, "Converter binary unavailable");
                    ConverterError::ToolUnavailable {
                        tool: tool_name.clone(),
                        reason: e.to_string(),
                    }
                }
                _ => ConverterError::ConversionFailed(format!("failed to spawn {tool_name}: {e}")),
            })?;

        let output = tokio::time::timeout(self.timeout, child.wait_with_output())
            .await
            .map_err(|_| {
                ConverterError::ConversionFailed(format!(
                    "{tool_name} timed out after {} seconds",
                    self.timeout.as_secs()
                ))
            })?
            .map_err(|e| ConverterError::ConversionFailed(format!("{tool_name} failed: {e}")))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            tracing::warn!(tool = %tool_name, status = %output.status, stderr = %stderr, "Converter failed");
            return Err(ConverterError::ConversionFailed(format!(
                "{tool_name} exited with {}: {stderr}",
                output.status
            )));
        }

        Ok(output)
    }
}

#[async_trait]
impl PdfConverter for PopplerConverter {
    #[tracing::instrument(skip(self, document), fields(stem = document.stem(), mode = mode.as_str()))]
    async fn convert(
        &self,
        document: &StagedDocument,
        mode: OutputMode,
    ) -> Result<ConversionArtifact, ConverterError> {
        match mode {
            OutputMode::Text => {
                let output = self
                    .run(&self.pdftotext_path, Self::text_args(document))
                    .await?;
                let text = decode_utf8_ignoring_errors(&output.stdout);
                tracing::info!(chars = text.len(), "PDF text extraction complete");
                Ok(ConversionArtifact::Text(text))
            }
            OutputMode::Html => {
                self.run(&self.pdftohtml_path, Self::html_args(document))
                    .await?;
                let path = locate_html_output(document).await?;
                tracing::info!(path = %path.display(), "PDF HTML conversion complete");
                Ok(ConversionArtifact::HtmlFile(path))
            }
        }
    }
}

/// Finds the HTML file `pdftohtml` produced for `document`.
///
/// Depending on version and flags the tool writes `<stem>.html` or
/// `<stem>-html.html`, so when the expected name is missing the output
/// directory is scanned for any `<stem>*.html` file.
pub async fn locate_html_output(document: &StagedDocument) -> Result<PathBuf, ConverterError> {
    let expected = document.expected_html_path();
    if tokio::fs::try_exists(&expected).await.unwrap_or(false) {
        return Ok(expected);
    }

    tracing::debug!(
        expected = %expected.display(),
        "Expected HTML output missing, scanning output directory"
    );

    let scan_error = |e: std::io::Error| {
        ConverterError::ConversionFailed(format!(
            "failed to scan {}: {e}",
            document.dir().display()
        ))
    };

    let mut entries = tokio::fs::read_dir(document.dir()).await.map_err(scan_error)?;
    let mut candidates = Vec::new();
    while let Some(entry) = entries.next_entry().await.map_err(scan_error)? {
        let name = entry.file_name();
        let name = name.to_string_lossy();
        if name.starts_with(document.stem()) && name.ends_with(".html") {
            candidates.push(entry.path());
        }
    }
    candidates.sort();

    match candidates.into_iter().next() {
        Some(path) => {
            tracing::info!(path = %path.display(), "Using fallback HTML output");
            Ok(path)
        }
        None => Err(ConverterError::OutputNotFound(document.stem().to_string())),
    }
}

fn decode_utf8_ignoring_errors(bytes: &[u8]) -> String {
    match String::from_utf8(bytes.to_vec()) {
        Ok(text) => text,
        Err(_) => String::from_utf8_lossy(bytes)
            .chars()
            .filter(|&c| c != char::REPLACEMENT_CHARACTER)
            .collect(),
    }
}
