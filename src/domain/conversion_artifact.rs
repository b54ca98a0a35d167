use std::path::PathBuf;

/// Output of one converter invocation, consumed once by the active pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConversionArtifact {
    Text(String),
    HtmlFile(PathBuf),
}

impl ConversionArtifact {
    pub fn kind(&self) -> &'static str {
        match self {
            ConversionArtifact::Text(_) => "text",
            ConversionArtifact::HtmlFile(_) => "html",
        }
    }
}
