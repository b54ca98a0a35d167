use std::path::{Path, PathBuf};

use uuid::Uuid;

/// A PDF written into a request-owned temporary directory.
///
/// The stem is random so concurrent requests never collide, and the
/// client-supplied filename never reaches the filesystem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StagedDocument {
    dir: PathBuf,
    stem: String,
    pdf_path: PathBuf,
}

impl StagedDocument {
    pub fn new(dir: &Path) -> Self {
        Self::with_stem(dir, Uuid::new_v4().simple().to_string())
    }

    pub fn with_stem(dir: &Path, stem: String) -> Self {
        let pdf_path = dir.join(format!("{stem}.pdf"));
        Self {
            dir: dir.to_path_buf(),
            stem,
            pdf_path,
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn stem(&self) -> &str {
        &self.stem
    }

    pub fn pdf_path(&self) -> &Path {
        &self.pdf_path
    }

    /// Prefix handed to `pdftohtml`; the tool appends its own suffix.
    pub fn output_prefix(&self) -> PathBuf {
        self.dir.join(&self.stem)
    }

    pub fn expected_html_path(&self) -> PathBuf {
        self.dir.join(format!("{}.html", self.stem))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    Text,
    Html,
}

impl OutputMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputMode::Text => "text",
            OutputMode::Html => "html",
        }
    }
}
