mod conversion_artifact;
mod formatted_html;
mod html_node;
mod paragraph_block;
mod staged_document;
mod uploaded_document;

pub use conversion_artifact::ConversionArtifact;
pub use formatted_html::FormattedHtml;
pub use html_node::{HtmlElement, HtmlNode};
pub use paragraph_block::ParagraphBlock;
pub use staged_document::{OutputMode, StagedDocument};
pub use uploaded_document::{ContentType, UploadedDocument};
