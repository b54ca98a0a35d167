mod formatter_factory;
mod html_cleaner;
mod html_decoder;
mod html_normalizer;
mod html_tree;
mod paragraph_grouper;
mod text_sanitizer;

pub use formatter_factory::{FormatterFactory, FormatterFactoryError};
pub use html_cleaner::strip_non_content;
pub use html_decoder::decode_html_bytes;
pub use html_normalizer::{HtmlNormalizer, normalize_html};
pub use html_tree::parse_html;
pub use paragraph_grouper::group_paragraphs;
pub use text_sanitizer::{collapse_whitespace, decompose_ligatures, escape_text};
