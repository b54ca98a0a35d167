mod html_formatter;
mod llm_client;
mod pdf_converter;

pub use html_formatter::{FormatterError, HtmlFormatter};
pub use llm_client::{LlmClient, LlmClientError};
pub use pdf_converter::{ConverterError, PdfConverter};
