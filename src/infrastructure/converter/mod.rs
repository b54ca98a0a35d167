mod mock_converter;
mod poppler_converter;

pub use mock_converter::{MockConversion, MockPdfConverter};
pub use poppler_converter::{PopplerConverter, locate_html_output};
