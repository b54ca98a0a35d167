use std::sync::Arc;

use crate::application::ports::PdfConverter;
use crate::application::services::ConversionService;
use crate::presentation::config::Settings;

pub struct AppState<C>
where
    C: PdfConverter + ?Sized,
{
    pub conversion_service: Arc<ConversionService<C>>,
    pub settings: Settings,
}

impl<C> Clone for AppState<C>
where
    C: PdfConverter + ?Sized,
{
    fn clone(&self) -> Self {
        Self {
            conversion_service: Arc::clone(&self.conversion_service),
            settings: self.settings.clone(),
        }
    }
}
