use std::sync::Arc;

use tokio::net::TcpListener;

use pdf_web_viewer::application::services::ConversionService;
use pdf_web_viewer::infrastructure::converter::PopplerConverter;
use pdf_web_viewer::infrastructure::observability::{TracingConfig, init_tracing};
use pdf_web_viewer::infrastructure::text_processing::FormatterFactory;
use pdf_web_viewer::presentation::{AppState, Environment, Settings, create_router};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let environment = Environment::from_env().map_err(anyhow::Error::msg)?;
    let settings = Settings::load(environment)?;

    init_tracing(&TracingConfig::from_settings(&settings, environment));

    let converter = Arc::new(PopplerConverter::new(&settings.conversion));
    let formatter = FormatterFactory::create(&settings.conversion, &settings.llm)?;
    let conversion_service = Arc::new(ConversionService::new(converter, formatter));

    tracing::info!(
        formatter = conversion_service.pipeline(),
        allowed_origins = ?settings.cors.allowed_origins,
        "Conversion pipeline ready"
    );

    let addr = settings.server.listen_addr();
    let state = AppState {
        conversion_service,
        settings,
    };

    let router = create_router(state);

    let listener = TcpListener::bind(&addr).await?;
    tracing::info!("Listening on {}", listener.local_addr()?);
    axum::serve(listener, router).await?;

    Ok(())
}
