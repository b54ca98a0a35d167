use crate::presentation::config::{Environment, Pipeline, Settings};

pub const DEFAULT_LOG_FILTER: &str = "info,pdf_web_viewer=debug,tower_http=debug";

/// Subscriber options plus the service facts announced once at startup.
pub struct TracingConfig {
    pub environment: Environment,
    pub pipeline: Pipeline,
    pub listen_addr: String,
    pub json_format: bool,
    pub filter: String,
}

impl TracingConfig {
    /// Production logs JSON; elsewhere `enable_json` or `LOG_FORMAT=json` turns
    /// it on. A blank level falls back to [`DEFAULT_LOG_FILTER`].
    pub fn from_settings(settings: &Settings, environment: Environment) -> Self {
        let logging = &settings.logging;
        let filter = if logging.level.trim().is_empty() {
            DEFAULT_LOG_FILTER.to_string()
        } else {
            logging.level.clone()
        };

        Self {
            environment,
            pipeline: settings.conversion.pipeline,
            listen_addr: settings.server.listen_addr(),
            json_format: logging.enable_json
                || environment.is_production()
                || log_format_requests_json(),
            filter,
        }
    }
}

fn log_format_requests_json() -> bool {
    std::env::var("LOG_FORMAT")
        .map(|format| format.eq_ignore_ascii_case("json"))
        .unwrap_or(false)
}
