mod environment;
mod settings;

pub use environment::{ENVIRONMENT_VAR, Environment};
pub use settings::{
    CREDENTIAL_ENV_VARS, ConversionSettings, CorsSettings, LlmSettings, LoggingSettings, Pipeline,
    ServerSettings, Settings,
};
