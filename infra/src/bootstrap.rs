//! Configuration loading and flow wiring

use std::sync::Arc;

use otp_core::services::code_entry::SlotFocus;
use otp_core::services::verification::Navigator;
use otp_core::VerificationFlow;
use otp_shared::config::AppConfig;
use otp_shared::Environment;

use crate::http::HttpVerificationApi;
use crate::store::ConfiguredSessionStore;
use crate::InfrastructureError;

/// Verification flow backed by the HTTP API and the configured store
pub type ConfiguredFlow = VerificationFlow<HttpVerificationApi, ConfiguredSessionStore>;

/// Load `.env.<OTP_ENV>` (or `.env`) and read the configuration
pub fn load_config() -> AppConfig {
    let environment = Environment::from_env();
    match dotenvy::from_filename(environment.env_file()) {
        Ok(path) => tracing::debug!(path = %path.display(), "Loaded environment file"),
        Err(_) => {
            dotenvy::dotenv().ok();
        }
    }
    AppConfig::from_env()
}

/// Build a ready-to-activate flow from `config`
pub async fn build_flow(
    config: &AppConfig,
    navigator: Arc<dyn Navigator>,
    focus: Arc<dyn SlotFocus>,
) -> Result<ConfiguredFlow, InfrastructureError> {
    tracing::info!(
        environment = config.environment.as_str(),
        backend = %config.verification.api.base_url,
        "Building verification flow"
    );

    let api = Arc::new(HttpVerificationApi::new(config.verification.api.clone())?);
    let store = Arc::new(ConfiguredSessionStore::connect(&config.store).await?);

    Ok(VerificationFlow::new(
        api,
        store,
        navigator,
        focus,
        &config.verification,
    ))
}
