use color_eyre::eyre::bail;
use color_eyre::Result;
use dotenv::dotenv;
use std::env;
use stock_league_core::{ApiBase, ApiConfig};

pub const API_BASE_VAR: &str = "STOCK_LEAGUE_API_BASE";
pub const LISTING_ENDPOINT_VAR: &str = "STOCK_LEAGUE_LISTING_ENDPOINT";

/// Loads `.env` and builds the backend configuration from the environment.
pub fn init_app_config() -> Result<ApiConfig> {
    // Load environment variables from .env file
    dotenv().ok();

    config_from(
        env::var(API_BASE_VAR).ok(),
        env::var(LISTING_ENDPOINT_VAR).ok(),
    )
}

/// A terminal has no page origin: an unset or blank base means the local
/// backend, and asking for same-origin is an error.
pub fn config_from(base: Option<String>, endpoint: Option<String>) -> Result<ApiConfig> {
    let base = base
        .filter(|value| !value.trim().is_empty())
        .map_or(ApiBase::Local, |value| ApiBase::parse(&value));
    if base == ApiBase::SameOrigin {
        bail!(
            "{API_BASE_VAR}=same-origin only works in the browser; use \"local\" or a full URL"
        );
    }

    let config = ApiConfig::new(base);
    Ok(match endpoint {
        Some(endpoint) => config.with_listing_endpoint(&endpoint),
        None => config,
    })
}
