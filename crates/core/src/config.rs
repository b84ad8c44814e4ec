/// Listing endpoint served by the league backend.
pub const DEFAULT_LISTING_ENDPOINT: &str = "/api/stocks";

/// Backend address used for local development.
pub const LOCAL_API_BASE: &str = "http://127.0.0.1:5000";

/// Origin that endpoint paths are appended to. Same-origin unless configured.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ApiBase {
    #[default]
    SameOrigin,
    Local,
    Remote(String),
}

impl ApiBase {
    pub fn parse(value: &str) -> Self {
        let value = value.trim();
        if value.is_empty() || value.eq_ignore_ascii_case("same-origin") {
            Self::SameOrigin
        } else if value.eq_ignore_ascii_case("local") || value.eq_ignore_ascii_case("localhost") {
            Self::Local
        } else {
            Self::Remote(value.trim_end_matches('/').to_string())
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::SameOrigin => "",
            Self::Local => LOCAL_API_BASE,
            Self::Remote(url) => url,
        }
    }

    pub fn url(&self, endpoint: &str) -> String {
        if endpoint.starts_with('/') {
            format!("{}{endpoint}", self.as_str())
        } else {
            format!("{}/{endpoint}", self.as_str())
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    pub base: ApiBase,
    pub listing_endpoint: String,
}

impl ApiConfig {
    pub fn new(base: ApiBase) -> Self {
        Self {
            base,
            listing_endpoint: DEFAULT_LISTING_ENDPOINT.to_string(),
        }
    }

    #[must_use]
    pub fn with_listing_endpoint(mut self, endpoint: &str) -> Self {
        let endpoint = endpoint.trim();
        if !endpoint.is_empty() {
            self.listing_endpoint = endpoint.to_string();
        }
        self
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self::new(ApiBase::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_recognises_each_base() {
        assert_eq!(ApiBase::parse(""), ApiBase::SameOrigin);
        assert_eq!(ApiBase::parse("same-origin"), ApiBase::SameOrigin);
        assert_eq!(ApiBase::parse("LOCAL"), ApiBase::Local);
        assert_eq!(ApiBase::parse("localhost"), ApiBase::Local);
        assert_eq!(
            ApiBase::parse("https://league.example.com/"),
            ApiBase::Remote("https://league.example.com".to_string())
        );
    }

    #[test]
    fn url_joins_base_and_endpoint() {
        assert_eq!(ApiBase::SameOrigin.url("/api/stocks"), "/api/stocks");
        assert_eq!(
            ApiBase::Local.url("companies/3"),
            "http://127.0.0.1:5000/companies/3"
        );
        assert_eq!(
            ApiBase::parse("https://league.example.com").url("/companies/drafted"),
            "https://league.example.com/companies/drafted"
        );
    }

    #[test]
    fn blank_listing_endpoint_keeps_the_default() {
        let config = ApiConfig::default().with_listing_endpoint("  ");
        assert_eq!(config.listing_endpoint, DEFAULT_LISTING_ENDPOINT);

        let config = ApiConfig::default().with_listing_endpoint("/companies");
        assert_eq!(config.listing_endpoint, "/companies");
    }
}
