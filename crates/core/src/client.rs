use crate::company::{decode_listing, CompanyRecord};
use crate::config::ApiConfig;
use crate::error::ApiError;
use crate::fallback::fallback_companies;
use crate::transport::{HttpRequest, RequestOptions, Transport};

const DRAFTED_ENDPOINT: &str = "/companies/drafted";

/// League backend client.
///
/// The listing call never fails: any error is logged and replaced by the
/// fallback dataset. Detail and drafted calls hand their errors back.
#[derive(Debug)]
pub struct ApiClient<T> {
    transport: T,
    config: ApiConfig,
}

impl<T: Transport> ApiClient<T> {
    pub const fn new(transport: T, config: ApiConfig) -> Self {
        Self { transport, config }
    }

    pub const fn config(&self) -> &ApiConfig {
        &self.config
    }

    pub const fn transport(&self) -> &T {
        &self.transport
    }

    pub async fn fetch_companies(&self) -> Vec<CompanyRecord> {
        self.fetch_companies_with(&RequestOptions::default()).await
    }

    pub async fn fetch_companies_with(&self, options: &RequestOptions) -> Vec<CompanyRecord> {
        match self.try_fetch_companies(options).await {
            Ok(companies) => {
                tracing::info!(count = companies.len(), "loaded company listing");
                companies
            }
            Err(error) => {
                tracing::error!(
                    endpoint = %self.config.listing_endpoint,
                    base = %self.config.base.as_str(),
                    %error,
                    "company listing failed; using fallback dataset"
                );
                fallback_companies()
            }
        }
    }

    pub async fn company_by_id(&self, id: u32) -> Result<CompanyRecord, ApiError> {
        let body = self
            .request(&format!("/companies/{id}"), &RequestOptions::default())
            .await?;
        Ok(serde_json::from_str(&body)?)
    }

    pub async fn drafted_companies(&self) -> Result<Vec<CompanyRecord>, ApiError> {
        let body = self
            .request(DRAFTED_ENDPOINT, &RequestOptions::default())
            .await?;
        Ok(decode_listing(&body)?)
    }

    async fn try_fetch_companies(
        &self,
        options: &RequestOptions,
    ) -> Result<Vec<CompanyRecord>, ApiError> {
        let body = self.request(&self.config.listing_endpoint, options).await?;
        let companies = decode_listing(&body)?;
        if companies.is_empty() {
            return Err(ApiError::EmptyListing);
        }
        Ok(companies)
    }

    async fn request(&self, endpoint: &str, options: &RequestOptions) -> Result<String, ApiError> {
        let request = HttpRequest {
            url: self.config.base.url(endpoint),
            headers: options.merged_headers(),
        };
        tracing::debug!(url = %request.url, "sending api request");

        let response = self.transport.send(request).await?;
        if !response.is_success() {
            return Err(ApiError::status(response.status, response.body));
        }

        Ok(response.body)
    }
}
