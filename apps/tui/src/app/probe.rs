use stock_league_core::{ApiConfig, CompanyRecord, HttpRequest, Transport};

/// Absolute URL to request for an image, or `None` when there is nothing to fetch.
pub fn image_url(config: &ApiConfig, src: &str) -> Option<String> {
    let src = src.trim();
    if src.is_empty() || src.starts_with("data:") {
        return None;
    }
    if src.starts_with("http://") || src.starts_with("https://") {
        return Some(src.to_string());
    }
    if let Some(rest) = src.strip_prefix("//") {
        return Some(format!("https://{rest}"));
    }
    Some(config.base.url(src))
}

/// Requests each company image once. Returns the indices whose image failed.
pub async fn probe_images<T: Transport>(
    transport: &T,
    config: &ApiConfig,
    companies: &[CompanyRecord],
) -> Vec<usize> {
    let mut failed = Vec::new();

    for (index, company) in companies.iter().enumerate() {
        let Some(url) = company
            .image_url
            .as_deref()
            .and_then(|src| image_url(config, src))
        else {
            continue;
        };

        match transport.send(HttpRequest::get(url.clone())).await {
            Ok(response) if response.is_success() => {}
            Ok(response) => {
                tracing::warn!(%url, status = response.status, "company image unavailable");
                failed.push(index);
            }
            Err(error) => {
                tracing::warn!(%url, %error, "company image unavailable");
                failed.push(index);
            }
        }
    }

    failed
}
