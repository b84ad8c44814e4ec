use crate::company::{CompanyRecord, PLACEHOLDER_IMAGE_URL};

const FALLBACK_COMPANIES: [(&str, &str); 5] = [
    ("Meta Platforms", "META"),
    ("Apple", "AAPL"),
    ("Microsoft", "MSFT"),
    ("Amazon", "AMZN"),
    ("NVIDIA", "NVDA"),
];

/// Companies shown when the listing endpoint cannot be used.
pub fn fallback_companies() -> Vec<CompanyRecord> {
    FALLBACK_COMPANIES
        .iter()
        .zip(1_u32..)
        .map(|((name, ticker), id)| CompanyRecord {
            image_url: Some(PLACEHOLDER_IMAGE_URL.to_string()),
            ..CompanyRecord::new(id, name, ticker)
        })
        .collect()
}
