use stock_league_core::{ApiClient, ApiError, CompanyRecord, Transport};
use stock_league_tui::cli::Source;

use crate::app::probe::probe_images;

/// Result of one load: the companies to show and which of their images failed.
#[derive(Debug)]
pub struct LoadedBoard {
    pub companies: Result<Vec<CompanyRecord>, ApiError>,
    pub failed_images: Vec<usize>,
}

/// Fetches `source` and, when `probe` is set, checks every card image once.
///
/// The listing never fails; the drafted and single-company sources hand
/// their errors back for the caller to show.
pub async fn load_board<T: Transport>(
    client: &ApiClient<T>,
    source: Source,
    probe: bool,
) -> LoadedBoard {
    let companies = match source {
        Source::Listing => Ok(client.fetch_companies().await),
        Source::Drafted => client.drafted_companies().await,
        Source::Company(id) => client.company_by_id(id).await.map(|company| vec![company]),
    };

    let failed_images = match &companies {
        Ok(companies) if probe => {
            probe_images(client.transport(), client.config(), companies).await
        }
        _ => Vec::new(),
    };

    LoadedBoard {
        companies,
        failed_images,
    }
}
