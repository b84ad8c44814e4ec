// Company retrieval and card rendering shared by the terminal viewer and the web front-end

pub mod board;
pub mod card;
pub mod client;
pub mod company;
pub mod config;
pub mod error;
pub mod fallback;
pub mod render;
pub mod transport;

pub use board::{BoardCard, CardBoard};
pub use card::{CompanyCard, PanelVisibility};
pub use client::ApiClient;
pub use company::{Breakdown, CompanyRecord};
pub use config::{ApiBase, ApiConfig};
pub use error::ApiError;
pub use render::{render_companies, CardContainer, LOAD_FAILURE_MESSAGE};
pub use transport::{HttpRequest, HttpResponse, RequestOptions, Transport, TransportError};
