mod console;
mod dom;
mod fetch;
mod mounts;

use std::cell::RefCell;

use serde::Serialize;
use stock_league_core::company::records_from_entries;
use stock_league_core::{
    render_companies, ApiClient, ApiConfig, CompanyRecord, LOAD_FAILURE_MESSAGE,
};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::Element;

use crate::dom::DomContainer;
use crate::fetch::FetchTransport;
use crate::mounts::Mounts;

const CONTAINER_ID: &str = "companies";

thread_local! {
    // A container keeps its click/error handlers alive until its root leaves the page.
    static MOUNTED: RefCell<Mounts<DomContainer>> = const { RefCell::new(Mounts::new()) };
}

fn main() {
    console::init_tracing();

    spawn_local(async {
        if let Err(error) = bootstrap().await {
            tracing::error!(error = %describe_js_error(&error), "company list bootstrap failed");
            show_failure();
        }
    });
}

async fn bootstrap() -> Result<(), JsValue> {
    let root = container_element()?;
    let companies = client().fetch_companies().await;
    mount(root, &companies)
}

fn client() -> ApiClient<FetchTransport> {
    ApiClient::new(FetchTransport, ApiConfig::default())
}

fn container_element() -> Result<Element, JsValue> {
    web_sys::window()
        .and_then(|window| window.document())
        .and_then(|document| document.get_element_by_id(CONTAINER_ID))
        .ok_or_else(|| JsValue::from_str(&format!("missing #{CONTAINER_ID} container")))
}

/// Renders into `root`, reusing the container already mounted there.
fn mount(root: Element, companies: &[CompanyRecord]) -> Result<(), JsValue> {
    MOUNTED.with(|mounted| {
        let mut mounted = mounted.borrow_mut();
        let container = mounted.get_or_insert(&root, || DomContainer::new(root.clone()))?;
        render_companies(container, companies)
    })
}

fn show_failure() {
    if let Ok(root) = container_element() {
        root.set_text_content(Some(LOAD_FAILURE_MESSAGE));
    }
}

pub(crate) fn describe_js_error(value: &JsValue) -> String {
    value.dyn_ref::<js_sys::Error>().map_or_else(
        || value.as_string().unwrap_or_else(|| format!("{value:?}")),
        |error| String::from(error.message()),
    )
}

/// Fetches the company listing, falling back to the built-in dataset.
#[wasm_bindgen(js_name = fetchCompanies)]
pub async fn fetch_companies() -> Result<JsValue, JsValue> {
    let companies = client().fetch_companies().await;
    Ok(companies.serialize(&serde_wasm_bindgen::Serializer::json_compatible())?)
}

/// Replaces the children of `container` with one card per company.
///
/// Entries are read as loosely as the listing endpoint's: only a non-array argument is rejected.
#[wasm_bindgen(js_name = renderCompanies)]
pub fn render_companies_into(container: Element, companies: JsValue) -> Result<(), JsValue> {
    let entries: Vec<serde_json::Value> = serde_wasm_bindgen::from_value(companies)?;
    mount(container, &records_from_entries(entries))
}
