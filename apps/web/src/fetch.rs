use async_trait::async_trait;
use stock_league_core::{HttpRequest, HttpResponse, Transport, TransportError};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{Headers, Request, RequestInit, RequestMode, Response};

use crate::describe_js_error;

/// `window.fetch` as a [`Transport`].
#[derive(Debug, Default, Clone, Copy)]
pub struct FetchTransport;

#[async_trait(?Send)]
impl Transport for FetchTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let window =
            web_sys::window().ok_or_else(|| TransportError::new("no browser window available"))?;

        let headers = Headers::new().map_err(transport_error)?;
        for (name, value) in &request.headers {
            headers.set(name, value).map_err(transport_error)?;
        }

        let opts = RequestInit::new();
        opts.set_method("GET");
        opts.set_mode(request_mode(&request.url));
        opts.set_headers(&headers);

        let fetch_request =
            Request::new_with_str_and_init(&request.url, &opts).map_err(transport_error)?;

        let response_value = JsFuture::from(window.fetch_with_request(&fetch_request))
            .await
            .map_err(transport_error)?;
        let response = response_value
            .dyn_into::<Response>()
            .map_err(transport_error)?;

        let body = JsFuture::from(response.text().map_err(transport_error)?)
            .await
            .map_err(transport_error)?;

        Ok(HttpResponse::new(
            response.status(),
            body.as_string().unwrap_or_default(),
        ))
    }
}

/// Relative URLs stay same-origin; absolute ones need CORS.
fn request_mode(url: &str) -> RequestMode {
    if url.starts_with("http://") || url.starts_with("https://") {
        RequestMode::Cors
    } else {
        RequestMode::SameOrigin
    }
}

fn transport_error(value: JsValue) -> TransportError {
    TransportError::new(describe_js_error(&value))
}
