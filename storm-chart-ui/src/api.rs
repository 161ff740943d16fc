//! Browser HTTP client for the classification and capture endpoints.
//!
//! Requests go through `window.fetch` via `web_sys`; JS exceptions are turned
//! into `anyhow` errors so callers can surface them as retryable messages.

use storm_core::analysis::{AnalysisRequest, AnalysisResponse, ANALYSIS_PATH};
use storm_core::capture::{NamedCapture, CAPTURES_PATH};
use storm_core::TimelineError;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{Headers, Request, RequestInit, Response};

/// Base URL of the storm analysis API, fixed at compile time.
pub const API_BASE: &str = match option_env!("STORM_API_BASE") {
    Some(base) => base,
    None => "/api",
};

fn js_error(value: JsValue) -> anyhow::Error {
    let message = value
        .as_string()
        .or_else(|| {
            value
                .dyn_ref::<js_sys::Error>()
                .map(|e| String::from(e.message()))
        })
        .unwrap_or_else(|| format!("{:?}", value));
    anyhow::anyhow!("Request failed: {}", message)
}

/// POST a JSON body and return the response text.
///
/// Non-2xx responses become [`TimelineError::HttpStatus`] carrying the body
/// text as the message.
async fn post_json(url: &str, body: &str) -> anyhow::Result<String> {
    let window = web_sys::window().ok_or_else(|| anyhow::anyhow!("No browser window"))?;

    let headers = Headers::new().map_err(js_error)?;
    headers
        .set("Content-Type", "application/json")
        .map_err(js_error)?;

    let init = RequestInit::new();
    init.set_method("POST");
    init.set_headers(&headers);
    init.set_body(&JsValue::from_str(body));

    let request = Request::new_with_str_and_init(url, &init).map_err(js_error)?;
    let response: Response = JsFuture::from(window.fetch_with_request(&request))
        .await
        .map_err(js_error)?
        .dyn_into()
        .map_err(|_| anyhow::anyhow!("fetch did not return a Response"))?;

    let text = JsFuture::from(response.text().map_err(js_error)?)
        .await
        .map_err(js_error)?
        .as_string()
        .unwrap_or_default();

    if !response.ok() {
        let message = if text.is_empty() {
            response.status_text()
        } else {
            text
        };
        return Err(TimelineError::HttpStatus {
            status: response.status(),
            message,
        }
        .into());
    }
    Ok(text)
}

/// Run the upstream classification for the given datasets and parameters.
pub async fn fetch_analysis(base: &str, request: &AnalysisRequest) -> anyhow::Result<AnalysisResponse> {
    let url = format!("{}{}", base.trim_end_matches('/'), ANALYSIS_PATH);
    let body = serde_json::to_string(request)?;
    log::info!(
        "[Storm API] POST {} for {} datasets",
        url,
        request.dataset_ids.len()
    );
    let text = post_json(&url, &body).await?;
    let response = AnalysisResponse::from_json(&text)?;
    log::info!(
        "[Storm API] received {} events, {} dry days",
        response.events.len(),
        response.dry_days.len()
    );
    Ok(response)
}

/// Persist a validated capture.
pub async fn save_capture(base: &str, capture: &NamedCapture) -> anyhow::Result<()> {
    let url = format!("{}{}", base.trim_end_matches('/'), CAPTURES_PATH);
    let body = serde_json::to_string(capture)?;
    log::info!("[Storm API] POST {} ({} '{}')", url, capture.kind, capture.name);
    post_json(&url, &body).await?;
    Ok(())
}
