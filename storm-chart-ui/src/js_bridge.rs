//! Typed wrappers around JS interop via `js_sys::eval()`.
//!
//! D3.js chart functions live in `assets/js/*.js` and are loaded at runtime.
//! They are evaluated as globals (no ES modules) and exposed via `window.*`.
//! This module serializes chart data and calls those globals, and reads
//! container geometry back for pointer mapping.

use serde::Serialize;
use storm_core::event::EventStatus;
use storm_timeline::histogram::{peak_count, HistogramPoint};
use storm_timeline::pointer::ContainerRect;
use storm_timeline::rows::StackedLayout;
use storm_timeline::{WindowUpdate, CHART_MARGINS};

// Embed the D3 chart JS files at compile time
static GANTT_CHART_JS: &str = include_str!("../assets/js/gantt-chart.js");
static CONCURRENCY_CHART_JS: &str = include_str!("../assets/js/concurrency-chart.js");

/// Height of one Gantt row in pixels.
pub const GANTT_ROW_HEIGHT: f64 = 28.0;

/// Height of the concurrency chart in pixels.
pub const HISTOGRAM_HEIGHT: f64 = 220.0;

/// Execute arbitrary JS, wrapping in try/catch to avoid panics.
pub fn call_js(code: &str) {
    let wrapped = format!(
        "try {{ {} }} catch(e) {{ console.warn('Storm JS call failed:', e); }}",
        code
    );
    let _ = js_sys::eval(&wrapped);
}

/// Initialize chart scripts with a wait-for-D3 polling loop.
///
/// The scripts are stored on `window` and evaluated at global scope once D3
/// is available, then their entry points are promoted to `window.*`.
/// Safe to call more than once.
pub fn init_charts() {
    let all_js = [GANTT_CHART_JS, CONCURRENCY_CHART_JS].join("\n");

    let store_js = format!(
        "if (!window.__stormChartsReady) {{ window.__stormChartScripts = {}; }}",
        serde_json::to_string(&all_js).unwrap_or_default()
    );
    let _ = js_sys::eval(&store_js);

    let init_js = r#"
        (function() {
            if (window.__stormChartsReady || window.__stormChartsPolling) return;
            window.__stormChartsPolling = true;
            var waitForD3 = setInterval(function() {
                if (typeof d3 !== 'undefined') {
                    clearInterval(waitForD3);
                    (0, eval)(window.__stormChartScripts);
                    delete window.__stormChartScripts;
                    if (typeof renderGanttChart !== 'undefined') window.renderGanttChart = renderGanttChart;
                    if (typeof renderConcurrencyChart !== 'undefined') window.renderConcurrencyChart = renderConcurrencyChart;
                    window.__stormChartsReady = true;
                    console.log('Storm charts initialized');
                }
            }, 100);
        })();
    "#;
    let _ = js_sys::eval(init_js);
}

/// Call `window.<function>` once D3, the chart scripts and the container
/// element are all available.
fn render_when_ready(function: &str, container_id: &str, data_json: &str, config_json: &str) {
    let escaped_data = data_json.replace('\\', "\\\\").replace('\'', "\\'").replace('\n', "");
    let escaped_config = config_json.replace('\\', "\\\\").replace('\'', "\\'").replace('\n', "");
    call_js(&format!(
        r#"
        (function() {{
            var poll = setInterval(function() {{
                if (window.__stormChartsReady &&
                    typeof window.{function} !== 'undefined' &&
                    document.getElementById('{container_id}')) {{
                    clearInterval(poll);
                    try {{
                        window.{function}('{container_id}', '{escaped_data}', '{escaped_config}');
                    }} catch(e) {{ console.error('[Storm] {function} error:', e); }}
                }}
            }}, 100);
        }})();
        "#,
    ));
}

/// Renderer configuration shared by both charts.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ChartConfig {
    margins: storm_timeline::ChartMargins,
    /// Visible window as ms offsets.
    domain: [f64; 2],
    /// Reference epoch as ms since 1970, wall-clock treated as UTC.
    reference_epoch_ms: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    row_height: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    height: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    peak: Option<usize>,
    colors: serde_json::Value,
}

fn chart_config(update: &WindowUpdate) -> ChartConfig {
    ChartConfig {
        margins: CHART_MARGINS,
        domain: [update.window.start, update.window.end],
        reference_epoch_ms: update.reference_epoch.and_utc().timestamp_millis(),
        row_height: None,
        height: None,
        peak: None,
        colors: serde_json::Value::Null,
    }
}

/// Bar colour for an event status.
pub fn status_color(status: EventStatus) -> &'static str {
    match status {
        EventStatus::Event => "#1E88E5",
        EventStatus::PartialEvent => "#90CAF9",
        EventStatus::NoEvent => "#BDBDBD",
    }
}

/// Render the stacked-row Gantt view for the current window.
pub fn render_gantt_chart(container_id: &str, layout: &StackedLayout, update: &WindowUpdate) {
    let data_json = serde_json::to_string(layout).unwrap_or_default();
    let config = ChartConfig {
        row_height: Some(GANTT_ROW_HEIGHT),
        colors: serde_json::json!({
            "Event": status_color(EventStatus::Event),
            "PartialEvent": status_color(EventStatus::PartialEvent),
            "NoEvent": status_color(EventStatus::NoEvent),
        }),
        ..chart_config(update)
    };
    let config_json = serde_json::to_string(&config).unwrap_or_default();
    log::debug!(
        "[Storm] render gantt: {} rows, domain [{:.0}, {:.0}]",
        layout.rows.len(),
        update.window.start,
        update.window.end
    );
    render_when_ready("renderGanttChart", container_id, &data_json, &config_json);
}

/// Render the storm/dry concurrency histogram for the current window.
pub fn render_concurrency_chart(container_id: &str, series: &[HistogramPoint], update: &WindowUpdate) {
    let data_json = serde_json::to_string(series).unwrap_or_default();
    let config = ChartConfig {
        height: Some(HISTOGRAM_HEIGHT),
        peak: Some(peak_count(series)),
        colors: serde_json::json!({ "storm": "#1E88E5", "dry": "#FFB300" }),
        ..chart_config(update)
    };
    let config_json = serde_json::to_string(&config).unwrap_or_default();
    log::debug!("[Storm] render histogram: {} points", series.len());
    render_when_ready("renderConcurrencyChart", container_id, &data_json, &config_json);
}

/// Destroy/clean up a chart in the given container.
pub fn destroy_chart(container_id: &str) {
    call_js(&format!(
        "var el = document.getElementById('{}'); if (el) el.innerHTML = '';",
        container_id
    ));
}

/// Client-space bounding box of a DOM element, if it exists.
pub fn element_rect(id: &str) -> Option<ContainerRect> {
    let element = web_sys::window()?.document()?.get_element_by_id(id)?;
    let rect = element.get_bounding_client_rect();
    Some(ContainerRect {
        left: rect.left(),
        top: rect.top(),
        width: rect.width(),
        height: rect.height(),
    })
}
