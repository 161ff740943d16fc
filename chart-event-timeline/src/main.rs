//! Storm Event Timeline
//!
//! Shows classified rainfall events for several datasets on one shared time
//! axis: a Gantt view with one row per dataset and a histogram of how many
//! datasets are in a storm (or a dry day) at each moment. Zoom and pan act on
//! both views at once, and clicking a merged span opens a capture dialog.
//!
//! Data flow:
//! 1. `build.rs` copies `fixtures/analysis.json` into `OUT_DIR`; when present
//!    it is shown as a demo until the first real classification.
//! 2. "Run analysis" POSTs the dataset ids and parameters; responses are
//!    ordered through the `RequestSequencer` so a slow, older request never
//!    overwrites a newer one.
//! 3. The response is turned into a `TimelineModel` (memoized) and loaded
//!    into the `WindowController`.
//! 4. Every window change, including clearing, is mirrored into
//!    `AppState::visible`, which re-renders both D3 charts.

use dioxus::prelude::*;
use storm_chart_ui::api;
use storm_chart_ui::components::{
    CaptureModal, ChartHeader, ErrorDisplay, HoverReadout, InteractiveChart, LoadingSpinner,
    NoData, ParamsForm, StatusLegend, ZoomToolbar,
};
use storm_chart_ui::js_bridge::{self, GANTT_ROW_HEIGHT, HISTOGRAM_HEIGHT};
use storm_chart_ui::state::AppState;
use storm_core::analysis::{AnalysisRequest, AnalysisResponse};
use storm_timeline::{TimelineModel, CHART_MARGINS};

/// Demo classification result embedded at build time (may be empty).
const DEMO_ANALYSIS_JSON: &str = include_str!(concat!(env!("OUT_DIR"), "/analysis.json"));

/// Chart container DOM element IDs used by D3.js to render into.
const GANTT_ID: &str = "event-timeline-gantt";
const HISTOGRAM_ID: &str = "event-timeline-histogram";

fn main() {
    dioxus_logger::init(dioxus_logger::tracing::Level::INFO).expect("failed to init logger");
    dioxus::LaunchBuilder::new()
        .with_cfg(dioxus::web::Config::new().rootname("event-timeline-root"))
        .launch(App);
}

/// Request a classification for the current datasets and parameters.
///
/// Failures keep the previous result on screen and surface a retryable
/// error. Responses older than one already applied or failed are dropped.
fn run_analysis(mut state: AppState) {
    let dataset_ids = state.dataset_ids.read().clone();
    if dataset_ids.is_empty() {
        state
            .error_msg
            .set(Some("Enter at least one dataset id".to_string()));
        return;
    }
    let request = AnalysisRequest {
        dataset_ids,
        params: state.params.read().clone(),
    };
    let ticket = state.sequencer.write().begin();
    state.loading.set(true);
    state.notice.set(None);
    log::info!("[Storm] analysis {:?} started", ticket);

    spawn(async move {
        let result = api::fetch_analysis(api::API_BASE, &request).await;
        let latest = state.sequencer.read().is_latest(ticket);
        if latest {
            state.loading.set(false);
        }

        match result {
            Ok(response) => {
                if !state.sequencer.write().accept(ticket) {
                    log::info!("[Storm] analysis {:?} superseded, discarding", ticket);
                    return;
                }
                state.error_msg.set(None);
                state.response.set(Some(response));
            }
            Err(e) if latest => {
                log::error!("[Storm] analysis {:?} failed: {}", ticket, e);
                state.sequencer.write().fail(ticket);
                state.error_msg.set(Some(e.to_string()));
            }
            Err(e) => {
                log::warn!("[Storm] analysis {:?} failed after being superseded: {}", ticket, e);
            }
        }
    });
}

#[component]
fn App() -> Element {
    let mut state = use_context_provider(AppState::new);

    // Load the demo fixture on mount
    use_effect(move || {
        if DEMO_ANALYSIS_JSON.trim().is_empty() {
            return;
        }
        match AnalysisResponse::from_json(DEMO_ANALYSIS_JSON) {
            Ok(response) => {
                let mut ids: Vec<_> = response.events.iter().map(|e| e.dataset_id).collect();
                ids.sort_unstable();
                ids.dedup();
                log::info!(
                    "[Storm] demo analysis: {} events across {} datasets",
                    response.events.len(),
                    ids.len()
                );
                state.dataset_ids.set(ids);
                state.response.set(Some(response));
            }
            Err(e) => {
                log::error!("[Storm] demo analysis fixture is invalid: {}", e);
            }
        }
    });

    // Derived structures, rebuilt only when the response or config changes
    let model = use_memo(move || {
        let config = state.config.read();
        match &*state.response.read() {
            Some(response) => TimelineModel::build(response, &config),
            None => TimelineModel::default(),
        }
    });

    // Point the window controller and capture coordinator at the new model
    use_effect(move || {
        let model = model.read();
        state.hover.set(None);
        state.coordinator.set(model.capture_coordinator());
        match model.extent {
            Some(extent) => state.controller.write().load(extent, None),
            None => state.controller.write().clear(),
        }
    });

    // Re-render the Gantt rows whenever the window changes
    use_effect(move || {
        let Some(update) = (state.visible)() else {
            js_bridge::destroy_chart(GANTT_ID);
            return;
        };
        js_bridge::init_charts();
        js_bridge::render_gantt_chart(GANTT_ID, &model.peek().layout, &update);
    });

    // Re-render the concurrency histogram whenever the window changes
    use_effect(move || {
        let Some(update) = (state.visible)() else {
            js_bridge::destroy_chart(HISTOGRAM_ID);
            return;
        };
        js_bridge::init_charts();
        js_bridge::render_concurrency_chart(HISTOGRAM_ID, &model.peek().histogram, &update);
    });

    let has_response = state.response.read().is_some();
    let loading = (state.loading)();
    let model_empty = model.read().is_empty();
    let row_labels: Vec<String> = model
        .read()
        .layout
        .rows
        .iter()
        .map(|row| row.dataset_name.clone())
        .collect();
    let row_count = row_labels.len();
    let gantt_height =
        (CHART_MARGINS.vertical() + row_count.max(1) as f64 * GANTT_ROW_HEIGHT) as u32;

    rsx! {
        div {
            style: "padding: 16px; font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;",

            ChartHeader {
                title: "Storm Event Timeline".to_string(),
                subtitle: "Classified rainfall events per dataset on a shared time axis".to_string(),
            }

            ParamsForm { on_run: move |_| run_analysis(state) }

            if let Some(err) = (state.error_msg)() {
                ErrorDisplay {
                    message: err,
                    on_retry: move |_| run_analysis(state),
                }
            }

            if let Some(notice) = (state.notice)() {
                div {
                    style: "padding: 8px 12px; margin: 8px 0; background: #E8F5E9; color: #2E7D32; border-radius: 4px;",
                    "{notice}"
                }
            }

            if !has_response && loading {
                LoadingSpinner {}
            } else if !has_response {
                p {
                    style: "color: #666;",
                    "Enter dataset ids and run an analysis to see the timeline."
                }
            } else if model_empty {
                NoData {}
            } else {
                ZoomToolbar {}
                StatusLegend {}

                ChartHeader {
                    title: "Events by dataset".to_string(),
                    subtitle: "One row per dataset; bars are events coloured by status".to_string(),
                }
                InteractiveChart {
                    id: GANTT_ID.to_string(),
                    row_count: row_count,
                    loading: loading,
                    min_height: gantt_height,
                }

                ChartHeader {
                    title: "Concurrent activity".to_string(),
                    subtitle: "Datasets in a storm or a dry day at each moment".to_string(),
                }
                InteractiveChart {
                    id: HISTOGRAM_ID.to_string(),
                    loading: loading,
                    min_height: HISTOGRAM_HEIGHT as u32,
                }

                HoverReadout { row_labels: row_labels }
            }

            CaptureModal {}
        }
    }
}
