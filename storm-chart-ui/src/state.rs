//! Application state managed via Dioxus context.
//!
//! `AppState` bundles all reactive signals into a single struct provided via
//! `use_context_provider`. Child components retrieve it with `use_context::<AppState>()`.

use dioxus::prelude::*;
use storm_core::analysis::{AnalysisParams, AnalysisResponse, RequestSequencer};
use storm_core::capture::CaptureForm;
use storm_core::event::DatasetId;
use storm_timeline::capture::{CaptureCoordinator, ResolvedSpan};
use storm_timeline::pointer::TimePoint;
use storm_timeline::{TimelineConfig, WindowController, WindowUpdate};

/// What the pointer is currently over, for the hover readout.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HoverInfo {
    pub point: TimePoint,
    /// Merged span under the pointer, storms taking precedence.
    pub resolved: Option<ResolvedSpan>,
    /// Gantt row index, when hovering the row chart.
    pub row: Option<usize>,
}

/// Shared application state for the timeline dashboard.
#[derive(Clone, Copy)]
pub struct AppState {
    /// Last applied classification response
    pub response: Signal<Option<AnalysisResponse>>,
    /// Whether a classification request is in flight
    pub loading: Signal<bool>,
    /// Error message from the last failed request
    pub error_msg: Signal<Option<String>>,
    /// Engine configuration
    pub config: Signal<TimelineConfig>,
    /// Datasets to classify
    pub dataset_ids: Signal<Vec<DatasetId>>,
    /// Classification parameters
    pub params: Signal<AnalysisParams>,
    /// Owner of the shared zoom/pan window
    pub controller: Signal<WindowController>,
    /// Latest window broadcast by the controller; both charts render from it
    pub visible: Signal<Option<WindowUpdate>>,
    /// Span resolver for the current model
    pub coordinator: Signal<Option<CaptureCoordinator>>,
    /// Current hover readout
    pub hover: Signal<Option<HoverInfo>>,
    /// Capture being named in the modal
    pub capture: Signal<Option<CaptureForm>>,
    /// Orders overlapping classification requests
    pub sequencer: Signal<RequestSequencer>,
    /// Transient status line (e.g. "Capture saved")
    pub notice: Signal<Option<String>>,
}

impl AppState {
    /// Create a new AppState with default signal values.
    ///
    /// The window controller is created with one observer that mirrors every
    /// window change (including clearing) into `visible`, its only writer.
    pub fn new() -> Self {
        let config = TimelineConfig::default();
        let mut visible = Signal::new(None);
        let mut controller = WindowController::new(&config);
        controller.subscribe(move |update: Option<&WindowUpdate>| visible.set(update.copied()));
        Self {
            response: Signal::new(None),
            loading: Signal::new(false),
            error_msg: Signal::new(None),
            controller: Signal::new(controller),
            config: Signal::new(config),
            dataset_ids: Signal::new(Vec::new()),
            params: Signal::new(AnalysisParams::default()),
            visible,
            coordinator: Signal::new(None),
            hover: Signal::new(None),
            capture: Signal::new(None),
            sequencer: Signal::new(RequestSequencer::new()),
            notice: Signal::new(None),
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
