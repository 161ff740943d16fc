//! Timeline engine for reviewing classified rainfall events.
//!
//! This crate turns an analysis response (events and dry days per dataset)
//! into what the dashboard draws and interacts with:
//!
//! - [`merge`]: dataset-independent storm and dry-day spans
//! - [`histogram`]: how many datasets are active at each boundary
//! - [`rows`]: per-dataset (gap, duration) pairs for the Gantt view
//! - [`window`]: the zoom/pan window shared by both views
//! - [`pointer`]: pixel ↔ time mapping using the shared chart margins
//! - [`capture`]: which span is under the pointer and what a click captures
//!
//! # Usage
//!
//! ```rust
//! use storm_core::analysis::AnalysisResponse;
//! use storm_timeline::{TimelineConfig, TimelineModel, WindowController};
//!
//! let response = AnalysisResponse::from_json(r#"{
//!     "events": [{"id": 1, "datasetId": 1, "datasetName": "North",
//!                 "startTime": "2023-01-01T00:00:00", "endTime": "2023-01-01T06:00:00",
//!                 "status": "Event"}],
//!     "dryDays": []
//! }"#).unwrap();
//!
//! let config = TimelineConfig::default();
//! let model = TimelineModel::build(&response, &config);
//! assert_eq!(model.storm_spans.len(), 1);
//!
//! let mut controller = WindowController::new(&config);
//! controller.load(model.extent.unwrap(), None);
//! controller.zoom_in();
//! assert!(controller.window().unwrap().width() < 6.0 * 3_600_000.0);
//! ```

pub mod capture;
pub mod config;
pub mod extent;
pub mod histogram;
pub mod merge;
pub mod model;
pub mod pointer;
pub mod rows;
pub mod window;

pub use config::{ChartMargins, MergeStrategy, TimelineConfig, CHART_MARGINS, MIN_SEGMENT_MS};
pub use extent::TimeExtent;
pub use model::TimelineModel;
pub use window::{TimeWindow, WindowController, WindowObserver, WindowUpdate};
