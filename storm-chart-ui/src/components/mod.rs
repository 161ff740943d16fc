//! Reusable Dioxus RSX components for the storm timeline dashboard.

mod capture_modal;
mod chart_container;
mod chart_header;
mod error_display;
mod hover_readout;
mod interactive_chart;
mod legend;
mod loading_spinner;
mod no_data;
mod params_form;
mod zoom_toolbar;

pub use capture_modal::CaptureModal;
pub use chart_container::ChartContainer;
pub use chart_header::ChartHeader;
pub use error_display::ErrorDisplay;
pub use hover_readout::HoverReadout;
pub use interactive_chart::InteractiveChart;
pub use legend::StatusLegend;
pub use loading_spinner::LoadingSpinner;
pub use no_data::NoData;
pub use params_form::{parse_dataset_ids, ParamsForm};
pub use zoom_toolbar::ZoomToolbar;
