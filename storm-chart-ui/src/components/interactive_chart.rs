//! Chart container that maps pointer movement to time and spans.

use crate::components::ChartContainer;
use crate::js_bridge;
use crate::state::{AppState, HoverInfo};
use dioxus::prelude::*;
use storm_core::capture::CaptureForm;
use storm_timeline::pointer::{pixel_to_row, pixel_to_time, Pointer};
use storm_timeline::CHART_MARGINS;

#[derive(Props, Clone, PartialEq)]
pub struct InteractiveChartProps {
    /// DOM id the D3 renderer draws into
    pub id: String,
    /// Number of Gantt rows; 0 for charts without rows
    #[props(default = 0)]
    pub row_count: usize,
    #[props(default = false)]
    pub loading: bool,
    #[props(default = 200)]
    pub min_height: u32,
}

/// A [`ChartContainer`] that reports hover position and turns a click on a
/// merged span into a capture.
///
/// Both charts share [`CHART_MARGINS`] with the renderer, so the inverse
/// mapping lines up with the drawn axis.
#[component]
pub fn InteractiveChart(props: InteractiveChartProps) -> Element {
    let mut state = use_context::<AppState>();
    let id = props.id.clone();
    let row_count = props.row_count;

    let on_move = move |evt: MouseEvent| {
        let Some(update) = (state.visible)() else {
            return;
        };
        let Some(rect) = js_bridge::element_rect(&id) else {
            state.hover.set(None);
            return;
        };
        let client = evt.client_coordinates();
        let pointer = Pointer::from_client(client.x, client.y, &rect);
        let point = pixel_to_time(
            pointer,
            &rect,
            &CHART_MARGINS,
            &update.window,
            &update.reference_epoch,
        );
        let resolved = state
            .coordinator
            .write()
            .as_mut()
            .and_then(|coordinator| coordinator.hover(point));
        let row = pixel_to_row(pointer, &rect, &CHART_MARGINS, row_count);
        state
            .hover
            .set(point.map(|point| HoverInfo { point, resolved, row }));
    };

    let on_click = move |_evt: MouseEvent| {
        let request = state
            .coordinator
            .read()
            .as_ref()
            .and_then(|coordinator| coordinator.confirm());
        if let Some(request) = request {
            state.notice.set(None);
            state.capture.set(Some(CaptureForm::from(request)));
        }
    };

    let on_leave = move |_evt: MouseEvent| {
        if let Some(coordinator) = state.coordinator.write().as_mut() {
            coordinator.clear_hover();
        }
        state.hover.set(None);
    };

    let hovering_span = (state.hover)().is_some_and(|hover| hover.resolved.is_some());
    let cursor = if hovering_span { "pointer" } else { "crosshair" };

    rsx! {
        div {
            style: "cursor: {cursor};",
            onmousemove: on_move,
            onclick: on_click,
            onmouseleave: on_leave,
            ChartContainer {
                id: props.id.clone(),
                loading: props.loading,
                min_height: props.min_height,
            }
        }
    }
}
