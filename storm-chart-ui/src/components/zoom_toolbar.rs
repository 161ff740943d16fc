//! Zoom and pan controls for the shared time window.

use crate::state::AppState;
use dioxus::prelude::*;
use storm_utils::dates;

const BUTTON_STYLE: &str = "padding: 4px 10px; min-width: 36px;";

/// Toolbar driving the [`WindowController`](storm_timeline::WindowController).
///
/// Every button mutates the controller; the controller broadcasts the new
/// window to its observers, which is what re-renders both charts.
#[component]
pub fn ZoomToolbar() -> Element {
    let mut state = use_context::<AppState>();
    let visible = (state.visible)();
    let disabled = visible.is_none();

    let range_label = visible
        .map(|update| {
            let start = dates::add_millis(&update.reference_epoch, update.window.start);
            let end = dates::add_millis(&update.reference_epoch, update.window.end);
            format!(
                "{} to {}",
                dates::format_display(&start),
                dates::format_display(&end)
            )
        })
        .unwrap_or_default();

    rsx! {
        div {
            style: "display: flex; gap: 6px; align-items: center; margin: 8px 0;",
            button {
                style: BUTTON_STYLE,
                title: "Pan left",
                disabled: disabled,
                onclick: move |_| state.controller.write().pan_left(),
                "◀"
            }
            button {
                style: BUTTON_STYLE,
                title: "Zoom in",
                disabled: disabled,
                onclick: move |_| state.controller.write().zoom_in(),
                "+"
            }
            button {
                style: BUTTON_STYLE,
                title: "Zoom out",
                disabled: disabled,
                onclick: move |_| state.controller.write().zoom_out(),
                "−"
            }
            button {
                style: BUTTON_STYLE,
                title: "Pan right",
                disabled: disabled,
                onclick: move |_| state.controller.write().pan_right(),
                "▶"
            }
            button {
                style: BUTTON_STYLE,
                disabled: disabled,
                onclick: move |_| state.controller.write().reset(),
                "Reset"
            }
            span {
                style: "margin-left: 12px; font-size: 12px; color: #555;",
                "{range_label}"
            }
        }
    }
}
