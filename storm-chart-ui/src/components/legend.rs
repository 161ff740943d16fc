use crate::js_bridge::status_color;
use dioxus::prelude::*;
use storm_core::event::EventStatus;

/// Colour key for Gantt bar statuses.
#[component]
pub fn StatusLegend() -> Element {
    let entries: Vec<(String, String)> = [
        EventStatus::Event,
        EventStatus::PartialEvent,
        EventStatus::NoEvent,
    ]
    .into_iter()
    .map(|status| {
        (
            status.to_string(),
            format!(
                "display: inline-block; width: 12px; height: 12px; border-radius: 2px; background: {};",
                status_color(status)
            ),
        )
    })
    .collect();

    rsx! {
        div {
            style: "display: flex; gap: 16px; font-size: 12px; color: #444; margin: 4px 0 12px 0;",
            for (label, swatch) in entries {
                span {
                    key: "{label}",
                    style: "display: inline-flex; align-items: center; gap: 6px;",
                    span { style: "{swatch}" }
                    "{label}"
                }
            }
        }
    }
}
