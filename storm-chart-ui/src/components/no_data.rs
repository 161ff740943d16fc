use dioxus::prelude::*;

/// Placeholder shown when an analysis produced no events.
#[component]
pub fn NoData() -> Element {
    rsx! {
        div {
            style: "display: flex; justify-content: center; align-items: center; padding: 40px; color: #666; border: 1px dashed #ccc; border-radius: 4px;",
            "No data: the analysis returned no events for the selected datasets."
        }
    }
}
