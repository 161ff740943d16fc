//! Error display component.

use dioxus::prelude::*;

#[derive(Props, Clone, PartialEq)]
pub struct ErrorDisplayProps {
    pub message: String,
    /// Shows a Retry button when set
    #[props(default)]
    pub on_retry: Option<EventHandler<()>>,
}

/// Displays an error message in a styled box, optionally with a Retry button.
#[component]
pub fn ErrorDisplay(props: ErrorDisplayProps) -> Element {
    rsx! {
        div {
            style: "padding: 12px 16px; margin: 8px 0; background: #FFEBEE; color: #C62828; border-radius: 4px; border: 1px solid #EF9A9A; display: flex; gap: 12px; align-items: center;",
            div {
                strong { "Error: " }
                "{props.message}"
            }
            if let Some(on_retry) = props.on_retry {
                button {
                    style: "margin-left: auto; padding: 4px 12px;",
                    onclick: move |_| on_retry.call(()),
                    "Retry"
                }
            }
        }
    }
}
