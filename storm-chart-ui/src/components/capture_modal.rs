//! Modal for naming and saving a captured span.

use crate::api;
use crate::state::AppState;
use dioxus::prelude::*;
use storm_core::span::SpanKind;
use storm_utils::dates;

const OVERLAY_STYLE: &str = "position: fixed; inset: 0; background: rgba(0,0,0,0.35); display: flex; align-items: center; justify-content: center; z-index: 10;";
const DIALOG_STYLE: &str = "background: #fff; padding: 20px; border-radius: 6px; min-width: 320px; display: flex; flex-direction: column; gap: 10px;";

/// Shown while `AppState::capture` holds a form.
///
/// Save validates the form (non-empty name, end after start) and POSTs the
/// result; validation and network errors stay inside the modal.
#[component]
pub fn CaptureModal() -> Element {
    let mut state = use_context::<AppState>();
    let mut form_error = use_signal(|| None::<String>);
    let mut saving = use_signal(|| false);

    let Some(form) = (state.capture)() else {
        return rsx! {};
    };

    let kind_value = match form.kind {
        SpanKind::Storm => "storm",
        SpanKind::DryDay => "dryDay",
    };
    let storm_label = SpanKind::Storm.label();
    let dry_day_label = SpanKind::DryDay.label();
    let start_label = dates::format_display(&form.start_time);
    let end_label = dates::format_display(&form.end_time);

    let on_save = move |_| {
        let Some(form) = (state.capture)() else {
            return;
        };
        let capture = match form.validate() {
            Ok(capture) => capture,
            Err(e) => {
                form_error.set(Some(e.to_string()));
                return;
            }
        };
        form_error.set(None);
        saving.set(true);
        spawn(async move {
            match api::save_capture(api::API_BASE, &capture).await {
                Ok(()) => {
                    log::info!("[Storm] saved capture '{}'", capture.name);
                    state
                        .notice
                        .set(Some(format!("Saved {} '{}'", capture.kind.label(), capture.name)));
                    state.capture.set(None);
                }
                Err(e) => {
                    log::error!("[Storm] capture save failed: {}", e);
                    form_error.set(Some(e.to_string()));
                }
            }
            saving.set(false);
        });
    };

    let on_cancel = move |_| {
        form_error.set(None);
        state.capture.set(None);
    };

    rsx! {
        div {
            style: OVERLAY_STYLE,
            div {
                style: DIALOG_STYLE,
                h3 { style: "margin: 0;", "Capture span" }
                p {
                    style: "margin: 0; font-size: 13px; color: #555;",
                    "{start_label} to {end_label}"
                }
                label {
                    style: "display: flex; flex-direction: column; font-size: 12px; gap: 2px;",
                    "Name"
                    input {
                        r#type: "text",
                        value: "{form.name}",
                        oninput: move |evt: Event<FormData>| {
                            if let Some(form) = state.capture.write().as_mut() {
                                form.name = evt.value();
                            }
                        },
                    }
                }
                label {
                    style: "display: flex; flex-direction: column; font-size: 12px; gap: 2px;",
                    "Type"
                    select {
                        value: kind_value,
                        onchange: move |evt: Event<FormData>| {
                            let kind = if evt.value() == "dryDay" { SpanKind::DryDay } else { SpanKind::Storm };
                            if let Some(form) = state.capture.write().as_mut() {
                                form.kind = kind;
                            }
                        },
                        option { value: "storm", "{storm_label}" }
                        option { value: "dryDay", "{dry_day_label}" }
                    }
                }
                if let Some(err) = form_error() {
                    div { style: "color: #C62828; font-size: 12px;", "{err}" }
                }
                div {
                    style: "display: flex; justify-content: flex-end; gap: 8px;",
                    button { onclick: on_cancel, disabled: saving(), "Cancel" }
                    button {
                        onclick: on_save,
                        disabled: saving(),
                        if saving() { "Saving..." } else { "Save" }
                    }
                }
            }
        }
    }
}
