//! Dataset selection and classification parameter inputs.

use crate::state::AppState;
use dioxus::prelude::*;
use std::str::FromStr;
use storm_core::event::DatasetId;

/// Parse a comma/space separated list of dataset ids, skipping junk.
pub fn parse_dataset_ids(input: &str) -> Vec<DatasetId> {
    let mut ids: Vec<DatasetId> = input
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter_map(|part| part.trim().parse().ok())
        .collect();
    ids.sort_unstable();
    ids.dedup();
    ids
}

/// Parse `raw` into `field`, leaving it untouched when invalid.
fn parse_into<T: FromStr>(raw: &str, field: &mut T) {
    match raw.trim().parse() {
        Ok(value) => *field = value,
        Err(_) => log::warn!("[Storm] ignoring invalid parameter value '{}'", raw),
    }
}

fn format_dataset_ids(ids: &[DatasetId]) -> String {
    ids.iter()
        .map(|id| id.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

#[derive(Props, Clone, PartialEq)]
struct NumberFieldProps {
    label: &'static str,
    value: String,
    #[props(default = "any")]
    step: &'static str,
    onchange: EventHandler<String>,
}

#[component]
fn NumberField(props: NumberFieldProps) -> Element {
    rsx! {
        label {
            style: "display: flex; flex-direction: column; font-size: 12px; gap: 2px;",
            "{props.label}"
            input {
                r#type: "number",
                step: props.step,
                style: "width: 110px;",
                value: "{props.value}",
                onchange: move |evt: Event<FormData>| props.onchange.call(evt.value()),
            }
        }
    }
}

#[derive(Props, Clone, PartialEq)]
pub struct ParamsFormProps {
    /// Fired when the user asks for a new classification
    pub on_run: EventHandler<()>,
}

/// Inputs for [`AnalysisParams`](storm_core::analysis::AnalysisParams) plus
/// the dataset list.
///
/// Unparseable numbers leave the previous value untouched.
#[component]
pub fn ParamsForm(props: ParamsFormProps) -> Element {
    let mut state = use_context::<AppState>();
    let params = (state.params)();
    let ids_text = format_dataset_ids(&state.dataset_ids.read());
    let loading = (state.loading)();

    rsx! {
        div {
            style: "display: flex; flex-wrap: wrap; gap: 12px; align-items: flex-end; margin-bottom: 8px;",
            label {
                style: "display: flex; flex-direction: column; font-size: 12px; gap: 2px; font-weight: bold;",
                "Datasets"
                input {
                    r#type: "text",
                    style: "width: 160px;",
                    placeholder: "1, 2, 3",
                    value: "{ids_text}",
                    onchange: move |evt: Event<FormData>| {
                        state.dataset_ids.set(parse_dataset_ids(&evt.value()));
                    },
                }
            }
            NumberField {
                label: "Dry day tolerance (mm)",
                value: params.dry_day_tolerance.to_string(),
                onchange: move |raw: String| parse_into(&raw, &mut state.params.write().dry_day_tolerance),
            }
            NumberField {
                label: "Preceding dry days",
                value: params.preceding_dry_days.to_string(),
                step: "1",
                onchange: move |raw: String| parse_into(&raw, &mut state.params.write().preceding_dry_days),
            }
            NumberField {
                label: "Consecutive zeros",
                value: params.consecutive_zero_threshold.to_string(),
                step: "1",
                onchange: move |raw: String| parse_into(&raw, &mut state.params.write().consecutive_zero_threshold),
            }
            NumberField {
                label: "Inter-event gap (min)",
                value: params.inter_event_gap.to_string(),
                step: "1",
                onchange: move |raw: String| parse_into(&raw, &mut state.params.write().inter_event_gap),
            }
            NumberField {
                label: "Required depth (mm)",
                value: params.required_depth.to_string(),
                onchange: move |raw: String| parse_into(&raw, &mut state.params.write().required_depth),
            }
            NumberField {
                label: "Required intensity (mm/hr)",
                value: params.required_intensity.to_string(),
                onchange: move |raw: String| parse_into(&raw, &mut state.params.write().required_intensity),
            }
            NumberField {
                label: "Intensity duration (min)",
                value: params.required_intensity_duration.to_string(),
                step: "1",
                onchange: move |raw: String| parse_into(&raw, &mut state.params.write().required_intensity_duration),
            }
            NumberField {
                label: "Partial event (%)",
                value: params.partial_event_percent.to_string(),
                onchange: move |raw: String| parse_into(&raw, &mut state.params.write().partial_event_percent),
            }
            label {
                style: "display: flex; gap: 4px; font-size: 12px; align-items: center;",
                input {
                    r#type: "checkbox",
                    checked: params.check_consecutive_intensity,
                    onchange: move |evt: Event<FormData>| {
                        state.params.write().check_consecutive_intensity = evt.checked();
                    },
                }
                "Consecutive intensity"
            }
            button {
                style: "padding: 6px 14px;",
                disabled: loading,
                onclick: move |_| props.on_run.call(()),
                if loading { "Running..." } else { "Run analysis" }
            }
        }
    }
}
