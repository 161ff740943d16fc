//! Shared Dioxus components, D3.js bridge and API client for the storm
//! timeline dashboard.
//!
//! This crate provides:
//! - `js_bridge`: Rust wrappers for the D3.js Gantt and histogram renderers
//! - `api`: classification and capture requests via `window.fetch`
//! - `state`: Reactive AppState with Dioxus Signals
//! - `components`: Reusable RSX components (toolbar, charts, capture modal, etc.)

pub mod api;
pub mod components;
pub mod js_bridge;
pub mod state;
