//! Core types for rainfall event review.
//!
//! Events and dry days arrive from the server-side classifier
//! ([`analysis::AnalysisResponse`]); the timeline engine derives [`span::Span`]s
//! from them and hands clicked spans back out as [`capture::CaptureRequest`]s.

pub mod analysis;
pub mod capture;
pub mod error;
pub mod event;
pub mod span;

pub use error::{Result, TimelineError};
