//! chart-motion: frame-based animation scheduling for chart engines.
//!
//! This crate owns the deterministic scheduling core — the frame store, the
//! transition queue, the sequential runner, and the per-instance state
//! machine that emits lifecycle events and settles caller futures — while
//! the actual interpolated draw stays behind the
//! [`render::TransitionRenderer`] seam. The caller-facing surface is modeled
//! on the Plotly.js animation API.

pub mod api;
pub mod core;
pub mod error;
pub mod render;
pub mod telemetry;

pub use api::{AnimationController, AnimationEvent, AnimationOptions, EventSink};
pub use error::{AnimationError, AnimationResult};
