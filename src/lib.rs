//! multibar-graph-rs: chart axis and series transformation engine.
//!
//! This crate decides *what* gets drawn for a multibar graph panel — computed
//! series synthesis, series ordering, bar layout, and x/y axis tick math —
//! and hands a [`api::RenderOptions`] object to an external plotting surface.

pub mod api;
pub mod core;
pub mod error;
pub mod render;
pub mod telemetry;

pub use api::{GraphEngine, PanelConfig, RenderOptions, ViewContext};
pub use error::{GraphError, GraphResult};
