//! HTTP shell around the conversion pipeline.

pub mod api;
pub mod metrics;
pub mod state;
