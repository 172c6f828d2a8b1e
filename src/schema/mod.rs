//! petcare.analysis_request.v1 schema
//!
//! This module defines the JSON input accepted by the pipeline, the FFI layer
//! and the CLI, together with its structural validation.

mod adapter;
mod request;

pub use adapter::*;
pub use request::*;
