// src/lib.rs
//! Exoviz
//!
//! A mesh visualization layer for simulation output: filter pipelines over
//! extracted mesh blocks, and point/cell/variable labeling on top of them.

pub mod error;
pub mod labels;
pub mod options;
pub mod pipeline;
pub mod prelude;
pub mod source;
pub mod text;

// Re-export main types for convenience
pub use error::VizError;
pub use labels::LabelSource;
pub use source::ExodusSource;
