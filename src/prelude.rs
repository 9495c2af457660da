//! # Exoviz Prelude
//!
//! Convenient single import for the commonly used types when assembling a
//! labeled mesh view.
//!
//! ## Usage
//!
//! ```rust
//! use exoviz::prelude::*;
//! ```

// Re-export the labeling layer
pub use crate::labels::{Label, LabelMode, LabelSource, LabeledDataMapper};

// Re-export source and pipeline types
pub use crate::pipeline::{
    connect, evaluate, filter_ref, BlockId, Cell, CellCenters, Dataset, ExtractBlock, Filter,
    FilterKind, FilterRef, IdFilter, InputPort, Renderer, RendererRef, SelectVisiblePoints,
};
pub use crate::source::{ExodusSource, ObjectType, RenderSource, SourceRef, VariableInfo};

// Re-export configuration and text types
pub use crate::error::VizError;
pub use crate::options::{Entry, Options, Overrides, Value};
pub use crate::text::{Justification, TextProperty, VerticalJustification};
