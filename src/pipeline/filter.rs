//! Filter trait and demand-driven chain evaluation.

use std::any::Any;
use std::cell::RefCell;
use std::rc::Rc;

use crate::error::VizError;

use super::dataset::Dataset;

/// Shared handle to a filter stage
///
/// Filters are shared, mutably-aliased objects driven by a single-threaded
/// render loop; `Rc<RefCell<..>>` mirrors that ownership model.
pub type FilterRef = Rc<RefCell<dyn Filter>>;

/// Discriminates the concrete filter stages
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterKind {
    ExtractBlock,
    IdFilter,
    CellCenters,
    SelectVisiblePoints,
}

impl FilterKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FilterKind::ExtractBlock => "ExtractBlock",
            FilterKind::IdFilter => "IdFilter",
            FilterKind::CellCenters => "CellCenters",
            FilterKind::SelectVisiblePoints => "SelectVisiblePoints",
        }
    }
}

/// Anything that accepts an upstream connection (filters, label mappers)
pub trait InputPort {
    fn set_input(&mut self, input: FilterRef);
}

/// A composable geometry transform stage
///
/// Stages are wired into linear chains by [`super::connect`] and evaluated
/// on demand by [`evaluate`]; a stage with no input connection acts as a
/// source and transforms an empty dataset.
pub trait Filter: InputPort {
    /// Which concrete stage this is
    fn kind(&self) -> FilterKind;

    /// Upstream connection, if wired
    fn input(&self) -> Option<&FilterRef>;

    /// Transform one input dataset into one output dataset
    fn apply(&self, input: Dataset) -> Result<Dataset, VizError>;

    /// Support for downcasting to concrete stage types
    fn as_any(&self) -> &dyn Any;

    /// Support for mutable downcasting to concrete stage types
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

/// Pull a dataset through the chain ending at `terminal`
///
/// Walks the input connections upstream, then applies each stage on the way
/// back down. Chains are short (at most a handful of stages) so recursion is
/// fine here.
pub fn evaluate(terminal: &FilterRef) -> Result<Dataset, VizError> {
    let upstream = terminal.borrow().input().cloned();
    let input = match upstream {
        Some(ref filter) => evaluate(filter)?,
        None => Dataset::default(),
    };
    terminal.borrow().apply(input)
}

/// Wrap a concrete stage into a shared handle
pub fn filter_ref<F: Filter + 'static>(filter: F) -> FilterRef {
    Rc::new(RefCell::new(filter))
}
