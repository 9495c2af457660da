//! # Mesh Sources
//!
//! Sources own a mesh dataset and the filter chain that turns it into
//! renderable geometry. The framework passes sources around as shared
//! [`SourceRef`] handles; consumers that need a specific capability
//! downcast through [`RenderSource::as_any`].
//!
//! [`ExodusSource`] is the simulation-output source: a mesh split into
//! blocks, with nodal and elemental variables attached, extracted through
//! an [`ExtractBlock`] stage.

use std::any::Any;
use std::cell::RefCell;
use std::rc::Rc;

use log::debug;

use crate::error::VizError;
use crate::pipeline::{evaluate, BlockId, Dataset, ExtractBlock, FilterRef};

/// Shared handle to a renderable source
pub type SourceRef = Rc<RefCell<dyn RenderSource>>;

/// Base trait for renderable source objects
///
/// Carries a type label for diagnostics and the downcast hooks consumers
/// use to check for concrete capabilities at construction time.
pub trait RenderSource {
    /// Human-readable type name, used in capability-mismatch errors
    fn type_label(&self) -> &'static str;

    /// Support for downcasting to concrete source types
    fn as_any(&self) -> &dyn Any;

    /// Support for mutable downcasting to concrete source types
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

/// Classification of a variable's attachment to the mesh
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectType {
    /// Attached to mesh points
    Nodal,
    /// Attached to mesh cells
    Elemental,
    /// A single value for the whole mesh
    Global,
}

/// Read-only metadata about one variable on a source
#[derive(Debug, Clone, PartialEq)]
pub struct VariableInfo {
    pub name: String,
    pub object_type: ObjectType,
}

/// A simulation-output mesh source
///
/// Owns the full mesh, the table of variables derived from its attached
/// arrays, and a filter chain terminating in an [`ExtractBlock`] stage.
/// `update` re-runs the extraction; consumers watch `needs_update` to avoid
/// working on stale geometry.
pub struct ExodusSource {
    variables: Vec<VariableInfo>,
    active_variable: Option<String>,
    extract: Rc<RefCell<ExtractBlock>>,
    filters: Vec<FilterRef>,
    output: Option<Dataset>,
    needs_update: bool,
}

impl ExodusSource {
    /// Create a source over an in-memory mesh dataset
    ///
    /// The variable table is derived from the mesh's attached arrays:
    /// point arrays become nodal variables, cell arrays elemental ones.
    pub fn new(mesh: Dataset) -> Self {
        let mut variables = Vec::new();
        for name in mesh.point_arrays.keys() {
            variables.push(VariableInfo {
                name: name.clone(),
                object_type: ObjectType::Nodal,
            });
        }
        for name in mesh.cell_arrays.keys() {
            variables.push(VariableInfo {
                name: name.clone(),
                object_type: ObjectType::Elemental,
            });
        }

        let extract = Rc::new(RefCell::new(ExtractBlock::new(mesh)));
        let filters: Vec<FilterRef> = vec![extract.clone()];
        Self {
            variables,
            active_variable: None,
            extract,
            filters,
            output: None,
            needs_update: true,
        }
    }

    /// Wrap into a shared framework handle
    pub fn into_ref(self) -> SourceRef {
        Rc::new(RefCell::new(self))
    }

    /// Restrict extraction to the given blocks; empty keeps all blocks
    pub fn set_blocks(&mut self, blocks: Vec<BlockId>) {
        self.extract.borrow_mut().set_blocks(blocks);
        self.needs_update = true;
    }

    /// Select the active variable
    pub fn set_variable(&mut self, name: &str) -> Result<(), VizError> {
        if !self.variables.iter().any(|v| v.name == name) {
            return Err(VizError::UnknownVariable(name.to_string()));
        }
        self.active_variable = Some(name.to_string());
        self.needs_update = true;
        Ok(())
    }

    /// Metadata of the active variable, if one is selected
    pub fn variable_info(&self) -> Option<&VariableInfo> {
        let name = self.active_variable.as_deref()?;
        self.variables.iter().find(|v| v.name == name)
    }

    /// All variables carried by the mesh
    pub fn variables(&self) -> &[VariableInfo] {
        &self.variables
    }

    /// The source's filter chain; the last stage is the extraction stage
    pub fn filters(&self) -> &[FilterRef] {
        &self.filters
    }

    /// Terminal extraction stage, for wiring downstream chains
    pub fn source_filter(&self) -> FilterRef {
        self.filters[self.filters.len() - 1].clone()
    }

    /// Whether the extraction must re-run before the output is usable
    pub fn needs_update(&self) -> bool {
        self.needs_update
    }

    /// Re-run the extraction chain
    pub fn update(&mut self) -> Result<(), VizError> {
        let output = evaluate(&self.source_filter())?;
        debug!(
            "ExodusSource extracted {} points, {} cells",
            output.num_points(),
            output.num_cells()
        );
        self.output = Some(output);
        self.needs_update = false;
        Ok(())
    }

    /// Last extracted dataset
    pub fn output(&self) -> Option<&Dataset> {
        self.output.as_ref()
    }
}

impl RenderSource for ExodusSource {
    fn type_label(&self) -> &'static str {
        "ExodusSource"
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::{Cell, FilterKind};
    use cgmath::Vector3;

    fn mesh_with_variables() -> Dataset {
        let mut mesh = Dataset::default();
        mesh.points = vec![
            Vector3::new(0.0, 0.0, 0.0),
            Vector3::new(1.0, 0.0, 0.0),
            Vector3::new(1.0, 1.0, 0.0),
            Vector3::new(0.0, 1.0, 0.0),
        ];
        mesh.cells = vec![Cell::new(1, vec![0, 1, 2, 3])];
        mesh.point_arrays
            .insert("temp".to_string(), vec![1.0, 2.0, 3.0, 4.0]);
        mesh.cell_arrays.insert("stress".to_string(), vec![10.0]);
        mesh
    }

    #[test]
    fn variable_table_is_derived_from_mesh_arrays() {
        let source = ExodusSource::new(mesh_with_variables());
        let names: Vec<&str> = source.variables().iter().map(|v| v.name.as_str()).collect();
        assert!(names.contains(&"temp"));
        assert!(names.contains(&"stress"));
    }

    #[test]
    fn variable_info_reports_object_type() {
        let mut source = ExodusSource::new(mesh_with_variables());
        assert!(source.variable_info().is_none());

        source.set_variable("temp").unwrap();
        assert_eq!(source.variable_info().unwrap().object_type, ObjectType::Nodal);

        source.set_variable("stress").unwrap();
        assert_eq!(
            source.variable_info().unwrap().object_type,
            ObjectType::Elemental
        );
    }

    #[test]
    fn unknown_variable_is_an_error() {
        let mut source = ExodusSource::new(mesh_with_variables());
        assert!(matches!(
            source.set_variable("pressure"),
            Err(VizError::UnknownVariable(name)) if name == "pressure"
        ));
    }

    #[test]
    fn update_clears_the_stale_flag_and_extracts() {
        let mut source = ExodusSource::new(mesh_with_variables());
        assert!(source.needs_update());
        source.update().unwrap();
        assert!(!source.needs_update());
        assert_eq!(source.output().unwrap().num_points(), 4);

        source.set_blocks(vec![99]);
        assert!(source.needs_update());
        source.update().unwrap();
        assert_eq!(source.output().unwrap().num_cells(), 0);
    }

    #[test]
    fn source_filter_is_the_extraction_stage() {
        let source = ExodusSource::new(mesh_with_variables());
        assert_eq!(
            source.source_filter().borrow().kind(),
            FilterKind::ExtractBlock
        );
    }
}
