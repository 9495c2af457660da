//! # Mesh Labeling
//!
//! Attaches textual labels (point ids, cell ids, or field-variable values)
//! to an [`ExodusSource`] mesh.
//!
//! ## Architecture
//!
//! [`LabelSource`] is a thin adapter over the filter pipeline: on every
//! update it re-reads its options, picks the filter chain matching the
//! resolved `label_type`, wires the chain downstream of the source's
//! extraction stage, and points a [`LabeledDataMapper`] at the result. The
//! chain is rebuilt from fresh stage instances on each call; nothing from
//! the previous chain survives.
//!
//! ## Usage
//!
//! ```no_run
//! use exoviz::labels::LabelSource;
//! use exoviz::options::Overrides;
//! use exoviz::pipeline::{Dataset, Renderer};
//! use exoviz::source::ExodusSource;
//!
//! let source = ExodusSource::new(Dataset::default()).into_ref();
//! let mut labels = LabelSource::new(source, Overrides::new()).unwrap();
//! labels.set_renderer(Renderer::default().into_ref());
//! labels.update(&Overrides::new()).unwrap();
//! ```

pub mod mapper;

pub use mapper::{Label, LabelMode, LabeledDataMapper};

use std::cell::{Ref, RefMut};
use std::str::FromStr;

use log::debug;

use crate::error::VizError;
use crate::options::{Entry, Options, Overrides, Value};
use crate::pipeline::{
    self, filter_ref, CellCenters, FilterRef, IdFilter, RendererRef, SelectVisiblePoints,
};
use crate::source::{ExodusSource, ObjectType, SourceRef};
use crate::text;

/// The kind of label a [`LabelSource`] produces
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LabelType {
    Point,
    Cell,
    Variable,
}

impl FromStr for LabelType {
    type Err = VizError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "point" => Ok(LabelType::Point),
            "cell" => Ok(LabelType::Cell),
            "variable" => Ok(LabelType::Variable),
            other => Err(VizError::InvalidOptionValue {
                name: "label_type".to_string(),
                reason: format!("'{}' is not a label type", other),
            }),
        }
    }
}

/// Adapter attaching labels to an [`ExodusSource`] object
///
/// The wrapped source is shared and externally owned; the adapter only
/// reads its metadata and refreshes it when stale. Construction overrides
/// stay sticky across updates, per-call overrides do not.
pub struct LabelSource {
    source: SourceRef,
    options: Options,
    initial: Overrides,
    renderer: Option<RendererRef>,
    required_filters: Vec<FilterRef>,
    mapper: LabeledDataMapper,
}

impl LabelSource {
    /// The full option set of a label source
    pub fn default_options() -> Options {
        let mut opt = Options::new();
        // Base 2D-overlay source options
        opt.add(Entry::bool("visible", true, "Display the overlay"));
        opt.add(Entry::float("opacity", 1.0, "Overlay opacity"));
        opt.extend(text::font_options());
        opt.add(
            Entry::string("label_type", "variable", "Specify the type of label to create")
                .allow(&["point", "cell", "variable"]),
        );
        // Labels anchor on their point, not hang off it
        opt.set_default("justification", Value::Str("center".to_string()))
            .expect("justification is registered by font_options");
        opt.set_default("vertical_justification", Value::Str("middle".to_string()))
            .expect("vertical_justification is registered by font_options");
        opt
    }

    /// Create a label adapter over a mesh source
    ///
    /// The handle must refer to an [`ExodusSource`]; anything else fails
    /// with [`VizError::InvalidArgument`] before any state is built.
    /// `overrides` are validated eagerly and re-applied on every update.
    pub fn new(source: SourceRef, overrides: Overrides) -> Result<Self, VizError> {
        {
            let borrowed = source.borrow();
            if !borrowed.as_any().is::<ExodusSource>() {
                return Err(VizError::InvalidArgument {
                    expected: "ExodusSource",
                    found: borrowed.type_label(),
                });
            }
        }

        let mut options = Self::default_options();
        options.apply(&overrides)?;

        Ok(Self {
            source,
            options,
            initial: overrides,
            renderer: None,
            required_filters: Vec::new(),
            mapper: LabeledDataMapper::new(),
        })
    }

    /// The wrapped source's terminal extraction stage
    ///
    /// Pure accessor for pipeline assembly; unaffected by the adapter's
    /// own filter-chain state.
    pub fn source_filter(&self) -> FilterRef {
        self.mesh().source_filter()
    }

    /// Inject the active renderer used for visibility culling
    pub fn set_renderer(&mut self, renderer: RendererRef) {
        self.renderer = Some(renderer);
    }

    /// Re-resolve options and rebuild the label pipeline
    ///
    /// Refreshes the source if it is stale, resets options to defaults and
    /// re-applies construction plus per-call overrides, then rebuilds the
    /// filter chain from the decision table on `label_type`:
    ///
    /// | label_type | chain | mode |
    /// |---|---|---|
    /// | `cell` | IdFilter, CellCenters, SelectVisiblePoints | ids |
    /// | `point` | IdFilter, SelectVisiblePoints | ids |
    /// | `variable`, elemental | CellCenters, SelectVisiblePoints | field data |
    /// | `variable`, nodal | SelectVisiblePoints | field data |
    pub fn update(&mut self, overrides: &Overrides) -> Result<(), VizError> {
        // Never label stale geometry
        if self.mesh().needs_update() {
            self.mesh_mut().update()?;
        }

        // Defaults first, then sticky construction overrides, then this call's
        self.options.reset();
        self.options.apply(&self.initial)?;
        self.options.apply(overrides)?;

        let label_type: LabelType = self.options.get_str("label_type")?.parse()?;
        debug!("rebuilding label chain for label_type={:?}", label_type);

        let stages: Vec<FilterRef> = match label_type {
            LabelType::Cell => {
                self.mapper.set_mode(LabelMode::Ids);
                vec![
                    filter_ref(IdFilter::new()),
                    filter_ref(CellCenters::new()),
                    filter_ref(SelectVisiblePoints::new()),
                ]
            }
            LabelType::Point => {
                self.mapper.set_mode(LabelMode::Ids);
                vec![
                    filter_ref(IdFilter::new()),
                    filter_ref(SelectVisiblePoints::new()),
                ]
            }
            LabelType::Variable => {
                let (name, object_type) = {
                    let mesh = self.mesh();
                    let info = mesh.variable_info().ok_or(VizError::NoActiveVariable)?;
                    (info.name.clone(), info.object_type)
                };
                self.mapper.set_mode(LabelMode::FieldData(name));
                if object_type == ObjectType::Elemental {
                    vec![
                        filter_ref(CellCenters::new()),
                        filter_ref(SelectVisiblePoints::new()),
                    ]
                } else {
                    vec![filter_ref(SelectVisiblePoints::new())]
                }
            }
        };

        // Fresh instances every update; the previous chain is discarded wholesale
        self.required_filters = stages;
        pipeline::connect(
            self.source_filter(),
            &self.required_filters,
            &mut self.mapper,
        );

        // Visibility must be evaluated against the correct viewport
        if let Some(renderer) = &self.renderer {
            if let Some(terminal) = self.required_filters.last() {
                if let Some(select) = terminal
                    .borrow_mut()
                    .as_any_mut()
                    .downcast_mut::<SelectVisiblePoints>()
                {
                    select.set_renderer(renderer.clone());
                }
            }
        }

        text::apply_font_options(self.mapper.text_property_mut(), &self.options)?;
        Ok(())
    }

    /// The filter chain wired by the last update
    pub fn required_filters(&self) -> &[FilterRef] {
        &self.required_filters
    }

    /// The label-rendering object fed by the filter chain
    pub fn mapper(&self) -> &LabeledDataMapper {
        &self.mapper
    }

    /// Resolved options as of the last update
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Generate the labels for the current chain state
    pub fn labels(&self) -> Result<Vec<Label>, VizError> {
        self.mapper.labels()
    }

    fn mesh(&self) -> Ref<'_, ExodusSource> {
        Ref::map(self.source.borrow(), |s| {
            s.as_any()
                .downcast_ref::<ExodusSource>()
                .expect("capability checked at construction")
        })
    }

    fn mesh_mut(&self) -> RefMut<'_, ExodusSource> {
        RefMut::map(self.source.borrow_mut(), |s| {
            s.as_any_mut()
                .downcast_mut::<ExodusSource>()
                .expect("capability checked at construction")
        })
    }
}
