//! # Filter Pipeline
//!
//! Composable geometry transform stages and the plumbing that wires them
//! into linear chains.
//!
//! ## Architecture
//!
//! Every stage implements the [`Filter`] trait and travels as a shared
//! [`FilterRef`] handle. A chain is assembled by [`connect`], which points
//! each stage at the previous one and hands the terminal stage to whatever
//! sink consumes the chain (a label mapper, typically). Evaluation is
//! demand-driven: [`evaluate`] pulls from the terminal stage upstream.
//!
//! ## Key Components
//!
//! - [`Dataset`] - points, cells, and attached data arrays
//! - [`ExtractBlock`] - block extraction out of a mesh source
//! - [`IdFilter`] - attaches point/cell id arrays
//! - [`CellCenters`] - replaces cells with centroid points
//! - [`SelectVisiblePoints`] - viewport visibility culling
//! - [`Renderer`] - the shared viewport handle culling evaluates against

pub mod dataset;
pub mod filter;
pub mod renderer;
pub mod stages;

// Re-export main types
pub use dataset::{BlockId, Cell, Dataset};
pub use filter::{evaluate, filter_ref, Filter, FilterKind, FilterRef, InputPort};
pub use renderer::{Renderer, RendererRef};
pub use stages::{CellCenters, ExtractBlock, IdFilter, SelectVisiblePoints};

/// Wire stages into a linear chain downstream of `upstream`
///
/// Each stage's input is connected to the previous one and the sink is
/// pointed at the terminal stage. With no stages the sink consumes
/// `upstream` directly.
pub fn connect(upstream: FilterRef, stages: &[FilterRef], sink: &mut dyn InputPort) {
    let mut tail = upstream;
    for stage in stages {
        stage.borrow_mut().set_input(tail);
        tail = stage.clone();
    }
    sink.set_input(tail);
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::Vector3;

    struct RecordingSink {
        input: Option<FilterRef>,
    }

    impl InputPort for RecordingSink {
        fn set_input(&mut self, input: FilterRef) {
            self.input = Some(input);
        }
    }

    fn quad_mesh() -> Dataset {
        let mut mesh = Dataset::default();
        mesh.points = vec![
            Vector3::new(0.0, 0.0, 0.5),
            Vector3::new(0.5, 0.0, 0.5),
            Vector3::new(0.5, 0.5, 0.5),
            Vector3::new(0.0, 0.5, 0.5),
        ];
        mesh.cells = vec![Cell::new(1, vec![0, 1, 2, 3])];
        mesh
    }

    #[test]
    fn connect_wires_a_linear_chain_to_the_sink() {
        let extract = filter_ref(ExtractBlock::new(quad_mesh()));
        let stages = vec![
            filter_ref(IdFilter::new()),
            filter_ref(SelectVisiblePoints::new()),
        ];
        let mut sink = RecordingSink { input: None };
        connect(extract.clone(), &stages, &mut sink);

        let terminal = sink.input.expect("sink connected");
        assert_eq!(terminal.borrow().kind(), FilterKind::SelectVisiblePoints);
        let id_stage = terminal.borrow().input().cloned().expect("wired");
        assert_eq!(id_stage.borrow().kind(), FilterKind::IdFilter);
        let source = id_stage.borrow().input().cloned().expect("wired");
        assert_eq!(source.borrow().kind(), FilterKind::ExtractBlock);
    }

    #[test]
    fn connect_with_no_stages_hands_upstream_to_the_sink() {
        let extract = filter_ref(ExtractBlock::new(quad_mesh()));
        let mut sink = RecordingSink { input: None };
        connect(extract, &[], &mut sink);
        let terminal = sink.input.expect("sink connected");
        assert_eq!(terminal.borrow().kind(), FilterKind::ExtractBlock);
    }

    #[test]
    fn evaluate_pulls_through_the_whole_chain() {
        let extract = filter_ref(ExtractBlock::new(quad_mesh()));
        let stages = vec![
            filter_ref(IdFilter::new()),
            filter_ref(SelectVisiblePoints::new()),
        ];
        let mut sink = RecordingSink { input: None };
        connect(extract, &stages, &mut sink);

        let out = evaluate(&sink.input.unwrap()).unwrap();
        assert_eq!(out.num_points(), 4);
        assert_eq!(out.point_ids.as_deref(), Some(&[0, 1, 2, 3][..]));
    }
}
