//! Concrete filter stages.
//!
//! Four stages cover the labeling pipelines: block extraction out of a mesh
//! source, id attachment, cell-to-center conversion, and viewport visibility
//! culling. Each stage is a plain struct wired into a chain through its
//! input connection and evaluated with [`super::evaluate`].

use std::any::Any;
use std::collections::HashMap;

use cgmath::Vector4;
use log::trace;

use crate::error::VizError;

use super::dataset::{BlockId, Dataset};
use super::filter::{Filter, FilterKind, FilterRef, InputPort};
use super::renderer::RendererRef;

/// Source stage extracting the selected blocks out of a mesh dataset
///
/// Owns the full mesh and a block selection; an empty selection keeps every
/// block. Output contains only the cells of the selected blocks and the
/// points they reference, with point indices remapped.
#[derive(Default)]
pub struct ExtractBlock {
    input: Option<FilterRef>,
    mesh: Dataset,
    blocks: Vec<BlockId>,
}

impl ExtractBlock {
    pub fn new(mesh: Dataset) -> Self {
        Self {
            input: None,
            mesh,
            blocks: Vec::new(),
        }
    }

    /// Replace the mesh this stage extracts from
    pub fn set_mesh(&mut self, mesh: Dataset) {
        self.mesh = mesh;
    }

    /// Select the blocks to keep; empty keeps all blocks
    pub fn set_blocks(&mut self, blocks: Vec<BlockId>) {
        self.blocks = blocks;
    }

    pub fn blocks(&self) -> &[BlockId] {
        &self.blocks
    }
}

impl InputPort for ExtractBlock {
    fn set_input(&mut self, input: FilterRef) {
        self.input = Some(input);
    }
}

impl Filter for ExtractBlock {
    fn kind(&self) -> FilterKind {
        FilterKind::ExtractBlock
    }

    fn input(&self) -> Option<&FilterRef> {
        self.input.as_ref()
    }

    fn apply(&self, _input: Dataset) -> Result<Dataset, VizError> {
        let mut out = Dataset::default();
        let mut remap: HashMap<usize, usize> = HashMap::new();

        for (cell_index, cell) in self.mesh.cells.iter().enumerate() {
            if !self.blocks.is_empty() && !self.blocks.contains(&cell.block) {
                continue;
            }
            let mut points = Vec::with_capacity(cell.points.len());
            for &old in &cell.points {
                let new = *remap.entry(old).or_insert_with(|| {
                    out.points.push(self.mesh.points[old]);
                    out.points.len() - 1
                });
                points.push(new);
            }
            out.cells.push(super::dataset::Cell::new(cell.block, points));
            for (name, array) in &self.mesh.cell_arrays {
                out.cell_arrays
                    .entry(name.clone())
                    .or_default()
                    .push(array[cell_index]);
            }
        }

        // Point arrays follow the remapped points
        let mut kept: Vec<usize> = vec![0; out.points.len()];
        for (&old, &new) in &remap {
            kept[new] = old;
        }
        for (name, array) in &self.mesh.point_arrays {
            let values = kept.iter().map(|&old| array[old]).collect();
            out.point_arrays.insert(name.clone(), values);
        }

        trace!(
            "ExtractBlock kept {} of {} cells ({} blocks selected)",
            out.num_cells(),
            self.mesh.num_cells(),
            self.blocks.len()
        );
        Ok(out)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// Attaches point and cell id arrays to the dataset passing through
#[derive(Default)]
pub struct IdFilter {
    input: Option<FilterRef>,
}

impl IdFilter {
    pub fn new() -> Self {
        Self::default()
    }
}

impl InputPort for IdFilter {
    fn set_input(&mut self, input: FilterRef) {
        self.input = Some(input);
    }
}

impl Filter for IdFilter {
    fn kind(&self) -> FilterKind {
        FilterKind::IdFilter
    }

    fn input(&self) -> Option<&FilterRef> {
        self.input.as_ref()
    }

    fn apply(&self, input: Dataset) -> Result<Dataset, VizError> {
        let mut out = input;
        out.point_ids = Some((0..out.num_points() as u64).collect());
        out.cell_ids = Some((0..out.num_cells() as u64).collect());
        Ok(out)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// Replaces each cell with a single point at its centroid
///
/// Cell-attached data (ids and arrays) moves to the output points; the
/// output has no cells of its own.
#[derive(Default)]
pub struct CellCenters {
    input: Option<FilterRef>,
}

impl CellCenters {
    pub fn new() -> Self {
        Self::default()
    }
}

impl InputPort for CellCenters {
    fn set_input(&mut self, input: FilterRef) {
        self.input = Some(input);
    }
}

impl Filter for CellCenters {
    fn kind(&self) -> FilterKind {
        FilterKind::CellCenters
    }

    fn input(&self) -> Option<&FilterRef> {
        self.input.as_ref()
    }

    fn apply(&self, input: Dataset) -> Result<Dataset, VizError> {
        let mut out = Dataset::default();
        for cell in &input.cells {
            out.points.push(input.cell_center(cell));
        }
        out.point_ids = input.cell_ids.clone();
        out.point_arrays = input.cell_arrays.clone();
        Ok(out)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// Culls points that fall outside the active renderer's viewport
///
/// Visibility is a clip-space containment test against the renderer's
/// view-projection matrix (depth range 0..1). Without a renderer the stage
/// passes every point through. Cells are dropped; downstream consumers of
/// this stage work on point clouds.
#[derive(Default)]
pub struct SelectVisiblePoints {
    input: Option<FilterRef>,
    renderer: Option<RendererRef>,
}

impl SelectVisiblePoints {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inject the renderer whose viewport visibility is evaluated against
    pub fn set_renderer(&mut self, renderer: RendererRef) {
        self.renderer = Some(renderer);
    }

    pub fn renderer(&self) -> Option<&RendererRef> {
        self.renderer.as_ref()
    }

    fn visible(&self, clip: Vector4<f32>) -> bool {
        clip.w > 0.0
            && clip.x.abs() <= clip.w
            && clip.y.abs() <= clip.w
            && clip.z >= 0.0
            && clip.z <= clip.w
    }
}

impl InputPort for SelectVisiblePoints {
    fn set_input(&mut self, input: FilterRef) {
        self.input = Some(input);
    }
}

impl Filter for SelectVisiblePoints {
    fn kind(&self) -> FilterKind {
        FilterKind::SelectVisiblePoints
    }

    fn input(&self) -> Option<&FilterRef> {
        self.input.as_ref()
    }

    fn apply(&self, input: Dataset) -> Result<Dataset, VizError> {
        let renderer = match &self.renderer {
            Some(renderer) => renderer,
            None => {
                trace!("SelectVisiblePoints has no renderer, passing all points through");
                return Ok(input);
            }
        };
        let view_proj = renderer.borrow().view_proj;

        let keep: Vec<usize> = input
            .points
            .iter()
            .enumerate()
            .filter(|(_, p)| self.visible(view_proj * Vector4::new(p.x, p.y, p.z, 1.0)))
            .map(|(i, _)| i)
            .collect();

        let mut out = Dataset::default();
        out.points = keep.iter().map(|&i| input.points[i]).collect();
        out.point_ids = input
            .point_ids
            .as_ref()
            .map(|ids| keep.iter().map(|&i| ids[i]).collect());
        for (name, array) in &input.point_arrays {
            let values = keep.iter().map(|&i| array[i]).collect();
            out.point_arrays.insert(name.clone(), values);
        }

        trace!(
            "SelectVisiblePoints kept {} of {} points",
            out.num_points(),
            input.num_points()
        );
        Ok(out)
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
    use crate::pipeline::dataset::Cell;
    use crate::pipeline::renderer::Renderer;
    use cgmath::Vector3;

    fn two_block_mesh() -> Dataset {
        // Two unit quads side by side, one per block
        let mut mesh = Dataset::default();
        mesh.points = vec![
            Vector3::new(0.0, 0.0, 0.0),
            Vector3::new(1.0, 0.0, 0.0),
            Vector3::new(1.0, 1.0, 0.0),
            Vector3::new(0.0, 1.0, 0.0),
            Vector3::new(2.0, 0.0, 0.0),
            Vector3::new(2.0, 1.0, 0.0),
        ];
        mesh.cells = vec![
            Cell::new(1, vec![0, 1, 2, 3]),
            Cell::new(2, vec![1, 4, 5, 2]),
        ];
        mesh.point_arrays
            .insert("temp".to_string(), vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        mesh.cell_arrays
            .insert("stress".to_string(), vec![10.0, 20.0]);
        mesh
    }

    #[test]
    fn extract_block_keeps_selected_block_and_remaps_points() {
        let mut extract = ExtractBlock::new(two_block_mesh());
        extract.set_blocks(vec![2]);
        let out = extract.apply(Dataset::default()).unwrap();

        assert_eq!(out.num_cells(), 1);
        assert_eq!(out.num_points(), 4);
        assert_eq!(out.cells[0].points, vec![0, 1, 2, 3]);
        assert_eq!(out.points[1], Vector3::new(2.0, 0.0, 0.0));
        assert_eq!(out.point_arrays["temp"], vec![2.0, 5.0, 6.0, 3.0]);
        assert_eq!(out.cell_arrays["stress"], vec![20.0]);
    }

    #[test]
    fn extract_block_empty_selection_keeps_everything() {
        let extract = ExtractBlock::new(two_block_mesh());
        let out = extract.apply(Dataset::default()).unwrap();
        assert_eq!(out.num_cells(), 2);
        assert_eq!(out.num_points(), 6);
    }

    #[test]
    fn id_filter_attaches_point_and_cell_ids() {
        let extract = ExtractBlock::new(two_block_mesh());
        let out = IdFilter::new()
            .apply(extract.apply(Dataset::default()).unwrap())
            .unwrap();
        assert_eq!(out.point_ids.as_deref(), Some(&[0, 1, 2, 3, 4, 5][..]));
        assert_eq!(out.cell_ids.as_deref(), Some(&[0, 1][..]));
    }

    #[test]
    fn cell_centers_moves_cell_data_to_centroids() {
        let extract = ExtractBlock::new(two_block_mesh());
        let mut data = extract.apply(Dataset::default()).unwrap();
        data.cell_ids = Some(vec![0, 1]);
        let out = CellCenters::new().apply(data).unwrap();

        assert_eq!(out.num_points(), 2);
        assert_eq!(out.num_cells(), 0);
        assert_eq!(out.points[0], Vector3::new(0.5, 0.5, 0.0));
        assert_eq!(out.points[1], Vector3::new(1.5, 0.5, 0.0));
        assert_eq!(out.point_ids.as_deref(), Some(&[0, 1][..]));
        assert_eq!(out.point_arrays["stress"], vec![10.0, 20.0]);
    }

    #[test]
    fn select_visible_points_culls_outside_the_viewport() {
        let mut data = Dataset::default();
        data.points = vec![
            Vector3::new(0.0, 0.0, 0.5),  // inside
            Vector3::new(2.0, 0.0, 0.5),  // right of the viewport
            Vector3::new(0.0, 0.0, -0.5), // behind the near plane
        ];
        data.point_ids = Some(vec![7, 8, 9]);
        data.point_arrays
            .insert("temp".to_string(), vec![1.0, 2.0, 3.0]);

        let mut select = SelectVisiblePoints::new();
        select.set_renderer(Renderer::default().into_ref());
        let out = select.apply(data).unwrap();

        assert_eq!(out.num_points(), 1);
        assert_eq!(out.point_ids.as_deref(), Some(&[7][..]));
        assert_eq!(out.point_arrays["temp"], vec![1.0]);
    }

    #[test]
    fn select_visible_points_without_renderer_passes_through() {
        let mut data = Dataset::default();
        data.points = vec![Vector3::new(100.0, 100.0, 100.0)];
        let out = SelectVisiblePoints::new().apply(data).unwrap();
        assert_eq!(out.num_points(), 1);
    }
}
