//! Dataset types flowing between filter stages.
//!
//! A [`Dataset`] is the currency of the filter pipeline: points, cells
//! grouped into mesh blocks, optional id arrays, and named scalar arrays
//! attached to either points or cells.

use std::collections::BTreeMap;

use cgmath::Vector3;

/// Identifier of a mesh block (subdomain)
pub type BlockId = u32;

/// One mesh cell: the block it belongs to and its point indices
#[derive(Debug, Clone, PartialEq)]
pub struct Cell {
    pub block: BlockId,
    pub points: Vec<usize>,
}

impl Cell {
    pub fn new(block: BlockId, points: Vec<usize>) -> Self {
        Self { block, points }
    }
}

/// Geometry plus attached data arrays, as produced and consumed by filters
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    pub points: Vec<Vector3<f32>>,
    pub cells: Vec<Cell>,
    /// Entity ids attached by an id filter; parallel to `points`
    pub point_ids: Option<Vec<u64>>,
    /// Entity ids attached by an id filter; parallel to `cells`
    pub cell_ids: Option<Vec<u64>>,
    /// Named scalar arrays, one value per point
    pub point_arrays: BTreeMap<String, Vec<f64>>,
    /// Named scalar arrays, one value per cell
    pub cell_arrays: BTreeMap<String, Vec<f64>>,
}

impl Dataset {
    pub fn num_points(&self) -> usize {
        self.points.len()
    }

    pub fn num_cells(&self) -> usize {
        self.cells.len()
    }

    /// Centroid of one cell
    pub fn cell_center(&self, cell: &Cell) -> Vector3<f32> {
        let mut sum = Vector3::new(0.0, 0.0, 0.0);
        for &index in &cell.points {
            sum += self.points[index];
        }
        sum / cell.points.len() as f32
    }
}
